//! Crawler-facing endpoints: robots.txt and the XML sitemap.
//!
//! These render text rather than JSON and are registered outside the
//! OpenAPI surface.

use std::collections::BTreeSet;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::SecondsFormat;

use crate::server::{data::listing::ListingRepository, error::Error, model::app::AppState};

static STATIC_PAGES: &[&str] = &["", "/properties", "/about", "/contact"];

pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api\n\nSitemap: {}/sitemap.xml\n",
        state.base_url
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}

/// Active listings, static pages, and one page per distinct city.
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let listings = ListingRepository::new(&state.db).find_active().await?;

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for page in STATIC_PAGES {
        push_url(&mut xml, &format!("{}{}", state.base_url, page), None);
    }

    let mut cities = BTreeSet::new();

    for listing in &listings {
        let lastmod = listing
            .updated_at
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        push_url(
            &mut xml,
            &format!("{}/properties/{}", state.base_url, listing.id),
            Some(&lastmod),
        );

        cities.insert(city_slug(&listing.city));
    }

    for city in cities {
        push_url(
            &mut xml,
            &format!("{}/properties/city/{}", state.base_url, city),
            None,
        );
    }

    xml.push_str("</urlset>\n");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    ))
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));

    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }

    xml.push_str("  </url>\n");
}

fn city_slug(city: &str) -> String {
    city.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_slugs_are_lowercase_hyphenated() {
        assert_eq!(city_slug("Tirana"), "tirana");
        assert_eq!(city_slug("  Vlore  "), "vlore");
        assert_eq!(city_slug("Fier Center"), "fier-center");
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
