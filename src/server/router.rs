//! HTTP routing and OpenAPI documentation configuration.
//!
//! All JSON API endpoints are registered here with their OpenAPI
//! specifications via utoipa, and Swagger UI is served at `/api/docs`.
//! The crawler-facing text endpoints (robots.txt, sitemap.xml) sit outside
//! the OpenAPI surface.

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/properties` - Every property regardless of status
/// - `POST /api/properties` - Create a property (signed-in agents)
/// - `GET /api/properties/active` - Active properties with count
/// - `GET /api/properties/search` - Filtered, sorted, paginated search
/// - `GET /api/properties/paginated` - Cached page of active properties
/// - `GET /api/properties/{id}` - Single property
/// - `PUT /api/properties/{id}` - Replace a property (signed-in agents)
/// - `DELETE /api/properties/{id}` - Delete a property (signed-in agents)
/// - `POST /api/inquiries` - Submit an inquiry (anonymous)
/// - `GET /api/inquiries` - List inquiries (admin)
/// - `PATCH /api/inquiries/{id}` - Update inquiry status (admin)
/// - `DELETE /api/inquiries/{id}` - Delete an inquiry (admin)
/// - `GET /api/favorites` - Signed-in user's saved listings
/// - `POST /api/favorites` - Toggle a favorite
/// - `POST /api/auth/login` - Sign in with email and password
/// - `GET /api/auth/logout` - Sign out
/// - `GET /api/auth/user` - Current user
/// - `GET /robots.txt` - Crawler directives
/// - `GET /sitemap.xml` - XML sitemap of static, listing, and city pages
///
/// The OpenAPI specification is available at `/api/docs/openapi.json` and
/// interactive documentation at `/api/docs`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Prona", description = "Prona real estate API"), tags(
        (name = controller::listing::PROPERTIES_TAG, description = "Property listing API routes"),
        (name = controller::inquiry::INQUIRIES_TAG, description = "Visitor inquiry API routes"),
        (name = controller::favorite::FAVORITES_TAG, description = "Saved listing API routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::listing::get_properties,
            controller::listing::create_property
        ))
        .routes(routes!(controller::listing::get_active_properties))
        .routes(routes!(controller::listing::search_properties))
        .routes(routes!(controller::listing::get_paginated_properties))
        .routes(routes!(
            controller::listing::get_property,
            controller::listing::update_property,
            controller::listing::delete_property
        ))
        .routes(routes!(
            controller::inquiry::create_inquiry,
            controller::inquiry::get_inquiries
        ))
        .routes(routes!(
            controller::inquiry::update_inquiry,
            controller::inquiry::delete_inquiry
        ))
        .routes(routes!(
            controller::favorite::get_favorites,
            controller::favorite::toggle_favorite
        ))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .split_for_parts();

    let routes = routes
        .route("/robots.txt", get(controller::seo::robots_txt))
        .route("/sitemap.xml", get(controller::seo::sitemap_xml))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
