//! Maps raw search query parameters onto a sea-orm predicate.
//!
//! All parameters arrive as strings and are parsed defensively: values that
//! fail to parse are dropped as if absent, never surfaced as an error. The
//! caller is a public search UI, so bad input degrades instead of failing.

use entity::listing;
use sea_orm::sea_query::{Expr, ExprTrait, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::model::listing::{ListingStatus, ListingType, PropertyType, SearchFiltersDto};

/// Raw query parameters accepted by the search endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text term matched across title, description, street, and city
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// The normalized filter set derived from [`SearchParams`].
#[derive(Clone, Debug, PartialEq)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub city: Option<String>,
    pub status: ListingStatus,
}

impl ListingFilter {
    /// Parses raw parameters, dropping anything malformed.
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            search: non_empty(&params.search),
            min_price: parse_number(&params.min_price),
            max_price: parse_number(&params.max_price),
            property_type: non_empty(&params.property_type)
                .and_then(|raw| PropertyType::from_stored(&raw)),
            listing_type: non_empty(&params.listing_type)
                .and_then(|raw| ListingType::from_stored(&raw)),
            bedrooms: parse_number(&params.bedrooms),
            bathrooms: parse_number(&params.bathrooms),
            city: non_empty(&params.city),
            status: non_empty(&params.status)
                .and_then(|raw| ListingStatus::from_stored(&raw))
                .unwrap_or_default(),
        }
    }

    /// A filter matching only active listings, used by the fixed-filter
    /// endpoints.
    pub fn active() -> Self {
        Self {
            search: None,
            min_price: None,
            max_price: None,
            property_type: None,
            listing_type: None,
            bedrooms: None,
            bathrooms: None,
            city: None,
            status: ListingStatus::Active,
        }
    }

    /// Builds the predicate consumed by the data layer. The same condition
    /// must back both the page fetch and the count for pagination metadata
    /// to stay consistent.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(listing::Column::Status.eq(self.status.as_stored()));

        if let Some(term) = &self.search {
            cond = cond.add(
                Condition::any()
                    .add(contains_insensitive(listing::Column::Title, term))
                    .add(contains_insensitive(listing::Column::Description, term))
                    .add(contains_insensitive(listing::Column::Street, term))
                    .add(contains_insensitive(listing::Column::City, term)),
            );
        }

        if let Some(min_price) = self.min_price {
            cond = cond.add(listing::Column::Price.gte(min_price));
        }

        if let Some(max_price) = self.max_price {
            cond = cond.add(listing::Column::Price.lte(max_price));
        }

        if let Some(property_type) = self.property_type {
            cond = cond.add(listing::Column::PropertyType.eq(property_type.as_stored()));
        }

        if let Some(listing_type) = self.listing_type {
            cond = cond.add(listing::Column::ListingType.eq(listing_type.as_stored()));
        }

        if let Some(bedrooms) = self.bedrooms {
            cond = cond.add(listing::Column::Bedrooms.eq(bedrooms));
        }

        // Bathrooms is an "at least" match, unlike the exact bedrooms match
        if let Some(bathrooms) = self.bathrooms {
            cond = cond.add(listing::Column::Bathrooms.gte(bathrooms));
        }

        if let Some(city) = &self.city {
            cond = cond.add(contains_insensitive(listing::Column::City, city));
        }

        cond
    }

    /// The normalized filter set echoed back in search responses.
    pub fn echo(
        &self,
        sort_by: crate::model::listing::SortField,
        sort_order: crate::model::listing::SortOrder,
    ) -> SearchFiltersDto {
        SearchFiltersDto {
            search_term: self.search.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            property_type: self.property_type,
            listing_type: self.listing_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            city: self.city.clone(),
            status: self.status,
            sort_by,
            sort_order,
        }
    }
}

/// Case-insensitive substring match on a listing column, portable across
/// backends via `lower(col) LIKE lower(pattern)`.
fn contains_insensitive(col: listing::Column, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase());

    Expr::expr(Func::lower(Expr::col((listing::Entity, col)))).like(pattern)
}

fn non_empty(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_number<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(f: impl FnOnce(&mut SearchParams)) -> SearchParams {
        let mut params = SearchParams::default();
        f(&mut params);
        params
    }

    /// Malformed numeric parameters are treated as absent
    #[test]
    fn malformed_min_price_is_dropped() {
        let with_garbage = ListingFilter::from_params(&params_with(|p| {
            p.min_price = Some("abc".to_string());
        }));
        let without = ListingFilter::from_params(&SearchParams::default());

        assert_eq!(with_garbage.min_price, None);
        assert_eq!(with_garbage, without);
    }

    /// Status defaults to active when absent or unrecognized
    #[test]
    fn status_defaults_to_active() {
        let absent = ListingFilter::from_params(&SearchParams::default());
        let junk = ListingFilter::from_params(&params_with(|p| {
            p.status = Some("demolished".to_string());
        }));
        let sold = ListingFilter::from_params(&params_with(|p| {
            p.status = Some("sold".to_string());
        }));

        assert_eq!(absent.status, ListingStatus::Active);
        assert_eq!(junk.status, ListingStatus::Active);
        assert_eq!(sold.status, ListingStatus::Sold);
    }

    /// Enum-like parameters are case-normalized, unknown values dropped
    #[test]
    fn property_type_is_case_normalized() {
        let lower = ListingFilter::from_params(&params_with(|p| {
            p.property_type = Some("apartment".to_string());
        }));
        let upper = ListingFilter::from_params(&params_with(|p| {
            p.property_type = Some("APARTMENT".to_string());
        }));
        let junk = ListingFilter::from_params(&params_with(|p| {
            p.property_type = Some("igloo".to_string());
        }));

        assert_eq!(lower.property_type, Some(PropertyType::Apartment));
        assert_eq!(upper.property_type, Some(PropertyType::Apartment));
        assert_eq!(junk.property_type, None);
    }

    /// Whitespace-only strings count as absent
    #[test]
    fn blank_parameters_are_absent() {
        let filter = ListingFilter::from_params(&params_with(|p| {
            p.search = Some("   ".to_string());
            p.city = Some(String::new());
        }));

        assert_eq!(filter.search, None);
        assert_eq!(filter.city, None);
    }
}
