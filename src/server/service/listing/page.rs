//! Validates and normalizes pagination and sort parameters.
//!
//! The resolver never errors: non-positive, non-numeric, or unrecognized
//! input falls back to defaults, and `limit` is clamped to a maximum to
//! bound response size.

use entity::listing;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::model::listing::{SortField, SortOrder};

/// Default page size for the search endpoint.
pub const DEFAULT_SEARCH_LIMIT: u64 = 12;
/// Default page size for the cached paginated endpoint.
pub const DEFAULT_PAGINATED_LIMIT: u64 = 18;
/// Upper bound applied to any requested page size.
pub const MAX_LIMIT: u64 = 100;
/// Upper bound applied to any requested page number. Keeps the computed
/// offset well inside what database drivers accept; pages past the end of
/// the data are already empty.
pub const MAX_PAGE: u64 = 10_000;

/// Raw pagination parameters accepted by the cached paginated endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A resolved page/sort specification.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSpec {
    pub page: u64,
    pub limit: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl PageSpec {
    /// Resolves raw parameters into a safe spec.
    ///
    /// An unrecognized `sortBy` falls back to `createdAt desc` as a pair,
    /// ignoring any supplied `sortOrder`.
    pub fn resolve(
        page: &Option<String>,
        limit: &Option<String>,
        sort_by: &Option<String>,
        sort_order: &Option<String>,
        default_limit: u64,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(1).min(MAX_PAGE);
        let limit = parse_positive(limit).unwrap_or(default_limit).min(MAX_LIMIT);

        let (sort_by, sort_order) = match sort_by.as_deref().map(SortField::parse) {
            // Absent: default field, but honor the requested order
            None => (
                SortField::default(),
                resolve_order(sort_order),
            ),
            Some(Some(field)) => (field, resolve_order(sort_order)),
            // Present but unrecognized: hard fallback to createdAt desc
            Some(None) => (SortField::CreatedAt, SortOrder::Desc),
        };

        Self {
            page,
            limit,
            sort_by,
            sort_order,
        }
    }

    /// Fixed `createdAt desc` ordering used by the cached paginated endpoint.
    pub fn resolve_fixed(params: &PageParams, default_limit: u64) -> Self {
        Self {
            page: parse_positive(&params.page).unwrap_or(1).min(MAX_PAGE),
            limit: parse_positive(&params.limit)
                .unwrap_or(default_limit)
                .min(MAX_LIMIT),
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }

    /// Saturates rather than overflowing; an absurd page simply lands past
    /// the end of the data and yields an empty page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn sort_column(&self) -> listing::Column {
        match self.sort_by {
            SortField::Price => listing::Column::Price,
            SortField::CreatedAt => listing::Column::CreatedAt,
            SortField::SquareFootage => listing::Column::SquareFootage,
        }
    }

    pub fn order(&self) -> sea_orm::Order {
        match self.sort_order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }

    /// Number of pages needed to cover `total` rows. `limit` is always >= 1.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn has_more(&self, total: u64) -> bool {
        self.page < self.total_pages(total)
    }
}

fn resolve_order(raw: &Option<String>) -> SortOrder {
    raw.as_deref()
        .and_then(SortOrder::parse)
        .unwrap_or_default()
}

fn parse_positive(raw: &Option<String>) -> Option<u64> {
    raw.as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(page: &str, limit: &str, sort_by: &str, sort_order: &str) -> PageSpec {
        PageSpec::resolve(
            &Some(page.to_string()),
            &Some(limit.to_string()),
            &Some(sort_by.to_string()),
            &Some(sort_order.to_string()),
            DEFAULT_SEARCH_LIMIT,
        )
    }

    /// Absent parameters resolve to the documented defaults
    #[test]
    fn defaults_when_absent() {
        let spec = PageSpec::resolve(&None, &None, &None, &None, DEFAULT_SEARCH_LIMIT);

        assert_eq!(spec.page, 1);
        assert_eq!(spec.limit, DEFAULT_SEARCH_LIMIT);
        assert_eq!(spec.sort_by, SortField::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Desc);
    }

    /// Non-numeric and non-positive input degrades to defaults
    #[test]
    fn bad_input_degrades_to_defaults() {
        let spec = resolve("zero", "-5", "createdAt", "desc");

        assert_eq!(spec.page, 1);
        assert_eq!(spec.limit, DEFAULT_SEARCH_LIMIT);

        let spec = resolve("0", "0", "createdAt", "desc");

        assert_eq!(spec.page, 1);
        assert_eq!(spec.limit, DEFAULT_SEARCH_LIMIT);
    }

    /// Limit is clamped to the maximum
    #[test]
    fn limit_is_clamped() {
        let spec = resolve("1", "5000", "createdAt", "desc");

        assert_eq!(spec.limit, MAX_LIMIT);
    }

    /// Unrecognized sortBy falls back to createdAt desc as a pair
    #[test]
    fn unknown_sort_field_forces_created_at_desc() {
        let spec = resolve("1", "12", "favoriteColor", "asc");

        assert_eq!(spec.sort_by, SortField::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Desc);
    }

    /// Recognized sort parameters are honored
    #[test]
    fn recognized_sort_is_honored() {
        let spec = resolve("3", "10", "price", "asc");

        assert_eq!(spec.sort_by, SortField::Price);
        assert_eq!(spec.sort_order, SortOrder::Asc);
        assert_eq!(spec.offset(), 20);
    }

    /// An absurdly large page is clamped and its offset computed without
    /// overflowing
    #[test]
    fn huge_page_number_does_not_overflow() {
        let spec = resolve(&u64::MAX.to_string(), "100", "createdAt", "desc");

        assert_eq!(spec.page, MAX_PAGE);
        assert_eq!(spec.limit, MAX_LIMIT);
        assert_eq!(spec.offset(), (MAX_PAGE - 1) * MAX_LIMIT);
        assert_eq!(spec.total_pages(25), 1);
        assert!(!spec.has_more(25));

        let fixed = PageSpec::resolve_fixed(
            &PageParams {
                page: Some(u64::MAX.to_string()),
                limit: Some("18".to_string()),
            },
            DEFAULT_PAGINATED_LIMIT,
        );

        assert_eq!(fixed.page, MAX_PAGE);
        assert_eq!(fixed.offset(), (MAX_PAGE - 1) * 18);
    }

    /// Pagination math: totalPages = ceil(total/limit), hasMore = page < totalPages
    #[test]
    fn pagination_math() {
        let spec = resolve("1", "10", "createdAt", "desc");

        assert_eq!(spec.total_pages(25), 3);
        assert!(spec.has_more(25));

        let last_page = resolve("3", "10", "createdAt", "desc");

        assert_eq!(last_page.total_pages(25), 3);
        assert!(!last_page.has_more(25));

        assert_eq!(spec.total_pages(0), 0);
        assert!(!spec.has_more(0));
    }
}
