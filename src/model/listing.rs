//! Listing wire types and the flat-row to nested-DTO transform.
//!
//! Enum-like listing columns are stored upper-case in the database and
//! surfaced lower-case on the wire; the enums in this module are the single
//! bidirectional mapping every read and write path goes through. `images`
//! and `features` live in TEXT columns as JSON array literals and are parsed
//! through one shared defensive helper that degrades to an empty list.

use chrono::{NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fallback agent attached to listings without a resolved owner.
pub const DEFAULT_AGENT_ID: &str = "default-agent";
pub const DEFAULT_AGENT_NAME: &str = "Real Estate Agent";
pub const DEFAULT_AGENT_EMAIL: &str = "agent@pasurite-tiranes.al";
pub const DEFAULT_AGENT_PHONE: &str = "+355 69 123 4567";

/// Structural category of a property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    #[serde(alias = "HOUSE")]
    House,
    #[serde(alias = "CONDO")]
    Condo,
    #[serde(alias = "TOWNHOUSE")]
    Townhouse,
    #[serde(alias = "APARTMENT")]
    Apartment,
}

impl PropertyType {
    /// The upper-case form persisted in the `property_type` column.
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::House => "HOUSE",
            Self::Condo => "CONDO",
            Self::Townhouse => "TOWNHOUSE",
            Self::Apartment => "APARTMENT",
        }
    }

    /// Parses a stored or user-supplied value, ignoring case.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "HOUSE" => Some(Self::House),
            "CONDO" => Some(Self::Condo),
            "TOWNHOUSE" => Some(Self::Townhouse),
            "APARTMENT" => Some(Self::Apartment),
            _ => None,
        }
    }
}

/// Lifecycle state of a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    #[serde(alias = "ACTIVE")]
    Active,
    #[serde(alias = "INACTIVE")]
    Inactive,
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "SOLD")]
    Sold,
}

impl ListingStatus {
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Pending => "PENDING",
            Self::Sold => "SOLD",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "PENDING" => Some(Self::Pending),
            "SOLD" => Some(Self::Sold),
            _ => None,
        }
    }
}

/// Whether a listing is offered for sale or for rent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    #[serde(alias = "SALE")]
    Sale,
    #[serde(alias = "RENT")]
    Rent,
}

impl ListingType {
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Rent => "RENT",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "SALE" => Some(Self::Sale),
            "RENT" => Some(Self::Rent),
            _ => None,
        }
    }
}

/// Parses a JSON array literal stored in a TEXT column.
///
/// Empty, null-ish, or malformed input yields an empty list; this path must
/// never fail, per the listing column invariant.
pub fn parse_json_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(raw).unwrap_or_default()
}

/// Serializes a list back into the JSON array literal stored in TEXT columns.
pub fn to_json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| String::from("[]"))
}

/// Formats a stored timestamp as an ISO-8601 string with millisecond
/// precision and a `Z` suffix.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CoordinatesDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[validate(nested)]
    pub coordinates: CoordinatesDto,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetailsDto {
    #[validate(range(min = 0, message = "Bedrooms must not be negative"))]
    pub bedrooms: i32,
    #[validate(range(min = 0, message = "Bathrooms must not be negative"))]
    pub bathrooms: i32,
    #[validate(range(min = 0, message = "Square footage must not be negative"))]
    pub square_footage: i32,
    pub property_type: PropertyType,
    #[serde(default)]
    pub year_built: Option<i32>,
}

/// The agent contact block attached to every listing response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AgentDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl AgentDto {
    /// Fixed placeholder for listings whose owning user is absent or deleted.
    pub fn placeholder() -> Self {
        Self {
            id: DEFAULT_AGENT_ID.to_string(),
            name: DEFAULT_AGENT_NAME.to_string(),
            email: DEFAULT_AGENT_EMAIL.to_string(),
            phone: DEFAULT_AGENT_PHONE.to_string(),
        }
    }

    pub fn from_owner(owner: &entity::agent_user::Model) -> Self {
        Self {
            id: owner.id.to_string(),
            name: owner.name.clone(),
            email: owner.email.clone(),
            phone: DEFAULT_AGENT_PHONE.to_string(),
        }
    }
}

/// The nested wire shape of a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub address: AddressDto,
    pub details: ListingDetailsDto,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub status: ListingStatus,
    pub listing_type: ListingType,
    pub is_pinned: bool,
    pub agent: AgentDto,
    pub created_at: String,
    pub updated_at: String,
}

impl ListingDto {
    /// Reshapes a stored row into the nested response shape.
    ///
    /// Enum-like columns that fail to parse degrade to their defaults rather
    /// than erroring, matching the defensive policy of the JSON columns.
    pub fn from_model(
        model: entity::listing::Model,
        owner: Option<&entity::agent_user::Model>,
    ) -> Self {
        let agent = owner.map(AgentDto::from_owner).unwrap_or_else(AgentDto::placeholder);

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            address: AddressDto {
                street: model.street,
                city: model.city,
                state: model.state,
                zip_code: model.zip_code,
                coordinates: CoordinatesDto {
                    lat: model.latitude,
                    lng: model.longitude,
                },
            },
            details: ListingDetailsDto {
                bedrooms: model.bedrooms,
                bathrooms: model.bathrooms,
                square_footage: model.square_footage,
                property_type: PropertyType::from_stored(&model.property_type)
                    .unwrap_or_default(),
                year_built: model.year_built,
            },
            images: parse_json_list(&model.images),
            features: parse_json_list(&model.features),
            status: ListingStatus::from_stored(&model.status).unwrap_or_default(),
            listing_type: ListingType::from_stored(&model.listing_type).unwrap_or_default(),
            is_pinned: model.is_pinned,
            agent,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

/// Accepted `sortBy` values for listing search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    #[default]
    CreatedAt,
    SquareFootage,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(Self::Price),
            "createdAt" => Some(Self::CreatedAt),
            "squareFootage" => Some(Self::SquareFootage),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Envelope for the unfiltered listing collection
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PropertiesResponseDto {
    pub properties: Vec<ListingDto>,
}

/// Envelope for the active-listings collection
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ActivePropertiesResponseDto {
    pub properties: Vec<ListingDto>,
    pub count: usize,
}

/// Pagination block returned by the search endpoint
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: u64,
}

/// Normalized filter set echoed back by the search endpoint
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFiltersDto {
    pub search_term: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub city: Option<String>,
    pub status: ListingStatus,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Envelope for the search endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResponseDto {
    pub properties: Vec<ListingDto>,
    pub pagination: SearchPaginationDto,
    pub filters: SearchFiltersDto,
}

/// Pagination block returned by the cached paginated endpoint
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagePaginationDto {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

/// Envelope for the cached paginated endpoint. `error` is present only on
/// the failure shape, which keeps the rest of the envelope intact.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaginatedResponseDto {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub properties: Vec<ListingDto>,
    pub pagination: PagePaginationDto,
}

/// Write payload for creating or replacing a listing.
///
/// Shares the nested response shape, so a previously fetched [`ListingDto`]
/// can be re-submitted as-is; enum fields accept both wire (lower-case) and
/// stored (upper-case) forms and are re-normalized to stored form on write.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,
    #[validate(nested)]
    pub address: AddressDto,
    #[validate(nested)]
    pub details: ListingDetailsDto,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub listing_type: ListingType,
    #[serde(default)]
    pub is_pinned: bool,
}
