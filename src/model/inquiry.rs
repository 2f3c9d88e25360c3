use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::listing::format_timestamp;

/// Handling state of a visitor inquiry. Unlike listing enums, inquiry status
/// is surfaced in its stored upper-case form on the admin API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    InProgress,
    Closed,
}

impl InquiryStatus {
    pub fn as_stored(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Contacted => "CONTACTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "NEW" => Some(Self::New),
            "CONTACTED" => Some(Self::Contacted),
            "IN_PROGRESS" => Some(Self::InProgress),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Condensed listing reference embedded in admin inquiry rows
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InquiryListingRefDto {
    pub id: i32,
    pub title: String,
    pub price: i64,
    pub city: String,
}

/// A visitor inquiry as returned to the admin dashboard
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub property_id: i32,
    pub status: InquiryStatus,
    pub created_at: String,
    pub property: Option<InquiryListingRefDto>,
}

impl InquiryDto {
    pub fn from_model(
        model: entity::inquiry::Model,
        listing: Option<&entity::listing::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            property_id: model.listing_id,
            status: InquiryStatus::from_stored(&model.status).unwrap_or_default(),
            created_at: format_timestamp(model.created_at),
            property: listing.map(|l| InquiryListingRefDto {
                id: l.id,
                title: l.title.clone(),
                price: l.price,
                city: l.city.clone(),
            }),
        }
    }
}

/// Envelope returned after a visitor submits an inquiry
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct InquiryCreatedDto {
    pub success: bool,
    pub inquiry: InquiryDto,
}

/// Pagination block returned by the admin inquiry list
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InquiryPaginationDto {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Envelope for the admin inquiry list
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct InquiriesResponseDto {
    pub inquiries: Vec<InquiryDto>,
    pub pagination: InquiryPaginationDto,
}

/// Body for creating an inquiry (submitted by anonymous visitors)
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub property_id: i32,
}

/// Body for an admin inquiry status update
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateInquiryRequest {
    pub status: InquiryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_stored_form() {
        assert_eq!(
            serde_json::to_value(InquiryStatus::InProgress).unwrap(),
            "IN_PROGRESS"
        );
        assert_eq!(
            InquiryStatus::from_stored("in_progress"),
            Some(InquiryStatus::InProgress)
        );
    }
}
