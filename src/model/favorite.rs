use serde::{Deserialize, Serialize};

use crate::model::listing::ListingDto;

/// Envelope for a user's saved listings
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct FavoritesResponseDto {
    pub favorites: Vec<ListingDto>,
}

/// Body for toggling a favorite
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteRequest {
    pub property_id: i32,
}

/// Whether the listing is favorited after a toggle
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ToggleFavoriteResponseDto {
    pub favorited: bool,
}
