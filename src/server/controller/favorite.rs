use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        favorite::{FavoritesResponseDto, ToggleFavoriteRequest, ToggleFavoriteResponseDto},
        listing::ListingDto,
    },
    server::{
        controller::util::get_user::get_user_from_session,
        data::{favorite::FavoriteRepository, listing::ListingRepository},
        error::Error,
        model::app::AppState,
    },
};

pub static FAVORITES_TAG: &str = "favorites";

/// Get the signed-in user's saved listings, most recently saved first
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = FAVORITES_TAG,
    responses(
        (status = 200, description = "Success when retrieving favorites", body = FavoritesResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let rows = FavoriteRepository::new(&state.db)
        .find_by_user(user.id)
        .await?;

    // A favorite row can outlive its listing only transiently; the cascade
    // removes it, so dangling rows are simply skipped
    let favorites = rows
        .into_iter()
        .filter_map(|(_, listing)| listing)
        .map(|listing| ListingDto::from_model(listing, None))
        .collect();

    Ok((
        StatusCode::OK,
        axum::Json(FavoritesResponseDto { favorites }),
    )
        .into_response())
}

/// Toggle a listing in the signed-in user's favorites
#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = FAVORITES_TAG,
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "Favorite toggled", body = ToggleFavoriteResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    session: Session,
    axum::Json(request): axum::Json<ToggleFavoriteRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let listing = ListingRepository::new(&state.db)
        .find_by_id(request.property_id)
        .await?;

    if listing.is_none() {
        return Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Property not found".to_string(),
            }),
        )
            .into_response());
    }

    let favorited = FavoriteRepository::new(&state.db)
        .toggle(user.id, request.property_id)
        .await?;

    Ok((
        StatusCode::OK,
        axum::Json(ToggleFavoriteResponseDto { favorited }),
    )
        .into_response())
}
