use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto, ValidationErrorDto},
        listing::{
            ActivePropertiesResponseDto, ListingDto, ListingPayload, PagePaginationDto,
            PaginatedResponseDto, PropertiesResponseDto, SearchResponseDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::app::AppState,
        service::listing::{
            filter::SearchParams,
            page::{PageParams, DEFAULT_PAGINATED_LIMIT},
            ListingService,
        },
    },
};

pub static PROPERTIES_TAG: &str = "properties";

/// Instructs CDNs to serve cached pages for a minute and revalidate in the
/// background for another two.
static PAGINATED_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";

/// Get every property regardless of status
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = PROPERTIES_TAG,
    responses(
        (status = 200, description = "Success when retrieving properties", body = PropertiesResponseDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_properties(State(state): State<AppState>) -> impl IntoResponse {
    match ListingService::new(&state.db).list_all().await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => {
            tracing::error!("Failed to fetch properties: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorDto {
                    error: "Failed to fetch properties".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Get active properties with their count, pinned first
#[utoipa::path(
    get,
    path = "/api/properties/active",
    tag = PROPERTIES_TAG,
    responses(
        (status = 200, description = "Success when retrieving active properties", body = ActivePropertiesResponseDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_active_properties(State(state): State<AppState>) -> impl IntoResponse {
    match ListingService::new(&state.db).list_active().await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => {
            tracing::error!("Failed to fetch active properties: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorDto {
                    error: "Failed to fetch active properties".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Search properties with filters, sorting, and pagination
///
/// Malformed filter values are dropped rather than rejected; the normalized
/// filter set actually applied is echoed back in the response.
#[utoipa::path(
    get,
    path = "/api/properties/search",
    tag = PROPERTIES_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Success when searching properties", body = SearchResponseDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_properties(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match ListingService::new(&state.db).search(&params).await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => {
            tracing::error!("Failed to search properties: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorDto {
                    error: "Failed to search properties".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Get one cached page of active properties
///
/// Served from an in-process cache with a 60 second TTL; the response carries
/// a matching Cache-Control header for CDN layers.
#[utoipa::path(
    get,
    path = "/api/properties/paginated",
    tag = PROPERTIES_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Success when retrieving a page of properties", body = PaginatedResponseDto),
        (status = 500, description = "Internal server error", body = PaginatedResponseDto)
    ),
)]
pub async fn get_paginated_properties(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    match ListingService::new(&state.db)
        .paginated(&state.cache, &params)
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, PAGINATED_CACHE_CONTROL)],
            axum::Json(response),
        )
            .into_response(),
        // Failed pages keep the envelope shape so clients can render an
        // empty state without a separate error path
        Err(err) => {
            tracing::error!("Failed to fetch paginated properties: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(PaginatedResponseDto {
                    success: false,
                    error: Some("Failed to fetch properties".to_string()),
                    properties: vec![],
                    pagination: PagePaginationDto {
                        page: 1,
                        limit: DEFAULT_PAGINATED_LIMIT,
                        total: 0,
                        total_pages: 0,
                        has_more: false,
                    },
                }),
            )
                .into_response()
        }
    }
}

/// Get a single property by ID
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = PROPERTIES_TAG,
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Success when retrieving a property", body = ListingDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match ListingService::new(&state.db).get(id).await {
        Ok(Some(listing)) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Property not found".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to fetch property {}: {}", id, err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorDto {
                    error: "Failed to fetch property".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Create a new property
///
/// Requires a signed-in agent; the created listing is owned by the caller.
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = PROPERTIES_TAG,
    request_body = ListingPayload,
    responses(
        (status = 201, description = "Property created", body = ListingDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_property(
    State(state): State<AppState>,
    session: Session,
    axum::Json(payload): axum::Json<ListingPayload>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    if let Err(errors) = payload.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(ValidationErrorDto::from_errors(&errors)),
        )
            .into_response());
    }

    let listing = ListingService::new(&state.db)
        .create(&payload, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, axum::Json(listing)).into_response())
}

/// Replace an existing property
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    tag = PROPERTIES_TAG,
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    request_body = ListingPayload,
    responses(
        (status = 200, description = "Property updated", body = ListingDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_property(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<ListingPayload>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    if let Err(errors) = payload.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(ValidationErrorDto::from_errors(&errors)),
        )
            .into_response());
    }

    match ListingService::new(&state.db).update(id, &payload).await? {
        Some(listing) => Ok((StatusCode::OK, axum::Json(listing)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Property not found".to_string(),
            }),
        )
            .into_response()),
    }
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = PROPERTIES_TAG,
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property deleted", body = SuccessDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_property(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    if ListingService::new(&state.db).delete(id).await? {
        Ok((
            StatusCode::OK,
            axum::Json(SuccessDto { success: true }),
        )
            .into_response())
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Property not found".to_string(),
            }),
        )
            .into_response())
    }
}
