use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto, ValidationErrorDto},
        inquiry::{
            CreateInquiryRequest, InquiriesResponseDto, InquiryCreatedDto, InquiryDto,
            InquiryPaginationDto, InquiryStatus, UpdateInquiryRequest,
        },
    },
    server::{
        controller::util::get_user::require_admin,
        data::{inquiry::InquiryRepository, listing::ListingRepository},
        error::Error,
        model::app::AppState,
        service::listing::page::{MAX_LIMIT, MAX_PAGE},
    },
};

pub static INQUIRIES_TAG: &str = "inquiries";

const DEFAULT_INQUIRY_LIMIT: u64 = 10;

/// Filters accepted by the admin inquiry list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct InquiryParams {
    pub property_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn parse_positive(raw: &Option<String>) -> Option<u64> {
    raw.as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|n| *n > 0)
}

/// Submit an inquiry about a property
///
/// Open to anonymous visitors; the target property must exist.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    tag = INQUIRIES_TAG,
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry created", body = InquiryCreatedDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 404, description = "Property not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_inquiry(
    State(state): State<AppState>,
    axum::Json(request): axum::Json<CreateInquiryRequest>,
) -> Result<impl IntoResponse, Error> {
    if let Err(errors) = request.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(ValidationErrorDto::from_errors(&errors)),
        )
            .into_response());
    }

    let listing = ListingRepository::new(&state.db)
        .find_by_id(request.property_id)
        .await?;

    let Some((listing, _)) = listing else {
        return Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Property not found".to_string(),
            }),
        )
            .into_response());
    };

    let created = InquiryRepository::new(&state.db).create(&request).await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(InquiryCreatedDto {
            success: true,
            inquiry: InquiryDto::from_model(created, Some(&listing)),
        }),
    )
        .into_response())
}

/// List inquiries with optional property and status filters
///
/// Admin only.
#[utoipa::path(
    get,
    path = "/api/inquiries",
    tag = INQUIRIES_TAG,
    params(InquiryParams),
    responses(
        (status = 200, description = "Success when retrieving inquiries", body = InquiriesResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_inquiries(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<InquiryParams>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let property_id = params
        .property_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i32>().ok());
    let status = params
        .status
        .as_deref()
        .and_then(InquiryStatus::from_stored);
    let page = parse_positive(&params.page).unwrap_or(1).min(MAX_PAGE);
    let limit = parse_positive(&params.limit)
        .unwrap_or(DEFAULT_INQUIRY_LIMIT)
        .min(MAX_LIMIT);

    let (rows, total) = InquiryRepository::new(&state.db)
        .find_page(property_id, status, page, limit)
        .await?;

    let inquiries = rows
        .into_iter()
        .map(|(inquiry, listing)| InquiryDto::from_model(inquiry, listing.as_ref()))
        .collect();

    Ok((
        StatusCode::OK,
        axum::Json(InquiriesResponseDto {
            inquiries,
            pagination: InquiryPaginationDto {
                page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        }),
    )
        .into_response())
}

/// Update an inquiry's handling status
///
/// Admin only.
#[utoipa::path(
    patch,
    path = "/api/inquiries/{id}",
    tag = INQUIRIES_TAG,
    params(
        ("id" = i32, Path, description = "Inquiry ID")
    ),
    request_body = UpdateInquiryRequest,
    responses(
        (status = 200, description = "Inquiry updated", body = InquiryDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Inquiry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_inquiry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Json(request): axum::Json<UpdateInquiryRequest>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    match InquiryRepository::new(&state.db)
        .update_status(id, request.status)
        .await?
    {
        Some(updated) => Ok((
            StatusCode::OK,
            axum::Json(InquiryDto::from_model(updated, None)),
        )
            .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Inquiry not found".to_string(),
            }),
        )
            .into_response()),
    }
}

/// Delete an inquiry
///
/// Admin only.
#[utoipa::path(
    delete,
    path = "/api/inquiries/{id}",
    tag = INQUIRIES_TAG,
    params(
        ("id" = i32, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 200, description = "Inquiry deleted", body = SuccessDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Inquiry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let result = InquiryRepository::new(&state.db).delete(id).await?;

    if result.rows_affected > 0 {
        Ok((
            StatusCode::OK,
            axum::Json(SuccessDto { success: true }),
        )
            .into_response())
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "Inquiry not found".to_string(),
            }),
        )
            .into_response())
    }
}
