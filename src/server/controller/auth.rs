use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto, ValidationErrorDto},
        user::{LoginRequest, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Sign in with email and password
///
/// On success the user ID is stored in the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 400, description = "Validation failed", body = ValidationErrorDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    if let Err(errors) = request.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(ValidationErrorDto::from_errors(&errors)),
        )
            .into_response());
    }

    let user = AuthService::new(&state.db)
        .login(&request.email, &request.password)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::OK, axum::Json(user)).into_response())
}

/// Sign out, clearing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Signed out", body = SuccessDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Signing out without a session is still a success
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok((
        StatusCode::OK,
        axum::Json(SuccessDto { success: true }),
    )
        .into_response())
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Signed-in user", body = UserDto),
        (status = 401, description = "Unauthorized", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    match get_user_from_session(&state, &session).await {
        Ok(user) => Ok((StatusCode::OK, axum::Json(user)).into_response()),
        Err(Error::AuthError(AuthError::UserNotInSession)) => Ok((
            StatusCode::NOT_FOUND,
            axum::Json(ErrorDto {
                error: "User not found".to_string(),
            }),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}
