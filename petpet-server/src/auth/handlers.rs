use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{Duration, Utc};
use petpet_model::{
    ApiResponse, AuthToken, OwnerId, SignInRequest, SignUpRequest, UserProfile,
};
use tracing::info;

use crate::auth::middleware::CurrentUser;
use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;
use crate::store::{SessionRecord, UserRecord};

pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthToken>>)> {
    request.validate()?;

    let password_hash = state
        .crypto
        .hash_password(&request.password)
        .map_err(|_| AppError::internal("Failed to hash password"))?;

    let user = UserRecord {
        id: OwnerId::new(),
        username: request.username.trim().to_lowercase(),
        password_hash,
        created_at: Utc::now(),
    };
    state.identity.create_user(&user).await?;
    info!(username = %user.username, "user registered");

    let token = issue_session(&state, user.id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(token))))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    request.validate()?;

    let user = state
        .identity
        .find_user_by_username(&request.username.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let verified = state
        .crypto
        .verify_password(&request.password, &user.password_hash)
        .map_err(|_| AppError::internal("Failed to verify password"))?;
    if !verified {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = issue_session(&state, user.id).await?;
    Ok(Json(ApiResponse::success(token)))
}

pub async fn sign_out(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.identity.revoke_session(&user.token_hash).await?;
    info!(user = %user.profile.username, "session revoked");
    Ok(Json(
        ApiResponse::success(()).with_message("Signed out successfully"),
    ))
}

/// Token verification endpoint: returns the identity behind the presented
/// bearer token.
pub async fn me(
    Extension(user): Extension<CurrentUser>,
) -> Json<ApiResponse<UserProfile>> {
    Json(ApiResponse::success(user.profile))
}

async fn issue_session(
    state: &AppState,
    user_id: OwnerId,
) -> AppResult<AuthToken> {
    let token = state
        .crypto
        .generate_token()
        .map_err(|_| AppError::internal("Failed to generate token"))?;
    let ttl = Duration::hours(state.config.session_ttl_hours);

    let session = SessionRecord {
        token_hash: state.crypto.hash_token(&token),
        user_id,
        expires_at: Utc::now() + ttl,
        revoked: false,
    };
    state.identity.create_session(&session).await?;

    Ok(AuthToken {
        token,
        expires_in: ttl.num_seconds(),
    })
}
