use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use petpet_model::UserProfile;

use crate::errors::AppError;
use crate::infra::app_state::AppState;

/// Authenticated identity attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub profile: UserProfile,
    /// HMAC digest of the presented bearer token; used for sign-out.
    pub token_hash: String,
}

/// Extension inserted by [`optional_auth`]: always present, possibly
/// anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// Reject requests without a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request).ok_or_else(|| {
        AppError::unauthorized(
            "Authentication required. Please provide a valid token.",
        )
    })?;
    let user = validate_token(&state, &token).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Attach the user when a valid token is presented, continue anonymously
/// otherwise. Invalid tokens are treated as absent, matching the original
/// backend.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut user = None;
    if let Some(token) = extract_bearer_token(&request)
        && let Ok(current) = validate_token(&state, &token).await
    {
        user = Some(current);
    }
    request.extensions_mut().insert(MaybeUser(user));
    next.run(request).await
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

async fn validate_token(
    state: &AppState,
    token: &str,
) -> Result<CurrentUser, AppError> {
    let token_hash = state.crypto.hash_token(token);

    let session = state
        .identity
        .find_session(&token_hash)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;

    if !session.is_valid(Utc::now()) {
        return Err(AppError::unauthorized("Invalid or expired token"));
    }

    let user = state
        .identity
        .find_user_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;

    Ok(CurrentUser {
        profile: user.profile(),
        token_hash,
    })
}
