use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    auth::{handlers as auth_handlers, middleware as auth_middleware},
    infra::app_state::AppState,
    pets::handlers as pet_handlers,
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Public authentication endpoints
        .route("/auth/signup", post(auth_handlers::sign_up))
        .route("/auth/signin", post(auth_handlers::sign_in))
        // Listing works anonymously and returns an empty set
        .merge(create_optional_auth_routes(state.clone()))
        // Merge protected routes
        .merge(create_protected_routes(state))
}

fn create_optional_auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/pets", get(pet_handlers::list_pets))
        .layer(middleware::from_fn_with_state(
            state,
            auth_middleware::optional_auth,
        ))
}

/// Create routes that require authentication
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/auth/signout", post(auth_handlers::sign_out))
        .route("/auth/me", get(auth_handlers::me))
        // Pet directory endpoints
        .route("/pets", post(pet_handlers::create_pet))
        .route("/pets/{id}", put(pet_handlers::update_pet))
        .route("/pets/{id}", delete(pet_handlers::delete_pet))
        .layer(middleware::from_fn_with_state(
            state,
            auth_middleware::require_auth,
        ))
}
