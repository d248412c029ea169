use std::sync::Arc;

use axum_test::TestServer;
use petpet_model::{ApiResponse, AuthToken};
use serde_json::json;

use crate::auth::AuthCrypto;
use crate::infra::app_state::AppState;
use crate::infra::config::Config;
use crate::routes;
use crate::store::memory::{MemoryIdentityStore, MemoryPetStore};

/// Build a test server over in-memory stores.
pub fn test_server() -> TestServer {
    let state = AppState::new(
        Arc::new(MemoryPetStore::new()),
        Arc::new(MemoryIdentityStore::new()),
        AuthCrypto::for_tests(),
        Config::for_tests(),
    );
    let app = routes::create_router(state.clone()).with_state(state);
    TestServer::new(app).expect("test server")
}

/// Register a user and return their bearer token.
pub async fn sign_up(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "username": username,
            "password": "correct-horse-battery",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let envelope: ApiResponse<AuthToken> = response.json();
    envelope.data.expect("signup token").token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
