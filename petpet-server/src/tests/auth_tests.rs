use axum::http::{StatusCode, header};
use petpet_model::{ApiResponse, AuthToken, UserProfile};
use serde_json::json;

use super::test_utils::{bearer, sign_up, test_server};

#[tokio::test]
async fn signup_issues_a_token_the_verify_endpoint_accepts() {
    let server = test_server();
    let token = sign_up(&server, "Ada").await;

    let response = server
        .get("/api/v1/auth/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();

    let envelope: ApiResponse<UserProfile> = response.json();
    assert!(envelope.success);
    // Usernames are normalized to lowercase on registration.
    assert_eq!(envelope.data.unwrap().username, "ada");
}

#[tokio::test]
async fn signup_rejects_duplicates_and_weak_passwords() {
    let server = test_server();
    sign_up(&server, "ada").await;

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "username": "ada", "password": "correct-horse-battery" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let envelope: ApiResponse<AuthToken> = response.json();
    assert!(!envelope.success);
    assert!(envelope.error.unwrap().contains("already taken"));

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "username": "grace", "password": "short" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signin_verifies_credentials() {
    let server = test_server();
    sign_up(&server, "ada").await;

    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "username": "ada", "password": "wrong-password" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "username": "ada", "password": "correct-horse-battery" }))
        .await;
    response.assert_status_ok();
    let envelope: ApiResponse<AuthToken> = response.json();
    let token = envelope.data.unwrap();
    assert!(token.expires_in > 0);
    assert!(!token.token.is_empty());
}

#[tokio::test]
async fn unknown_users_get_the_same_error_as_bad_passwords() {
    let server = test_server();
    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "username": "nobody", "password": "whatever-here" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let envelope: ApiResponse<AuthToken> = response.json();
    assert_eq!(envelope.error.unwrap(), "Invalid credentials");
}

#[tokio::test]
async fn signout_revokes_the_session() {
    let server = test_server();
    let token = sign_up(&server, "ada").await;

    let response = server
        .post("/api/v1/auth/signout")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();

    // The token no longer verifies.
    let response = server
        .get("/api/v1/auth/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_endpoints_reject_missing_and_garbage_tokens() {
    let server = test_server();

    let response = server.get("/api/v1/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let envelope: ApiResponse<UserProfile> = response.json();
    assert!(!envelope.success);

    let response = server
        .get("/api/v1/auth/me")
        .add_header(header::AUTHORIZATION, bearer("not-a-real-token"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
