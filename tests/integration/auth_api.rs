//! Integration tests for login and token gating over real HTTP.
//!
//! Verification command: `cargo test --test auth_api`

use std::sync::Arc;

use reqwest::StatusCode;
use todo_proto::auth::{LoginRequest, TokenPair};
use todo_proto::envelope::{Envelope, ResponseCode};
use todo_proto::task::Task;
use todo_server::auth::TokenAuthority;
use todo_server::server::{AppState, start_server, start_server_with_state};

/// Starts a server with default credentials on a random port.
async fn start() -> String {
    let (addr, _handle) = start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    format!("http://{addr}")
}

async fn login(
    client: &reqwest::Client,
    base: &str,
    request: &LoginRequest,
) -> (StatusCode, Envelope<TokenPair>) {
    let response = client
        .post(format!("{base}/api/v1/auth/login"))
        .json(request)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn login_then_access_tasks() {
    let base = start().await;
    let client = reqwest::Client::new();

    let (status, envelope) = login(&client, &base, &LoginRequest::new("admin", "admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.code, ResponseCode::Ok);
    let tokens = envelope.response.unwrap();

    let response = client
        .get(format!("{base}/api/v1/task"))
        .header("Authorization", tokens.bearer())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: Envelope<Vec<Task>> = response.json().await.unwrap();
    assert_eq!(envelope.response, Some(vec![]));
}

#[tokio::test]
async fn bare_token_without_bearer_prefix_is_accepted() {
    let base = start().await;
    let client = reqwest::Client::new();
    let (_, envelope) = login(&client, &base, &LoginRequest::new("admin", "admin")).await;
    let tokens = envelope.response.unwrap();

    let response = client
        .get(format!("{base}/api/v1/label"))
        .header("Authorization", tokens.auth_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_credentials_rejected() {
    let base = start().await;
    let client = reqwest::Client::new();

    let (status, envelope) = login(&client, &base, &LoginRequest::new("admin", "wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope.code, ResponseCode::Unauthorized);
    assert!(envelope.response.is_none());
    assert_eq!(envelope.error_message.as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn configured_credentials_are_used() {
    let state = Arc::new(AppState::new(Arc::new(TokenAuthority::new("ana", "s3cret"))));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state).await.unwrap();
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let (status, _) = login(&client, &base, &LoginRequest::new("admin", "admin")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&client, &base, &LoginRequest::new("ana", "s3cret")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_authorization_header_is_invalid_token() {
    let base = start().await;
    let response = reqwest::Client::new()
        .get(format!("{base}/api/v1/task"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope: Envelope<Vec<Task>> = response.json().await.unwrap();
    assert_eq!(envelope.code, ResponseCode::Unauthorized);
    assert_eq!(envelope.error_message.as_deref(), Some("Invalid token"));
}

#[tokio::test]
async fn tokens_are_not_shared_across_servers() {
    let first = start().await;
    let second = start().await;
    let client = reqwest::Client::new();
    let (_, envelope) = login(&client, &first, &LoginRequest::new("admin", "admin")).await;
    let tokens = envelope.response.unwrap();

    let response = client
        .get(format!("{second}/api/v1/task"))
        .header("Authorization", tokens.bearer())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_needs_no_token() {
    let base = start().await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let base = start().await;
    let response = reqwest::Client::new()
        .get(format!("{base}/health"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
