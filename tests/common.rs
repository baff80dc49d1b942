use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use crichub::auth::tokens::TokenIssuer;
use crichub::config::{Config, ConfigV1};
use crichub::routes::create_router;
use crichub::state::AppState;
use crichub::store::memory_store::MemoryStore;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
store:
  type: "memory"
jwt:
  iss: crichub-test
  exp: 86400
  secret: test-secret
bind_address: 127.0.0.1:8081
"#;

pub fn load_test_config() -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(TEST_CONFIG))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

/// Build the full router over a fresh in-memory store. The store handle is
/// returned so tests can reach into storage directly (e.g. to promote a
/// user to admin the way an operator would).
pub fn build_app() -> (Router, Arc<MemoryStore>, Arc<ConfigV1>) {
    let config = Arc::new(load_test_config());
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenIssuer::new(config.jwt.clone()));

    let state = AppState {
        config: config.clone(),
        tokens,
        store: store.clone(),
    };

    (create_router(state), store, config)
}

pub fn json_request(method: Method, path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn authed_json_request(
    method: Method,
    path: &str,
    token: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn authed_request(method: Method, path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn bare_request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> StatusCode {
    let body = serde_json::json!({ "name": name, "email": email, "password": password });
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/auth/register", &body))
        .await
        .expect("register request should complete");
    response.status()
}

/// Log in and return the response status plus parsed JSON body.
pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/auth/login", &body))
        .await
        .expect("login request should complete");
    let status = response.status();
    (status, read_json(response).await)
}

/// Register an account, promote it to admin directly in storage, and log
/// in again for a token that passes the authorization gate.
pub async fn admin_token(app: &Router, store: &MemoryStore) -> String {
    let status = register(app, "Admin", "admin@example.com", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(store.set_admin("admin@example.com", true));

    let (status, body) = login(app, "admin@example.com", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token in response").to_string()
}
