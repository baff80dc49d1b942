mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_then_duplicate_email() {
    let (app, _store, _config) = build_app();

    let status = register(&app, "Virat", "virat@example.com", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);

    // Same email again, even under a different name.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            &json!({ "name": "Impostor", "email": "virat@example.com", "password": "other" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn register_rejects_missing_and_empty_fields() {
    let (app, _store, _config) = build_app();

    // Missing password entirely.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            &json!({ "name": "Virat", "email": "virat@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Present but empty.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            &json!({ "name": "Virat", "email": "virat@example.com", "password": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    let (app, _store, _config) = build_app();
    register(&app, "Virat", "virat@example.com", "secret123").await;

    let (status, body) = login(&app, "virat@example.com", "secret123").await;
    assert_eq!(status, StatusCode::OK);

    assert!(!body["token"].as_str().unwrap().is_empty());
    let user = body["user"].as_object().unwrap();
    assert_eq!(user["name"], "Virat");
    assert_eq!(user["email"], "virat@example.com");
    assert_eq!(user["isAdmin"], false);
    assert!(!user["id"].as_str().unwrap().is_empty());
    assert!(
        !user.contains_key("password") && !user.contains_key("passwordHash"),
        "login response must not leak the password digest"
    );
}

/// Wrong password and unknown email produce byte-identical responses so
/// the login endpoint cannot be used to enumerate accounts.
#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _store, _config) = build_app();
    register(&app, "Virat", "virat@example.com", "secret123").await;

    let (wrong_pw_status, wrong_pw_body) =
        login(&app, "virat@example.com", "wrong-password").await;
    let (unknown_status, unknown_body) = login(&app, "nobody@example.com", "secret123").await;

    assert_eq!(wrong_pw_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_pw_body, unknown_body);
    assert_eq!(wrong_pw_body["message"], "Invalid credentials");
}

#[tokio::test]
async fn mutation_without_token_is_unauthenticated() {
    let (app, _store, _config) = build_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/players",
            &json!({ "name": "Bumrah", "team": "India", "role": "Bowler" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutation_with_garbage_token_is_unauthenticated() {
    let (app, _store, _config) = build_app();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/players",
            "not-a-real-token",
            &json!({ "name": "Bumrah", "team": "India", "role": "Bowler" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The full promotion lifecycle: a fresh registration cannot write;
/// after promotion in storage and a fresh login, it can.
#[tokio::test]
async fn end_to_end_admin_promotion() {
    let (app, store, _config) = build_app();

    let status = register(&app, "Anjali", "anjali@example.com", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "anjali@example.com", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let new_player = json!({ "name": "Bumrah", "team": "India", "role": "Bowler" });

    // Authenticated but not an admin: the authorization gate rejects.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/players",
            &token,
            &new_player,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Admin access required");

    // Promote directly in storage; the old token still carries the old
    // flag, so a fresh login is required.
    assert!(store.set_admin("anjali@example.com", true));
    let (_, body) = login(&app, "anjali@example.com", "secret123").await;
    assert_eq!(body["user"]["isAdmin"], true);
    let admin_token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/players",
            &admin_token,
            &new_player,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["name"], "Bumrah");
    assert!(!created["_id"].as_str().unwrap().is_empty());
}

/// A pre-promotion token keeps its stale admin flag: stateless tokens are
/// not re-checked against storage.
#[tokio::test]
async fn stale_token_keeps_old_admin_flag() {
    let (app, store, _config) = build_app();
    register(&app, "Anjali", "anjali@example.com", "secret123").await;
    let (_, body) = login(&app, "anjali@example.com", "secret123").await;
    let old_token = body["token"].as_str().unwrap().to_string();

    store.set_admin("anjali@example.com", true);

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/players",
            &old_token,
            &json!({ "name": "Bumrah", "team": "India", "role": "Bowler" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
