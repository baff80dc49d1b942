//! Authentication endpoint handlers: registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password;
use crate::models::{User, UserProfile};
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::http_helpers::{
    require_non_empty, ApiError, MessageResponse, Validate, ValidatedJson,
};

/// Registers authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&[
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ])
    }
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&[("email", &self.email), ("password", &self.password)])
    }
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

/// Creates a new (non-admin) identity from name, email, and password.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if state.store.find_user_by_email(&body.email).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    let digest = password::hash(&body.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
    let user = User::new(body.name, body.email, digest);

    // The store's unique index backstops the pre-check above: the loser
    // of a concurrent registration race ends up here.
    match state.store.insert_user(&user).await {
        Ok(stored) => {
            info!("Registered user '{}'", stored.email);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("User registered successfully")),
            ))
        }
        Err(StoreError::Duplicate(_)) => Err(ApiError::UserExists),
        Err(e) => Err(e.into()),
    }
}

/// Checks credentials and mints a bearer token for the session.
///
/// Unknown email and wrong password produce the same response so callers
/// cannot enumerate registered addresses.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .find_user_by_email(&body.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify(&body.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let subject = user.id.clone().unwrap_or_default();
    let token = state.tokens.issue(&subject, user.is_admin);
    info!("User '{}' logged in", user.email);

    Ok(Json(LoginResponse {
        token,
        user: user.profile(),
    }))
}
