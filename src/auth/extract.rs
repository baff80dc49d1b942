//! Request gates for the protected write surface.
//!
//! Two composable extractors form the per-request chain:
//! `Unauthenticated -> (token present & valid) -> Authenticated ->
//! (admin flag) -> Authorized`. Handlers that take [`AdminUser`] only run
//! for requests that survive both gates; everything else is rejected
//! before the handler with 401 or 403. Failures are never retried — the
//! client must log in again to obtain a new token.

use axum::extract::FromRequestParts;
use http::request::Parts;
use tracing::debug;

use crate::state::AppState;
use crate::utils::http_helpers::ApiError;

/// The authentication gate: a verified bearer token, carrying the
/// subject id and admin flag into the handler.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub is_admin: bool,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        let pieces: Vec<&str> = auth_header.split_whitespace().collect();
        if pieces.len() != 2 || !pieces[0].eq_ignore_ascii_case("bearer") {
            debug!("Missing or non-Bearer Authorization header");
            return Err(ApiError::Unauthenticated);
        }

        match state.tokens.verify(pieces[1]) {
            Ok(claims) => Ok(AuthUser {
                subject: claims.sub,
                is_admin: claims.admin,
            }),
            Err(e) => {
                debug!("Token verification failed: {}", e);
                Err(ApiError::Unauthenticated)
            }
        }
    }
}

/// The authorization gate. Runs the authentication gate first — there is
/// no admin-only-but-unauthenticated path — then requires the admin flag.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            debug!("User '{}' is not an admin", user.subject);
            return Err(ApiError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::TokenIssuer;
    use crate::config::{ConfigV1, JwtConfig, LoggingConfig, StoreConfig};
    use crate::store::memory_store::MemoryStore;
    use axum::http::Request;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let jwt = JwtConfig {
            iss: "crichub-test".to_string(),
            exp: 3600,
            secret: "extract-test-secret".to_string(),
        };
        let config = ConfigV1 {
            store: StoreConfig::Memory,
            bind_address: "127.0.0.1:0".to_string(),
            jwt: jwt.clone(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "console".to_string(),
            },
        };
        AppState {
            config: Arc::new(config),
            tokens: Arc::new(TokenIssuer::new(jwt)),
            store: Arc::new(MemoryStore::new()),
        }
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/players");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let state = test_state();
        let mut parts = parts_with_header(None);
        let result = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthenticated() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        let result = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_valid_token_carries_subject_and_flag() {
        let state = test_state();
        let token = state.tokens.issue("user-9", true);
        let mut parts = parts_with_header(Some(&format!("Bearer {}", token)));

        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.subject, "user-9");
        assert!(user.is_admin);
    }

    /// The scheme comparison is case-insensitive, as for any auth scheme.
    #[tokio::test]
    async fn test_bearer_scheme_case_insensitive() {
        let state = test_state();
        let token = state.tokens.issue("user-9", false);
        let mut parts = parts_with_header(Some(&format!("bearer {}", token)));
        assert!(AuthUser::from_request_parts(&mut parts, &state)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_admin_gate_rejects_non_admin_with_forbidden() {
        let state = test_state();
        let token = state.tokens.issue("user-9", false);
        let mut parts = parts_with_header(Some(&format!("Bearer {}", token)));

        let result = AdminUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    /// The authentication gate wins over the authorization gate: a bad
    /// token is 401 even on an admin-only route.
    #[tokio::test]
    async fn test_admin_gate_runs_authentication_first() {
        let state = test_state();
        let mut parts = parts_with_header(Some("Bearer not-a-token"));
        let result = AdminUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_admin_gate_passes_admins() {
        let state = test_state();
        let token = state.tokens.issue("user-1", true);
        let mut parts = parts_with_header(Some(&format!("Bearer {}", token)));
        let AdminUser(user) = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.subject, "user-1");
    }
}
