//! Match endpoints: public listing, admin-gated mutations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, put},
    Json, Router,
};

use crate::auth::AdminUser;
use crate::models::{Match, MatchPatch};
use crate::state::AppState;
use crate::utils::http_helpers::{ApiError, MessageResponse, ValidatedJson};

/// Registers match routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/matches", get(list_matches).post(create_match))
        .route("/api/matches/{id}", put(update_match).delete(delete_match))
}

/// All matches in chronological order. No authentication required.
async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<Match>>, ApiError> {
    Ok(Json(state.store.list_matches().await?))
}

async fn create_match(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(fixture): ValidatedJson<Match>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let created = state.store.insert_match(&fixture).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_match(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<MatchPatch>,
) -> Result<Json<Match>, ApiError> {
    let updated = state
        .store
        .update_match(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Match"))?;
    Ok(Json(updated))
}

async fn delete_match(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_match(&id).await? {
        return Err(ApiError::NotFound("Match"));
    }
    Ok(Json(MessageResponse::new("Match deleted successfully")))
}
