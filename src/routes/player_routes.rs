//! Player endpoints: public listing, admin-gated mutations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, put},
    Json, Router,
};

use crate::auth::AdminUser;
use crate::models::{Player, PlayerPatch};
use crate::state::AppState;
use crate::utils::http_helpers::{ApiError, MessageResponse, ValidatedJson};

/// Registers player routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/players/{id}", put(update_player).delete(delete_player))
}

/// All players, newest first. No authentication required.
async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(state.store.list_players().await?))
}

/// Creates a player and echoes back the stored record with its id.
async fn create_player(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(player): ValidatedJson<Player>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let created = state.store.insert_player(&player).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update: fields present in the body overwrite, the rest are
/// retained. Unknown ids are a 404, not a silent success.
async fn update_player(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<PlayerPatch>,
) -> Result<Json<Player>, ApiError> {
    let updated = state
        .store
        .update_player(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Player"))?;
    Ok(Json(updated))
}

async fn delete_player(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_player(&id).await? {
        return Err(ApiError::NotFound("Player"));
    }
    Ok(Json(MessageResponse::new("Player deleted successfully")))
}
