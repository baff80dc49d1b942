//! Team endpoints: public listing, admin-gated mutations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, put},
    Json, Router,
};

use crate::auth::AdminUser;
use crate::models::{Team, TeamPatch};
use crate::state::AppState;
use crate::utils::http_helpers::{ApiError, MessageResponse, ValidatedJson};

/// Registers team routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/teams", get(list_teams).post(create_team))
        .route("/api/teams/{id}", put(update_team).delete(delete_team))
}

/// All teams, best ranking first. No authentication required.
async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(state.store.list_teams().await?))
}

async fn create_team(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(team): ValidatedJson<Team>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let created = state.store.insert_team(&team).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_team(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<TeamPatch>,
) -> Result<Json<Team>, ApiError> {
    let updated = state
        .store
        .update_team(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Team"))?;
    Ok(Json(updated))
}

async fn delete_team(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_team(&id).await? {
        return Err(ApiError::NotFound("Team"));
    }
    Ok(Json(MessageResponse::new("Team deleted successfully")))
}
