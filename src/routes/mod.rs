//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! authentication, the three cricket record collections, and health checks.

mod auth_routes;
mod health_routes;
mod match_routes;
mod player_routes;
mod team_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::CorsLayer;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers. CORS is wide open —
/// the browser client is served from a different origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes::routes())
        .merge(player_routes::routes())
        .merge(team_routes::routes())
        .merge(match_routes::routes())
        .merge(health_routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
