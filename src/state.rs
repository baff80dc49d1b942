//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, the token issuer, and the record store.

use crate::auth::tokens::TokenIssuer;
use crate::config::ConfigV1;
use crate::store::Store;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration, token issuer, and record store.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Issues and verifies the bearer tokens that guard the write surface.
    pub tokens: Arc<TokenIssuer>,
    /// Document store holding identities and cricket records.
    pub store: Arc<dyn Store>,
}
