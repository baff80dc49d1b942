use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use super::{memory_store::MemoryStore, mongodb_store::MongoDBStore};
use crate::config::StoreConfig;
use crate::models::{Match, MatchPatch, Player, PlayerPatch, Team, TeamPatch, User};

/// Failures surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. duplicate email).
    /// Concurrent registrations of the same email rely on this to reject
    /// the loser deterministically.
    #[error("duplicate key: {0}")]
    Duplicate(String),
    /// Anything else the backend reports.
    #[error("{0}")]
    Backend(String),
}

/// The Store trait abstracts the document database: identity records plus
/// the three independent cricket collections. Single-record operations
/// only — the system needs no multi-document transactions.
///
/// Update operations take a patch whose present fields overwrite and whose
/// absent fields are retained; they return the post-update record, or
/// `None` when the id does not resolve. Deletes report whether a record
/// was actually removed so callers can surface not-found explicitly.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new identity, returning the stored record with its id.
    async fn insert_user(&self, user: &User) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All players, newest first.
    async fn list_players(&self) -> Result<Vec<Player>, StoreError>;
    async fn insert_player(&self, player: &Player) -> Result<Player, StoreError>;
    async fn update_player(
        &self,
        id: &str,
        patch: &PlayerPatch,
    ) -> Result<Option<Player>, StoreError>;
    async fn delete_player(&self, id: &str) -> Result<bool, StoreError>;

    /// All teams, best ranking first.
    async fn list_teams(&self) -> Result<Vec<Team>, StoreError>;
    async fn insert_team(&self, team: &Team) -> Result<Team, StoreError>;
    async fn update_team(&self, id: &str, patch: &TeamPatch) -> Result<Option<Team>, StoreError>;
    async fn delete_team(&self, id: &str) -> Result<bool, StoreError>;

    /// All matches in chronological order.
    async fn list_matches(&self) -> Result<Vec<Match>, StoreError>;
    async fn insert_match(&self, fixture: &Match) -> Result<Match, StoreError>;
    async fn update_match(&self, id: &str, patch: &MatchPatch)
        -> Result<Option<Match>, StoreError>;
    async fn delete_match(&self, id: &str) -> Result<bool, StoreError>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub async fn create_store(config: &StoreConfig) -> Arc<dyn Store> {
    match config {
        StoreConfig::MongoDB(mongo_config) => match MongoDBStore::new(mongo_config).await {
            Ok(store) => {
                info!("Successfully created MongoDB store.");
                Arc::new(store)
            }
            Err(e) => {
                error!("Failed to create MongoDB store: {}", e);
                std::process::exit(1);
            }
        },
        StoreConfig::Memory => {
            info!("Using in-memory store.");
            Arc::new(MemoryStore::new())
        }
    }
}
