use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Match, MatchPatch, Player, PlayerPatch, Team, TeamPatch, User};
use crate::store::{Store, StoreError};

/// An in-process store with the same semantics as the MongoDB backend:
/// email uniqueness, partial-field updates, and the per-kind sort orders.
/// Used for local runs and by the integration tests.
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    players: RwLock<HashMap<String, Player>>,
    teams: RwLock<HashMap<String, Team>>,
    matches: RwLock<HashMap<String, Match>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            users: RwLock::new(HashMap::new()),
            players: RwLock::new(HashMap::new()),
            teams: RwLock::new(HashMap::new()),
            matches: RwLock::new(HashMap::new()),
        }
    }

    /// Flip the admin flag on an existing identity, the way an operator
    /// would edit the document directly in the database. Returns false if
    /// the email is unknown.
    pub fn set_admin(&self, email: &str, is_admin: bool) -> bool {
        let mut users = self.users.write().expect("lock poisoned");
        for user in users.values_mut() {
            if user.email == email {
                user.is_admin = is_admin;
                return true;
            }
        }
        false
    }

    fn next_id() -> String {
        ObjectId::new().to_hex()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().expect("lock poisoned");
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "email '{}' already registered",
                user.email
            )));
        }
        let mut stored = user.clone();
        let id = Self::next_id();
        stored.id = Some(id.clone());
        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("lock poisoned");
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let players = self.players.read().expect("lock poisoned");
        let mut all: Vec<Player> = players.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn insert_player(&self, player: &Player) -> Result<Player, StoreError> {
        let mut players = self.players.write().expect("lock poisoned");
        let mut stored = player.clone();
        let id = Self::next_id();
        stored.id = Some(id.clone());
        players.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_player(
        &self,
        id: &str,
        patch: &PlayerPatch,
    ) -> Result<Option<Player>, StoreError> {
        let mut players = self.players.write().expect("lock poisoned");
        Ok(players.get_mut(id).map(|player| {
            patch.apply(player);
            player.clone()
        }))
    }

    async fn delete_player(&self, id: &str) -> Result<bool, StoreError> {
        let mut players = self.players.write().expect("lock poisoned");
        Ok(players.remove(id).is_some())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        let teams = self.teams.read().expect("lock poisoned");
        let mut all: Vec<Team> = teams.values().cloned().collect();
        all.sort_by_key(|team| team.ranking);
        Ok(all)
    }

    async fn insert_team(&self, team: &Team) -> Result<Team, StoreError> {
        let mut teams = self.teams.write().expect("lock poisoned");
        let mut stored = team.clone();
        let id = Self::next_id();
        stored.id = Some(id.clone());
        teams.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_team(&self, id: &str, patch: &TeamPatch) -> Result<Option<Team>, StoreError> {
        let mut teams = self.teams.write().expect("lock poisoned");
        Ok(teams.get_mut(id).map(|team| {
            patch.apply(team);
            team.clone()
        }))
    }

    async fn delete_team(&self, id: &str) -> Result<bool, StoreError> {
        let mut teams = self.teams.write().expect("lock poisoned");
        Ok(teams.remove(id).is_some())
    }

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches.read().expect("lock poisoned");
        let mut all: Vec<Match> = matches.values().cloned().collect();
        all.sort_by_key(|fixture| fixture.date);
        Ok(all)
    }

    async fn insert_match(&self, fixture: &Match) -> Result<Match, StoreError> {
        let mut matches = self.matches.write().expect("lock poisoned");
        let mut stored = fixture.clone();
        let id = Self::next_id();
        stored.id = Some(id.clone());
        matches.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_match(
        &self,
        id: &str,
        patch: &MatchPatch,
    ) -> Result<Option<Match>, StoreError> {
        let mut matches = self.matches.write().expect("lock poisoned");
        Ok(matches.get_mut(id).map(|fixture| {
            patch.apply(fixture);
            fixture.clone()
        }))
    }

    async fn delete_match(&self, id: &str) -> Result<bool, StoreError> {
        let mut matches = self.matches.write().expect("lock poisoned");
        Ok(matches.remove(id).is_some())
    }
}
