use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::http_helpers::{require_non_empty, Validate};

/// A cricket player record.
///
/// Doubles as the POST body and the response shape: the id and creation
/// time are filled in server-side, stat counters default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub name: String,
    pub team: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub batting_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bowling_style: Option<String>,
    #[serde(default)]
    pub runs: i64,
    #[serde(default)]
    pub wickets: i64,
    #[serde(default)]
    pub matches: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Validate for Player {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&[
            ("name", &self.name),
            ("team", &self.team),
            ("role", &self.role),
        ])
    }
}

/// Partial update for a player: present fields overwrite, absent fields
/// are retained.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub team: Option<String>,
    pub role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub matches: Option<i64>,
    pub image: Option<String>,
}

impl PlayerPatch {
    /// Apply the patch in place. Used by the in-memory store; the MongoDB
    /// store translates the same semantics into a `$set` document.
    pub fn apply(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name = name.clone();
        }
        if let Some(team) = &self.team {
            player.team = team.clone();
        }
        if let Some(role) = &self.role {
            player.role = role.clone();
        }
        if let Some(batting_style) = &self.batting_style {
            player.batting_style = Some(batting_style.clone());
        }
        if let Some(bowling_style) = &self.bowling_style {
            player.bowling_style = Some(bowling_style.clone());
        }
        if let Some(runs) = self.runs {
            player.runs = runs;
        }
        if let Some(wickets) = self.wickets {
            player.wickets = wickets;
        }
        if let Some(matches) = self.matches {
            player.matches = matches;
        }
        if let Some(image) = &self.image {
            player.image = Some(image.clone());
        }
    }
}

impl Validate for PlayerPatch {
    fn validate(&self) -> Result<(), String> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.as_str()));
        }
        if let Some(team) = &self.team {
            fields.push(("team", team.as_str()));
        }
        if let Some(role) = &self.role {
            fields.push(("role", role.as_str()));
        }
        require_non_empty(&fields)
    }
}
