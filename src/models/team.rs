use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::http_helpers::{require_non_empty, Validate};

/// A team record. `ranking` is required on creation; the win/loss/points
/// counters default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub name: String,
    pub ranking: i64,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flag: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Validate for Team {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&[("name", &self.name)])
    }
}

/// Partial update for a team.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPatch {
    pub name: Option<String>,
    pub ranking: Option<i64>,
    pub points: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub flag: Option<String>,
}

impl TeamPatch {
    pub fn apply(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(ranking) = self.ranking {
            team.ranking = ranking;
        }
        if let Some(points) = self.points {
            team.points = points;
        }
        if let Some(wins) = self.wins {
            team.wins = wins;
        }
        if let Some(losses) = self.losses {
            team.losses = losses;
        }
        if let Some(flag) = &self.flag {
            team.flag = Some(flag.clone());
        }
    }
}

impl Validate for TeamPatch {
    fn validate(&self) -> Result<(), String> {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", name.as_str()));
        }
        require_non_empty(&fields)
    }
}
