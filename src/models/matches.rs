use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::http_helpers::{require_non_empty, Validate};

/// Lifecycle state of a match. Unknown values are rejected at the
/// validation boundary rather than stored as free text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Live,
    #[default]
    Upcoming,
    Completed,
}

impl MatchStatus {
    /// Storage representation, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Live => "live",
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Completed => "completed",
        }
    }
}

/// A match record between two teams. Team names are free text, not
/// references to team records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Validate for Match {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&[
            ("team1", &self.team1),
            ("team2", &self.team2),
            ("venue", &self.venue),
        ])
    }
}

/// Partial update for a match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPatch {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub status: Option<MatchStatus>,
    pub result: Option<String>,
}

impl MatchPatch {
    pub fn apply(&self, fixture: &mut Match) {
        if let Some(team1) = &self.team1 {
            fixture.team1 = team1.clone();
        }
        if let Some(team2) = &self.team2 {
            fixture.team2 = team2.clone();
        }
        if let Some(venue) = &self.venue {
            fixture.venue = venue.clone();
        }
        if let Some(date) = self.date {
            fixture.date = date;
        }
        if let Some(time) = &self.time {
            fixture.time = Some(time.clone());
        }
        if let Some(status) = self.status {
            fixture.status = status;
        }
        if let Some(result) = &self.result {
            fixture.result = Some(result.clone());
        }
    }
}

impl Validate for MatchPatch {
    fn validate(&self) -> Result<(), String> {
        let mut fields = Vec::new();
        if let Some(team1) = &self.team1 {
            fields.push(("team1", team1.as_str()));
        }
        if let Some(team2) = &self.team2 {
            fields.push(("team2", team2.as_str()));
        }
        if let Some(venue) = &self.venue {
            fields.push(("venue", venue.as_str()));
        }
        require_non_empty(&fields)
    }
}
