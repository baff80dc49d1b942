pub mod matches;
pub mod player;
pub mod team;
pub mod user;

// Re-export the record types so code outside can do "use crate::models::Player;"
pub use matches::{Match, MatchPatch, MatchStatus};
pub use player::{Player, PlayerPatch};
pub use team::{Team, TeamPatch};
pub use user::{User, UserProfile};
