use chrono::{DateTime, Utc};
use serde::Serialize;

/// An identity record: someone who can register, log in, and (if flagged
/// as admin) mutate the cricket records.
///
/// The password hash never leaves the process: API responses only ever see
/// the [`UserProfile`] projection.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned id, hex-encoded. None until the record is inserted.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Construct a new, not-yet-persisted user. Admin rights are never
    /// granted at registration; the flag is flipped directly in storage.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        User {
            id: None,
            name,
            email,
            password_hash,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// The shape of a user as exposed over the API.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Public projection of a [`User`], returned from login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}
