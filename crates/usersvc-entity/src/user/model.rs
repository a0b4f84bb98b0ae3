//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Inactive users cannot authenticate.
    pub active: bool,
    /// Base64 password salt, stored apart from the hash.
    #[serde(skip_serializing)]
    pub salt: String,
    /// Base64 Argon2id password hash.
    #[serde(skip_serializing)]
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.active
    }
}
