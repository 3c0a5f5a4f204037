use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Blank profile for an identity seen for the first time.
    pub fn from_identity(id: Uuid, email: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            full_name: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
