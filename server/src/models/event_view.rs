use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub viewed_at: DateTime<Utc>,
}
