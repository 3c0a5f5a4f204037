use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Categories an organizer may file an event under.
pub const KNOWN_CATEGORIES: [&str; 6] = ["Music", "Tech", "Sports", "Arts", "Food", "Business"];

pub fn is_known_category(category: &str) -> bool {
    KNOWN_CATEGORIES.contains(&category)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub city: String,
    pub price: Decimal,
    pub capacity: i32,
    pub available_seats: i32,
    pub organizer_id: Option<Uuid>,
    pub is_featured: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.organizer_id == Some(user_id)
    }

    /// Price of `tickets` seats, `None` on decimal overflow.
    pub fn total_for(&self, tickets: i32) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(tickets))
    }
}

/// Validated input for a new event. Seats start at full capacity.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub city: String,
    pub price: Decimal,
    pub capacity: i32,
    pub organizer_id: Option<Uuid>,
    pub is_featured: bool,
    pub tags: Vec<String>,
}

impl NewEvent {
    pub fn into_event(self, id: Uuid, now: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            date: self.date,
            location: self.location,
            city: self.city,
            price: self.price,
            capacity: self.capacity,
            available_seats: self.capacity,
            organizer_id: self.organizer_id,
            is_featured: self.is_featured,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}
