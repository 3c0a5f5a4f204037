//! Record persistence for events, bookings, profiles and preference signals.
//!
//! Services only talk to the [`Store`] trait. [`PgStore`] backs the running
//! server; [`MemoryStore`] keeps everything in process for tests and local
//! experiments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Booking, Event, EventView, NewBooking, NewEvent, Profile, UserPreferences,
};
use crate::utils::AppResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    #[default]
    DateAscending,
    DateDescending,
    /// Featured events first, then by date ascending.
    FeaturedFirst,
}

/// Filter, sort and limit for an event read.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub organizer_id: Option<Uuid>,
    /// Only events whose date is at or after this instant.
    pub starting_from: Option<DateTime<Utc>>,
    /// Only events in one of these categories.
    pub categories: Option<Vec<String>>,
    pub order: EventOrder,
    pub limit: Option<i64>,
}

impl EventQuery {
    pub fn organized_by(mut self, organizer_id: Uuid) -> Self {
        self.organizer_id = Some(organizer_id);
        self
    }

    pub fn starting_from(mut self, at: DateTime<Utc>) -> Self {
        self.starting_from = Some(at);
        self
    }

    pub fn in_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn order_by(mut self, order: EventOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, event: &Event) -> bool {
        self.organizer_id
            .map_or(true, |organizer| event.organizer_id == Some(organizer))
            && self.starting_from.map_or(true, |at| event.date >= at)
            && self
                .categories
                .as_ref()
                .map_or(true, |categories| categories.contains(&event.category))
    }
}

/// Result of a successful seat reservation: the stored booking and the event
/// with its decremented seat count.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub booking: Booking,
    pub event: Event,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_events(&self, query: &EventQuery) -> AppResult<Vec<Event>>;

    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>>;

    async fn get_events(&self, ids: &[Uuid]) -> AppResult<Vec<Event>>;

    async fn insert_event(&self, event: NewEvent) -> AppResult<Event>;

    /// Removes the event with its bookings and views. Returns whether it existed.
    async fn delete_event(&self, id: Uuid) -> AppResult<bool>;

    /// Decrements the event's seats and records the booking as one unit.
    ///
    /// Fails with `InsufficientSeats` and writes nothing when fewer than
    /// `booking.tickets` seats remain at the moment of the write.
    async fn reserve_seats(&self, booking: NewBooking) -> AppResult<Reservation>;

    /// Bookings of a user, newest first.
    async fn list_bookings_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>>;

    async fn get_profile(&self, id: Uuid) -> AppResult<Option<Profile>>;

    /// Inserts the profile unless one already exists, returning the stored row.
    async fn insert_profile(&self, profile: Profile) -> AppResult<Profile>;

    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<UserPreferences>>;

    /// Inserts or replaces the preferences keyed by `user_id`.
    async fn save_preferences(&self, preferences: UserPreferences) -> AppResult<UserPreferences>;

    async fn insert_event_view(&self, user_id: Uuid, event_id: Uuid) -> AppResult<EventView>;
}
