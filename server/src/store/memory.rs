use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{EventOrder, EventQuery, Reservation, Store};
use crate::models::{
    Booking, Event, EventView, NewBooking, NewEvent, Profile, UserPreferences,
};
use crate::utils::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    events: HashMap<Uuid, Event>,
    bookings: Vec<Booking>,
    profiles: HashMap<Uuid, Profile>,
    preferences: HashMap<Uuid, UserPreferences>,
    event_views: Vec<EventView>,
}

/// In-process store. A single lock guards all tables, so every operation,
/// including seat reservation, is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full event view log, oldest first.
    pub async fn event_views(&self) -> Vec<EventView> {
        self.tables.lock().await.event_views.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_events(&self, query: &EventQuery) -> AppResult<Vec<Event>> {
        let tables = self.tables.lock().await;
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|event| query.matches(event))
            .cloned()
            .collect();

        match query.order {
            EventOrder::DateAscending => events.sort_by_key(|event| event.date),
            EventOrder::DateDescending => {
                events.sort_by_key(|event| std::cmp::Reverse(event.date))
            }
            EventOrder::FeaturedFirst => {
                events.sort_by_key(|event| (!event.is_featured, event.date))
            }
        }

        if let Some(limit) = query.limit {
            events.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        Ok(self.tables.lock().await.events.get(&id).cloned())
    }

    async fn get_events(&self, ids: &[Uuid]) -> AppResult<Vec<Event>> {
        let tables = self.tables.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.events.get(id).cloned())
            .collect())
    }

    async fn insert_event(&self, event: NewEvent) -> AppResult<Event> {
        let event = event.into_event(Uuid::new_v4(), Utc::now());
        self.tables
            .lock()
            .await
            .events
            .insert(event.id, event.clone());
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.events.remove(&id).is_none() {
            return Ok(false);
        }
        tables.bookings.retain(|booking| booking.event_id != id);
        tables.event_views.retain(|view| view.event_id != id);
        Ok(true)
    }

    async fn reserve_seats(&self, booking: NewBooking) -> AppResult<Reservation> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let event = tables
            .events
            .get_mut(&booking.event_id)
            .ok_or_else(|| AppError::event_not_found(booking.event_id))?;

        if event.available_seats < booking.tickets {
            return Err(AppError::InsufficientSeats {
                requested: booking.tickets,
                available: event.available_seats,
            });
        }

        let total_amount = event.total_for(booking.tickets).ok_or_else(|| {
            AppError::InternalServerError("booking total overflowed".to_string())
        })?;

        event.available_seats -= booking.tickets;
        event.updated_at = now;
        let event = event.clone();

        let record = booking.into_booking(total_amount, Uuid::new_v4(), now);
        tables.bookings.push(record.clone());

        Ok(Reservation {
            booking: record,
            event,
        })
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        // Insertion order breaks ties between equal timestamps.
        bookings.reverse();
        bookings.sort_by_key(|booking| std::cmp::Reverse(booking.created_at));
        Ok(bookings)
    }

    async fn get_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.tables.lock().await.profiles.get(&id).cloned())
    }

    async fn insert_profile(&self, profile: Profile) -> AppResult<Profile> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .profiles
            .entry(profile.id)
            .or_insert(profile)
            .clone())
    }

    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<UserPreferences>> {
        Ok(self.tables.lock().await.preferences.get(&user_id).cloned())
    }

    async fn save_preferences(&self, preferences: UserPreferences) -> AppResult<UserPreferences> {
        let mut tables = self.tables.lock().await;
        let stored = match tables.preferences.get(&preferences.user_id) {
            // Keep the identity of the existing row, as an upsert would.
            Some(existing) => UserPreferences {
                id: existing.id,
                created_at: existing.created_at,
                ..preferences
            },
            None => preferences,
        };
        tables.preferences.insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn insert_event_view(&self, user_id: Uuid, event_id: Uuid) -> AppResult<EventView> {
        let view = EventView {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            viewed_at: Utc::now(),
        };
        self.tables.lock().await.event_views.push(view.clone());
        Ok(view)
    }
}
