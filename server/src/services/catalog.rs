//! Browsing the event catalog: search and filtering over the loaded event
//! list, and recording which events a user looks at.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::preferences::DEFAULT_PRICE_RANGE_MAX;
use crate::models::{Event, UserPreferences};
use crate::store::{EventQuery, Store};
use crate::utils::{AppError, AppResult};

/// Matches every category or city.
pub const WILDCARD: &str = "All";

/// Search and filter parameters, as accepted on the listing query string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    #[serde(rename = "q")]
    pub query: String,
    pub category: String,
    pub city: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: WILDCARD.to_string(),
            city: WILDCARD.to_string(),
            min_price: Decimal::ZERO,
            max_price: Decimal::from(DEFAULT_PRICE_RANGE_MAX),
        }
    }
}

impl EventFilter {
    /// True when the event satisfies every predicate of the filter.
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_query(event)
            && matches_exact(&self.category, &event.category)
            && matches_exact(&self.city, &event.city)
            && event.price >= self.min_price
            && event.price <= self.max_price
    }

    fn matches_query(&self, event: &Event) -> bool {
        let needle = self.query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&event.title, &event.description, &event.location, &event.city]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn matches_exact(selected: &str, value: &str) -> bool {
    selected == WILDCARD || selected == value
}

/// Events from `events` that pass `filter`, keeping their input order.
pub fn filter_events(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}

/// Loads the whole catalog by date and applies `filter` to it.
pub async fn list_events(store: &dyn Store, filter: &EventFilter) -> AppResult<Vec<Event>> {
    let events = store.list_events(&EventQuery::default()).await?;
    let filtered = filter_events(&events, filter);
    tracing::debug!(total = events.len(), matched = filtered.len(), "Filtered events");
    Ok(filtered)
}

pub async fn get_event(store: &dyn Store, event_id: Uuid) -> AppResult<Event> {
    store
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::event_not_found(event_id))
}

/// Logs a view of the event and folds its category and city into the
/// user's preference window.
///
/// The preference update is a read followed by a write, so two views by the
/// same user landing at once can each miss the other's increment of
/// `interaction_count`. The view rows themselves are always recorded.
pub async fn track_event_view(
    store: &dyn Store,
    user_id: Uuid,
    event_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<UserPreferences> {
    let event = get_event(store, event_id).await?;
    store.insert_event_view(user_id, event_id).await?;

    let preferences = match store.get_preferences(user_id).await? {
        Some(mut preferences) => {
            preferences.record_interaction(&event.category, &event.city, now);
            preferences
        }
        None => UserPreferences::first_interaction(user_id, &event.category, &event.city, now),
    };

    let saved = store.save_preferences(preferences).await?;
    tracing::info!(
        %user_id,
        %event_id,
        interactions = saved.interaction_count,
        "Tracked event view"
    );
    Ok(saved)
}
