//! Events as seen by the organizer who owns them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::event::is_known_category;
use crate::models::{Event, NewEvent, KNOWN_CATEGORIES};
use crate::store::{EventOrder, EventQuery, Store};
use crate::utils::{AppError, AppResult};

/// Event form as submitted by an organizer. Tags arrive comma separated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub city: String,
    pub price: Decimal,
    pub capacity: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: String,
}

impl CreateEventRequest {
    fn into_new_event(self, organizer_id: Uuid) -> AppResult<NewEvent> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let location = required("location", &self.location)?;
        let city = required("city", &self.city)?;

        if !is_known_category(&self.category) {
            return Err(AppError::ValidationError(format!(
                "Unknown category '{}', expected one of {}",
                self.category,
                KNOWN_CATEGORIES.join(", ")
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "price must not be negative".to_string(),
            ));
        }
        if self.capacity < 1 {
            return Err(AppError::ValidationError(
                "capacity must be at least 1".to_string(),
            ));
        }

        Ok(NewEvent {
            title,
            description,
            category: self.category,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            date: self.date,
            location,
            city,
            price: self.price,
            capacity: self.capacity,
            organizer_id: Some(organizer_id),
            is_featured: self.is_featured,
            tags: parse_tags(&self.tags),
        })
    }
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Splits a comma separated tag list, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn create_event(
    store: &dyn Store,
    organizer_id: Uuid,
    request: CreateEventRequest,
) -> AppResult<Event> {
    let new_event = request.into_new_event(organizer_id)?;
    let event = store.insert_event(new_event).await?;
    tracing::info!(event_id = %event.id, %organizer_id, title = %event.title, "Event created");
    Ok(event)
}

/// The organizer's events, latest date first.
pub async fn list_my_events(store: &dyn Store, organizer_id: Uuid) -> AppResult<Vec<Event>> {
    let query = EventQuery::default()
        .organized_by(organizer_id)
        .order_by(EventOrder::DateDescending);
    store.list_events(&query).await
}

pub async fn delete_event(store: &dyn Store, organizer_id: Uuid, event_id: Uuid) -> AppResult<()> {
    let event = store
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::event_not_found(event_id))?;

    if !event.is_owned_by(organizer_id) {
        return Err(AppError::Forbidden(
            "Only the organizer of an event can delete it".to_string(),
        ));
    }

    if !store.delete_event(event_id).await? {
        return Err(AppError::event_not_found(event_id));
    }
    tracing::info!(%event_id, %organizer_id, "Event deleted");
    Ok(())
}
