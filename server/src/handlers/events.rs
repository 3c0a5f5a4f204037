use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::models::KNOWN_CATEGORIES;
use crate::services::booking::{self, BookingRequest};
use crate::services::catalog::{self, EventFilter};
use crate::state::AppState;
use crate::utils::response::{created, success};
use crate::utils::{ApiJson, ApiPath, ApiQuery, AppError, AppResult};

pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> AppResult<Response> {
    let events = catalog::list_events(state.store.as_ref(), &filter).await?;
    let message = format!("{} events found", events.len());
    Ok(success(events, message))
}

pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> AppResult<Response> {
    let event = catalog::get_event(state.store.as_ref(), event_id).await?;
    Ok(success(event, "Event loaded"))
}

pub async fn list_categories() -> Response {
    success(KNOWN_CATEGORIES, "Categories loaded")
}

pub async fn track_view(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(event_id): ApiPath<Uuid>,
) -> AppResult<Response> {
    let preferences =
        catalog::track_event_view(state.store.as_ref(), user.id, event_id, Utc::now()).await?;
    Ok(success(preferences, "View recorded"))
}

pub async fn book_tickets(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    ApiPath(event_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<BookingRequest>,
) -> AppResult<Response> {
    let user =
        user.ok_or_else(|| AppError::AuthError("Please sign in to book tickets".to_string()))?;
    let receipt =
        booking::book_tickets(state.store.as_ref(), user.id, event_id, request.tickets).await?;
    Ok(created(receipt, "Booking confirmed"))
}
