use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::services::organizer::{self, CreateEventRequest};
use crate::state::AppState;
use crate::utils::response::{created, empty_success, success};
use crate::utils::{ApiJson, ApiPath, AppResult};

pub async fn list_my_events(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Response> {
    let events = organizer::list_my_events(state.store.as_ref(), user.id).await?;
    Ok(success(events, "Your events"))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> AppResult<Response> {
    let event = organizer::create_event(state.store.as_ref(), user.id, request).await?;
    Ok(created(event, "Event created"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(event_id): ApiPath<Uuid>,
) -> AppResult<Response> {
    organizer::delete_event(state.store.as_ref(), user.id, event_id).await?;
    Ok(empty_success("Event deleted"))
}
