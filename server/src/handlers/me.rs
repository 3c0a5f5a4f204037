use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

use crate::auth::CurrentUser;
use crate::services::{booking, profile, recommendation};
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::AppResult;

pub async fn get_profile(State(state): State<AppState>, user: CurrentUser) -> AppResult<Response> {
    let profile = profile::get_or_create_profile(state.store.as_ref(), &user).await?;
    Ok(success(profile, "Profile loaded"))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Response> {
    let history = booking::booking_history(state.store.as_ref(), user.id, Utc::now()).await?;
    Ok(success(history, "Bookings loaded"))
}

pub async fn recommendations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Response> {
    let events =
        recommendation::recommend_events(state.store.as_ref(), user.id, Utc::now()).await?;
    Ok(success(events, "Recommended for you"))
}
