use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{events, health_check, me, organizer};
use crate::state::AppState;

/// API routes without the browser-facing middleware.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/categories", get(events::list_categories))
        .route("/api/events", get(events::list_events))
        .route("/api/events/:id", get(events::get_event))
        .route("/api/events/:id/views", post(events::track_view))
        .route("/api/events/:id/bookings", post(events::book_tickets))
        .route("/api/me", get(me::get_profile))
        .route("/api/me/bookings", get(me::list_bookings))
        .route("/api/me/recommendations", get(me::recommendations))
        .route(
            "/api/organizer/events",
            get(organizer::list_my_events).post(organizer::create_event),
        )
        .route("/api/organizer/events/:id", delete(organizer::delete_event))
        .with_state(state)
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    api_routes(state)
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
