//! Ticket booking and the user's booking history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Booking, BookingStats, BookingWithEvent, Event, NewBooking};
use crate::services::catalog::get_event;
use crate::store::Store;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub tickets: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingHistory {
    pub bookings: Vec<BookingWithEvent>,
    pub stats: BookingStats,
}

/// Books `tickets` seats on an event for the user.
///
/// The request is checked against the event as currently loaded before
/// anything is written; the store then re-checks and decrements the seats in
/// the same unit of work as the booking insert, so two racing requests can
/// never oversell the event.
pub async fn book_tickets(
    store: &dyn Store,
    user_id: Uuid,
    event_id: Uuid,
    tickets: i32,
) -> AppResult<BookingReceipt> {
    if tickets < 1 {
        return Err(AppError::ValidationError(
            "At least one ticket must be booked".to_string(),
        ));
    }

    let event = get_event(store, event_id).await?;
    if tickets > event.available_seats {
        return Err(AppError::InsufficientSeats {
            requested: tickets,
            available: event.available_seats,
        });
    }

    let reservation = store
        .reserve_seats(NewBooking {
            user_id,
            event_id,
            tickets,
        })
        .await?;

    tracing::info!(
        booking_id = %reservation.booking.id,
        %user_id,
        %event_id,
        tickets,
        total = %reservation.booking.total_amount,
        remaining = reservation.event.available_seats,
        "Booking confirmed"
    );

    Ok(BookingReceipt {
        booking: reservation.booking,
        event: reservation.event,
    })
}

/// The user's bookings, newest first, each with its event, plus totals.
pub async fn booking_history(
    store: &dyn Store,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<BookingHistory> {
    let bookings = store.list_bookings_for_user(user_id).await?;

    let mut event_ids: Vec<Uuid> = bookings.iter().map(|b| b.event_id).collect();
    event_ids.sort_unstable();
    event_ids.dedup();
    let events: HashMap<Uuid, Event> = store
        .get_events(&event_ids)
        .await?
        .into_iter()
        .map(|event| (event.id, event))
        .collect();

    let bookings: Vec<BookingWithEvent> = bookings
        .into_iter()
        .filter_map(|booking| {
            let event = events.get(&booking.event_id)?.clone();
            Some(BookingWithEvent { booking, event })
        })
        .collect();

    let stats = BookingStats::from_history(&bookings, now);
    Ok(BookingHistory { bookings, stats })
}
