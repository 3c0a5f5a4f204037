use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Event;

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const PAYMENT_PAID: &str = "paid";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub tickets: i32,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_status: String,
    pub booking_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A request to reserve `tickets` seats on an event for a user.
#[derive(Debug, Clone, Copy)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub tickets: i32,
}

impl NewBooking {
    /// Confirmed, paid booking record for this request.
    pub fn into_booking(self, total_amount: Decimal, id: Uuid, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            event_id: self.event_id,
            tickets: self.tickets,
            total_amount,
            status: STATUS_CONFIRMED.to_string(),
            payment_status: PAYMENT_PAID.to_string(),
            booking_date: now,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingWithEvent {
    #[serde(flatten)]
    pub booking: Booking,
    pub event: Event,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingStats {
    pub total_bookings: usize,
    pub upcoming_events: usize,
    pub total_spent: Decimal,
}

impl BookingStats {
    pub fn from_history(history: &[BookingWithEvent], now: DateTime<Utc>) -> Self {
        Self {
            total_bookings: history.len(),
            upcoming_events: history
                .iter()
                .filter(|entry| entry.event.is_upcoming(now))
                .count(),
            total_spent: history
                .iter()
                .map(|entry| entry.booking.total_amount)
                .sum(),
        }
    }
}
