use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{EventOrder, EventQuery, Reservation, Store};
use crate::models::{
    Booking, Event, EventView, NewBooking, NewEvent, Profile, UserPreferences,
};
use crate::utils::{AppError, AppResult};

/// PostgreSQL-backed store. Schema lives in `server/migrations`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_events(&self, query: &EventQuery) -> AppResult<Vec<Event>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM events WHERE TRUE");

        if let Some(organizer_id) = query.organizer_id {
            builder.push(" AND organizer_id = ").push_bind(organizer_id);
        }
        if let Some(starting_from) = query.starting_from {
            builder.push(" AND date >= ").push_bind(starting_from);
        }
        if let Some(categories) = &query.categories {
            builder
                .push(" AND category = ANY(")
                .push_bind(categories.clone())
                .push(")");
        }

        builder.push(match query.order {
            EventOrder::DateAscending => " ORDER BY date ASC",
            EventOrder::DateDescending => " ORDER BY date DESC",
            EventOrder::FeaturedFirst => " ORDER BY is_featured DESC, date ASC",
        });

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let events = builder
            .build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn get_events(&self, ids: &[Uuid]) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn insert_event(&self, event: NewEvent) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                id, title, description, category, image_url, date, location, city,
                price, capacity, available_seats, organizer_id, is_featured, tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.title)
        .bind(event.description)
        .bind(event.category)
        .bind(event.image_url)
        .bind(event.date)
        .bind(event.location)
        .bind(event.city)
        .bind(event.price)
        .bind(event.capacity)
        .bind(event.organizer_id)
        .bind(event.is_featured)
        .bind(event.tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn reserve_seats(&self, booking: NewBooking) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken by the conditional update serializes concurrent
        // bookings on the same event.
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET available_seats = available_seats - $2, updated_at = NOW()
            WHERE id = $1 AND available_seats >= $2
            RETURNING *
            "#,
        )
        .bind(booking.event_id)
        .bind(booking.tickets)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(event) = event else {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT available_seats FROM events WHERE id = $1")
                    .bind(booking.event_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Err(match available {
                Some(available) => AppError::InsufficientSeats {
                    requested: booking.tickets,
                    available,
                },
                None => AppError::event_not_found(booking.event_id),
            });
        };

        let total_amount = event.total_for(booking.tickets).ok_or_else(|| {
            AppError::InternalServerError("booking total overflowed".to_string())
        })?;
        let record = booking.into_booking(total_amount, Uuid::new_v4(), Utc::now());

        let stored = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, user_id, event_id, tickets, total_amount, status, payment_status,
                booking_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.event_id)
        .bind(record.tickets)
        .bind(record.total_amount)
        .bind(&record.status)
        .bind(&record.payment_status)
        .bind(record.booking_date)
        .bind(record.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Reservation {
            booking: stored,
            event,
        })
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn get_profile(&self, id: Uuid) -> AppResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn insert_profile(&self, profile: Profile) -> AppResult<Profile> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, full_name, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.avatar_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        let stored = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(profile.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<UserPreferences>> {
        let preferences = sqlx::query_as::<_, UserPreferences>(
            "SELECT * FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(preferences)
    }

    async fn save_preferences(&self, preferences: UserPreferences) -> AppResult<UserPreferences> {
        let stored = sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences (
                id, user_id, favorite_categories, favorite_cities, price_range_min,
                price_range_max, interaction_count, last_interaction, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                favorite_categories = EXCLUDED.favorite_categories,
                favorite_cities = EXCLUDED.favorite_cities,
                price_range_min = EXCLUDED.price_range_min,
                price_range_max = EXCLUDED.price_range_max,
                interaction_count = EXCLUDED.interaction_count,
                last_interaction = EXCLUDED.last_interaction,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(preferences.id)
        .bind(preferences.user_id)
        .bind(&preferences.favorite_categories)
        .bind(&preferences.favorite_cities)
        .bind(preferences.price_range_min)
        .bind(preferences.price_range_max)
        .bind(preferences.interaction_count)
        .bind(preferences.last_interaction)
        .bind(preferences.created_at)
        .bind(preferences.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn insert_event_view(&self, user_id: Uuid, event_id: Uuid) -> AppResult<EventView> {
        let view = sqlx::query_as::<_, EventView>(
            r#"
            INSERT INTO event_views (id, user_id, event_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(view)
    }
}
