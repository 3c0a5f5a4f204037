use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Event;
use crate::store::{EventOrder, EventQuery, Store};
use crate::utils::AppResult;

pub const RECOMMENDATION_LIMIT: i64 = 6;

/// Upcoming events for the user, featured first, narrowed to the categories
/// they have been viewing lately when there are any.
pub async fn recommend_events(
    store: &dyn Store,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Vec<Event>> {
    let mut query = EventQuery::default()
        .starting_from(now)
        .order_by(EventOrder::FeaturedFirst)
        .limit(RECOMMENDATION_LIMIT);

    if let Some(preferences) = store.get_preferences(user_id).await? {
        if preferences.has_favorite_categories() {
            query = query.in_categories(preferences.favorite_categories);
        }
    }

    let events = store.list_events(&query).await?;
    tracing::debug!(%user_id, count = events.len(), "Built recommendations");
    Ok(events)
}
