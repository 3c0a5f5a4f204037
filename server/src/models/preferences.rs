use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How many categories and cities a user's preference window keeps.
pub const MAX_FAVORITES: usize = 5;

pub const DEFAULT_PRICE_RANGE_MAX: i64 = 500;

/// Recency window of what a user has been looking at.
///
/// Every tracked event view appends the event's category and city (skipping
/// values already present) and keeps only the last [`MAX_FAVORITES`] of each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserPreferences {
    pub id: Uuid,
    pub user_id: Uuid,
    pub favorite_categories: Vec<String>,
    pub favorite_cities: Vec<String>,
    pub price_range_min: Decimal,
    pub price_range_max: Decimal,
    pub interaction_count: i32,
    pub last_interaction: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Preferences seeded from a user's first viewed event.
    pub fn first_interaction(user_id: Uuid, category: &str, city: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            favorite_categories: vec![category.to_string()],
            favorite_cities: vec![city.to_string()],
            price_range_min: Decimal::ZERO,
            price_range_max: Decimal::from(DEFAULT_PRICE_RANGE_MAX),
            interaction_count: 1,
            last_interaction: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_interaction(&mut self, category: &str, city: &str, now: DateTime<Utc>) {
        push_bounded(&mut self.favorite_categories, category);
        push_bounded(&mut self.favorite_cities, city);
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.last_interaction = now;
        self.updated_at = now;
    }

    pub fn has_favorite_categories(&self) -> bool {
        !self.favorite_categories.is_empty()
    }
}

fn push_bounded(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
    if values.len() > MAX_FAVORITES {
        let excess = values.len() - MAX_FAVORITES;
        values.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interaction_seeds_lists() {
        let prefs = UserPreferences::first_interaction(Uuid::new_v4(), "Music", "Boston", Utc::now());
        assert_eq!(prefs.favorite_categories, vec!["Music"]);
        assert_eq!(prefs.favorite_cities, vec!["Boston"]);
        assert_eq!(prefs.interaction_count, 1);
        assert_eq!(prefs.price_range_max, Decimal::from(500));
    }

    #[test]
    fn test_repeated_values_are_not_duplicated() {
        let mut prefs = UserPreferences::first_interaction(Uuid::new_v4(), "Music", "Boston", Utc::now());
        prefs.record_interaction("Music", "Boston", Utc::now());
        prefs.record_interaction("Tech", "Boston", Utc::now());

        assert_eq!(prefs.favorite_categories, vec!["Music", "Tech"]);
        assert_eq!(prefs.favorite_cities, vec!["Boston"]);
        assert_eq!(prefs.interaction_count, 3);
    }

    #[test]
    fn test_lists_keep_the_five_most_recent() {
        let cities = ["New York", "Boston", "Chicago", "Miami", "Seattle", "Austin", "Denver"];
        let mut prefs = UserPreferences::first_interaction(Uuid::new_v4(), "Music", "Napa Valley", Utc::now());

        for (i, city) in cities.iter().enumerate() {
            prefs.record_interaction(&format!("Category {i}"), city, Utc::now());
            assert!(prefs.favorite_categories.len() <= MAX_FAVORITES);
            assert!(prefs.favorite_cities.len() <= MAX_FAVORITES);
        }

        assert_eq!(
            prefs.favorite_cities,
            vec!["Chicago", "Miami", "Seattle", "Austin", "Denver"]
        );
        assert_eq!(prefs.favorite_categories.last().map(String::as_str), Some("Category 6"));
        assert_eq!(prefs.interaction_count, 8);
    }
}
