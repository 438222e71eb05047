use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the global leaderboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRankingEntry {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub average_rating: f64,
    pub review_count: usize,
}

/// One row of a user's personal leaderboard: a restaurant paired with the
/// single review that user left for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRankingEntry {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub average_rating: f64,
    pub service_rating: f64,
    pub price_rating: f64,
    pub menu_rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Wire envelope shared by both ranking endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rankings<T> {
    pub rankings: Vec<T>,
}

/// Anything that can be placed on a leaderboard.
pub trait Ranked {
    fn average_rating(&self) -> f64;
    fn cuisine(&self) -> Option<&str>;
}

impl Ranked for GlobalRankingEntry {
    fn average_rating(&self) -> f64 {
        self.average_rating
    }

    fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }
}

impl Ranked for UserRankingEntry {
    fn average_rating(&self) -> f64 {
        self.average_rating
    }

    fn cuisine(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }
}
