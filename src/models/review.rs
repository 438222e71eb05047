use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_COMMENT_LEN: usize = 5;
pub const MAX_COMMENT_LEN: usize = 500;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub restaurant_id: String, // ID of the restaurant the review is about
    pub user_id: String,       // ID of the user who submitted the review
    pub service_rating: f64,
    pub price_rating: f64,
    pub menu_rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn rating_sum(&self) -> f64 {
        self.service_rating + self.price_rating + self.menu_rating
    }

    /// Unrounded mean of the three sub-ratings.
    pub fn average(&self) -> f64 {
        self.rating_sum() / 3.0
    }
}

/// The writable part of a review. Used for both submission and the
/// full-field replace performed on update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub service_rating: f64,
    pub price_rating: f64,
    pub menu_rating: f64,
    pub comment: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between 1 and 5")]
    RatingOutOfRange { field: &'static str },

    #[error("Comment must be between 5 and 500 characters")]
    CommentLength,

    #[error("Restaurant name is required")]
    MissingName,
}

impl ReviewInput {
    /// Checks the rating bounds and trims the comment in place.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("serviceRating", self.service_rating),
            ("priceRating", self.price_rating),
            ("menuRating", self.menu_rating),
        ] {
            // NaN fails both comparisons
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(ValidationError::RatingOutOfRange { field });
            }
        }

        self.comment = self.comment.trim().to_string();
        let len = self.comment.chars().count();
        if !(MIN_COMMENT_LEN..=MAX_COMMENT_LEN).contains(&len) {
            return Err(ValidationError::CommentLength);
        }
        Ok(())
    }
}
