//! Leaderboard computation.
//!
//! Both leaderboards are derived views over a snapshot of reviews and
//! restaurants that the caller has already fetched: filter, group by
//! restaurant, fold the averages, join the restaurant record, sort.
//! Nothing here touches the store.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::models::ranking::{GlobalRankingEntry, Ranked, UserRankingEntry};
use crate::models::restaurant::Restaurant;
use crate::models::review::Review;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}

// Absorbs the representation error of means like 603 / 600, which is
// stored just below 1.005.
const ROUNDING_SLACK: f64 = 1e-9;

/// Rounds half up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + ROUNDING_SLACK).round() / 100.0
}

fn index_restaurants(restaurants: &[Restaurant]) -> HashMap<&str, &Restaurant> {
    restaurants.iter().map(|r| (r.id.as_str(), r)).collect()
}

// Stable, so equal ratings keep their input order.
fn sort_descending<T: Ranked>(entries: &mut [T]) {
    entries.sort_by(|a, b| b.average_rating().total_cmp(&a.average_rating()));
}

/// Builds the global leaderboard: one entry per reviewed restaurant, ordered
/// by the mean of its review averages.
///
/// Restaurants nobody reviewed never show up, and reviews pointing at a
/// restaurant that no longer exists are skipped.
pub fn compute_global_rankings(
    reviews: &[Review],
    restaurants: &[Restaurant],
) -> Vec<GlobalRankingEntry> {
    // (restaurant id, sum of all sub-ratings, count) in first-seen order
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for review in reviews {
        let id = review.restaurant_id.as_str();
        let slot = *slots.entry(id).or_insert_with(|| {
            groups.push((id, 0.0, 0));
            groups.len() - 1
        });
        groups[slot].1 += review.rating_sum();
        groups[slot].2 += 1;
    }

    let by_id = index_restaurants(restaurants);
    let mut rankings: Vec<GlobalRankingEntry> = groups
        .into_iter()
        .filter_map(|(id, sum, count)| {
            let restaurant = by_id.get(id)?;
            Some(GlobalRankingEntry {
                restaurant_id: restaurant.id.clone(),
                restaurant_name: restaurant.name.clone(),
                cuisine: restaurant.cuisine.clone(),
                address: restaurant.address.clone(),
                average_rating: round2(sum / (3 * count) as f64),
                review_count: count,
            })
        })
        .collect();

    sort_descending(&mut rankings);
    rankings
}

/// Builds the leaderboard of everything `user_id` has reviewed, ordered by
/// that user's own average for each restaurant.
///
/// A user without reviews gets an empty list. An id that is not a UUID is
/// rejected before any filtering happens.
pub fn compute_user_rankings(
    user_id: &str,
    reviews: &[Review],
    restaurants: &[Restaurant],
) -> Result<Vec<UserRankingEntry>, RankingError> {
    let user_id = parse_user_id(user_id)?;

    let by_id = index_restaurants(restaurants);
    let mut rankings: Vec<UserRankingEntry> = reviews
        .iter()
        .filter(|review| Uuid::parse_str(&review.user_id).is_ok_and(|id| id == user_id))
        .filter_map(|review| {
            let restaurant = by_id.get(review.restaurant_id.as_str())?;
            Some(UserRankingEntry {
                restaurant_id: restaurant.id.clone(),
                restaurant_name: restaurant.name.clone(),
                cuisine: restaurant.cuisine.clone(),
                address: restaurant.address.clone(),
                average_rating: round2(review.average()),
                service_rating: review.service_rating,
                price_rating: review.price_rating,
                menu_rating: review.menu_rating,
                comment: review.comment.clone(),
                created_at: review.created_at,
            })
        })
        .collect();

    sort_descending(&mut rankings);
    Ok(rankings)
}

pub fn parse_user_id(user_id: &str) -> Result<Uuid, RankingError> {
    Uuid::parse_str(user_id).map_err(|_| RankingError::InvalidUserId(user_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn restaurant(id: &str, name: &str, cuisine: Option<&str>) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: name.into(),
            cuisine: cuisine.map(Into::into),
            address: None,
            description: None,
            created_by: "admin".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn review(restaurant_id: &str, user_id: &str, ratings: (f64, f64, f64)) -> Review {
        Review {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.into(),
            user_id: user_id.into(),
            service_rating: ratings.0,
            price_rating: ratings.1,
            menu_rating: ratings.2,
            comment: "Really good".into(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 20, 30, 0).unwrap(),
        }
    }

    const ALICE: &str = "6f1c2a7e-3b1d-4a8e-9c55-1f0e2d3c4b5a";
    const BOB: &str = "0b9f8e7d-6c5b-4a39-8271-605f4e3d2c1b";

    #[test]
    fn global_average_of_extremes_is_three() {
        let restaurants = vec![restaurant("r1", "Da Mario", Some("Pizzeria"))];
        let reviews = vec![
            review("r1", ALICE, (5.0, 5.0, 5.0)),
            review("r1", BOB, (1.0, 1.0, 1.0)),
        ];

        let rankings = compute_global_rankings(&reviews, &restaurants);
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].average_rating, 3.0);
        assert_eq!(rankings[0].review_count, 2);
        assert_eq!(rankings[0].restaurant_name, "Da Mario");
    }

    #[test]
    fn global_average_is_rounded_to_two_decimals() {
        let restaurants = vec![restaurant("r1", "Sushi Ko", Some("Japanese"))];
        let reviews = vec![review("r1", ALICE, (5.0, 4.0, 4.0))];

        let rankings = compute_global_rankings(&reviews, &restaurants);
        assert_eq!(rankings[0].average_rating, 4.33);
    }

    #[test]
    fn unreviewed_and_missing_restaurants_are_dropped() {
        let restaurants = vec![
            restaurant("r1", "Reviewed", None),
            restaurant("r2", "Never reviewed", None),
        ];
        let reviews = vec![
            review("r1", ALICE, (4.0, 4.0, 4.0)),
            review("deleted", BOB, (5.0, 5.0, 5.0)),
        ];

        let rankings = compute_global_rankings(&reviews, &restaurants);
        let ids: Vec<_> = rankings.iter().map(|r| r.restaurant_id.as_str()).collect();
        assert_eq!(ids, vec!["r1"]);
    }

    #[test]
    fn global_rankings_sorted_with_stable_ties() {
        let restaurants = vec![
            restaurant("a", "A", None),
            restaurant("b", "B", None),
            restaurant("c", "C", None),
        ];
        let reviews = vec![
            review("a", ALICE, (3.0, 3.0, 3.0)),
            review("b", ALICE, (5.0, 5.0, 5.0)),
            review("c", ALICE, (3.0, 3.0, 3.0)),
        ];

        let rankings = compute_global_rankings(&reviews, &restaurants);
        let ids: Vec<_> = rankings.iter().map(|r| r.restaurant_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_snapshot_gives_empty_leaderboard() {
        assert!(compute_global_rankings(&[], &[]).is_empty());
        assert!(compute_user_rankings(ALICE, &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn user_rankings_only_contain_that_user() {
        let restaurants = vec![
            restaurant("r1", "Da Mario", Some("Pizzeria")),
            restaurant("r2", "Sushi Ko", Some("Japanese")),
        ];
        let reviews = vec![
            review("r1", ALICE, (2.0, 3.0, 2.0)),
            review("r2", ALICE, (5.0, 4.0, 5.0)),
            review("r1", BOB, (5.0, 5.0, 5.0)),
        ];

        let rankings = compute_user_rankings(ALICE, &reviews, &restaurants).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].restaurant_id, "r2");
        assert_eq!(rankings[0].average_rating, 4.67);
        assert_eq!(rankings[0].service_rating, 5.0);
        assert_eq!(rankings[1].average_rating, 2.33);
    }

    #[test]
    fn user_rankings_skip_missing_restaurants() {
        let restaurants = vec![restaurant("r1", "Da Mario", None)];
        let reviews = vec![
            review("r1", ALICE, (4.0, 4.0, 4.0)),
            review("gone", ALICE, (5.0, 5.0, 5.0)),
        ];

        let rankings = compute_user_rankings(ALICE, &reviews, &restaurants).unwrap();
        assert_eq!(rankings.len(), 1);
    }

    #[test]
    fn invalid_user_id_is_an_error_not_an_empty_list() {
        assert_eq!(
            compute_user_rankings("not-a-user", &[], &[]),
            Err(RankingError::InvalidUserId("not-a-user".into()))
        );
        assert_eq!(compute_user_rankings(BOB, &[], &[]), Ok(vec![]));
    }

    #[test]
    fn user_id_match_ignores_hex_case() {
        let restaurants = vec![restaurant("r1", "Da Mario", None)];
        let reviews = vec![review("r1", ALICE, (4.0, 4.0, 4.0))];

        let upper = ALICE.to_uppercase();
        let rankings = compute_user_rankings(&upper, &reviews, &restaurants).unwrap();
        assert_eq!(rankings.len(), 1);
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(4.125), 4.13);
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(603.0 / 600.0), 1.01);
        assert_eq!(round2(1.0049), 1.0);
    }

    #[test]
    fn global_average_rounds_up_at_half_cent() {
        let restaurants = vec![restaurant("r1", "Trattoria", None)];
        // 197 reviews of 1/1/1 and 3 of 2/1/1: 603 rating points over 600
        let mut reviews: Vec<Review> = (0..197)
            .map(|_| review("r1", &Uuid::new_v4().to_string(), (1.0, 1.0, 1.0)))
            .collect();
        reviews.extend((0..3).map(|_| review("r1", &Uuid::new_v4().to_string(), (2.0, 1.0, 1.0))));

        let rankings = compute_global_rankings(&reviews, &restaurants);
        assert_eq!(rankings[0].review_count, 200);
        assert_eq!(rankings[0].average_rating, 1.01);
    }
}
