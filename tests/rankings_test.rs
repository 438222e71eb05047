use chrono::{TimeZone, Utc};
use howiate::models::ranking::Ranked;
use howiate::models::restaurant::Restaurant;
use howiate::models::review::Review;
use howiate::ranking::{compute_global_rankings, compute_user_rankings};
use howiate::rating::{filter_included, format_rating};
use std::collections::HashSet;
use uuid::Uuid;

const CUISINES: [Option<&str>; 4] = [Some("Pizzeria"), Some("Japanese"), None, Some("Trattoria")];

// Deterministic corpus: 12 restaurants, 9 users, a review whenever (r + u) % 3 != 0
fn corpus() -> (Vec<Review>, Vec<Restaurant>, Vec<String>) {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
    let restaurants: Vec<Restaurant> = (0..12)
        .map(|i| Restaurant {
            id: format!("restaurant-{i}"),
            name: format!("Restaurant {i}"),
            cuisine: CUISINES[i % CUISINES.len()].map(Into::into),
            address: None,
            description: None,
            created_by: "admin".into(),
            created_at,
        })
        .collect();
    let users: Vec<String> = (0..9u128).map(|i| Uuid::from_u128(i + 1).to_string()).collect();

    let mut reviews = Vec::new();
    for (r, restaurant) in restaurants.iter().enumerate() {
        for (u, user) in users.iter().enumerate() {
            if (r + u) % 3 == 0 {
                continue;
            }
            let rating = |seed: usize| (1 + (seed % 5)) as f64;
            reviews.push(Review {
                id: Uuid::new_v4().to_string(),
                restaurant_id: restaurant.id.clone(),
                user_id: user.clone(),
                service_rating: rating(r * 7 + u),
                price_rating: rating(r + u * 3),
                menu_rating: rating(r * u + 2),
                comment: format!("Review {r}/{u}"),
                created_at,
            });
        }
    }
    (reviews, restaurants, users)
}

fn is_non_increasing<T: Ranked>(entries: &[T]) -> bool {
    entries
        .windows(2)
        .all(|pair| pair[0].average_rating() >= pair[1].average_rating())
}

#[test]
fn review_average_is_exact_mean() {
    let (reviews, _, _) = corpus();
    for review in &reviews {
        let expected = (review.service_rating + review.price_rating + review.menu_rating) / 3.0;
        assert_eq!(review.average(), expected);
    }
}

#[test]
fn leaderboards_are_sorted() {
    let (reviews, restaurants, users) = corpus();

    assert!(is_non_increasing(&compute_global_rankings(&reviews, &restaurants)));
    for user in &users {
        let rankings = compute_user_rankings(user, &reviews, &restaurants).unwrap();
        assert!(is_non_increasing(&rankings));
    }
}

#[test]
fn review_counts_add_up() {
    let (reviews, restaurants, _) = corpus();
    let rankings = compute_global_rankings(&reviews, &restaurants);

    let total: usize = rankings.iter().map(|r| r.review_count).sum();
    assert_eq!(total, reviews.len());
    assert_eq!(rankings.len(), restaurants.len());
}

#[test]
fn user_leaderboard_has_one_entry_per_review() {
    let (reviews, restaurants, users) = corpus();

    for user in &users {
        let authored = reviews.iter().filter(|r| &r.user_id == user).count();
        let rankings = compute_user_rankings(user, &reviews, &restaurants).unwrap();
        assert_eq!(rankings.len(), authored);

        let own: HashSet<_> = reviews
            .iter()
            .filter(|r| &r.user_id == user)
            .map(|r| r.comment.as_str())
            .collect();
        assert!(rankings.iter().all(|e| own.contains(e.comment.as_str())));
    }
}

#[test]
fn rankings_are_idempotent() {
    let (reviews, restaurants, users) = corpus();

    assert_eq!(
        compute_global_rankings(&reviews, &restaurants),
        compute_global_rankings(&reviews, &restaurants)
    );
    assert_eq!(
        compute_user_rankings(&users[0], &reviews, &restaurants),
        compute_user_rankings(&users[0], &reviews, &restaurants)
    );
}

#[test]
fn cuisine_filter_on_leaderboard() {
    let (reviews, restaurants, _) = corpus();
    let rankings = compute_global_rankings(&reviews, &restaurants);

    assert_eq!(filter_included(&rankings, &HashSet::new()), rankings);

    let pizzerias: HashSet<String> = ["Pizzeria".to_string()].into();
    let filtered = filter_included(&rankings, &pizzerias);
    assert_eq!(filtered.len(), 3);
    assert!(filtered.iter().all(|e| e.cuisine.as_deref() == Some("Pizzeria")));
    assert!(is_non_increasing(&filtered));
}

#[test]
fn displayed_ratings_use_quarter_steps() {
    let (reviews, restaurants, _) = corpus();
    for entry in compute_global_rankings(&reviews, &restaurants) {
        let shown = format_rating(entry.average_rating);
        assert!(
            shown.ends_with('+') || shown.ends_with('-') || shown.contains('.'),
            "unexpected format {shown}"
        );
    }
}
