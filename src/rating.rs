//! Display helpers shared by the server and the browser.

use std::collections::{BTreeSet, HashSet};

use crate::models::ranking::Ranked;
use crate::ranking::round2;

/// Renders a rating on a quarter-point scale: `4.25` reads "4+", `4.75`
/// reads "5-", anything else is printed with one decimal.
pub fn format_rating(rating: f64) -> String {
    let rounded = (rating * 4.0).round() / 4.0;
    let whole = rounded.floor();
    let remainder = round2(rounded - whole);

    if remainder == 0.25 {
        return format!("{}+", whole as i64);
    }
    if remainder == 0.75 {
        return format!("{}-", whole as i64 + 1);
    }
    format!("{:.1}", rounded)
}

/// Five stars, filled up to the rounded rating.
pub fn star_array(rating: f64) -> [bool; 5] {
    let filled = rating.round();
    std::array::from_fn(|i| (i as f64) < filled)
}

// Blank cuisines count as no cuisine.
fn cuisine_of<T: Ranked>(entry: &T) -> Option<&str> {
    entry.cuisine().filter(|c| !c.trim().is_empty())
}

/// Keeps entries whose cuisine is in `included`. An empty set means no
/// filter at all.
pub fn filter_included<T: Ranked + Clone>(entries: &[T], included: &HashSet<String>) -> Vec<T> {
    if included.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|e| cuisine_of(*e).is_some_and(|c| included.contains(c)))
        .cloned()
        .collect()
}

/// Drops entries whose cuisine is in `excluded`. Entries without a cuisine
/// always stay.
pub fn filter_excluded<T: Ranked + Clone>(entries: &[T], excluded: &HashSet<String>) -> Vec<T> {
    entries
        .iter()
        .filter(|e| cuisine_of(*e).map_or(true, |c| !excluded.contains(c)))
        .cloned()
        .collect()
}

/// Sorted, de-duplicated cuisines present in `entries`.
pub fn available_cuisines<T: Ranked>(entries: &[T]) -> Vec<String> {
    entries
        .iter()
        .filter_map(cuisine_of)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn top<T: Clone>(entries: &[T], n: usize) -> Vec<T> {
    entries.iter().take(n).cloned().collect()
}

/// Parses a comma separated cuisine list as sent in query strings.
pub fn parse_cuisines(raw: Option<&str>) -> HashSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
