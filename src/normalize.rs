//! Convert the free-text story age into hours.
//!
//! The front page shows ages like `"45 minutes ago"`, `"3 hours ago"` or
//! `"2 days ago"`. Units are checked in that order and the first match wins.
//! Anything else ("just now", weeks, months, years) has no numeric age and
//! is left unset rather than defaulted to zero, so the story drops out of
//! the sorted report.

use crate::models::Item;
use tracing::debug;

/// Hours represented by an age string, or `None` for unrecognized units.
pub fn age_hours(age_raw: &str) -> Option<f64> {
    let to_hours: fn(f64) -> f64 = if age_raw.contains("minute") {
        |n| n / 60.0
    } else if age_raw.contains("hour") {
        |n| n
    } else if age_raw.contains("day") {
        |n| n * 24.0
    } else {
        return None;
    };
    leading_integer(age_raw).map(|n| to_hours(n as f64))
}

/// First whitespace-separated token made only of ASCII digits.
fn leading_integer(text: &str) -> Option<u64> {
    text.split_whitespace()
        .find(|token| token.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
}

/// Fill in `age_hours` for every item.
pub fn normalize_items(items: &mut [Item]) {
    for item in items.iter_mut() {
        item.age_hours = age_hours(&item.age_raw);
        if item.age_hours.is_none() {
            debug!(id = %item.id, age = %item.age_raw, "Unrecognized age");
        }
    }
}
