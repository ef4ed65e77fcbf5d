//! Sort admitted stories by age and split them at the time of the last run.
//!
//! Stories are ordered oldest first. The split point is the first story
//! younger than the gap since the previous run: everything before it was
//! already on the front page last time ("older"), everything from it on is
//! new.

use crate::config::DegeneratePolicy;
use crate::models::{Item, ReportPartition, RunWindow};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Drop stories without a numeric age and sort the rest oldest first.
///
/// The sort is stable: stories of equal age keep their page order.
pub fn sort_by_age(items: Vec<Item>) -> Vec<Item> {
    let (mut aged, unaged): (Vec<Item>, Vec<Item>) =
        items.into_iter().partition(|item| item.age_hours.is_some());
    for item in &unaged {
        debug!(id = %item.id, age = %item.age_raw, "Dropping story without numeric age");
    }
    aged.sort_by(|a, b| age_key(b).total_cmp(&age_key(a)));
    aged
}

fn age_key(item: &Item) -> f64 {
    item.age_hours.unwrap_or(f64::NAN)
}

/// Index of the first story younger than `elapsed_hours` in an
/// oldest-first list.
pub fn split_index(sorted: &[Item], elapsed_hours: f64) -> Option<usize> {
    sorted
        .iter()
        .find_position(|item| item.age_hours.is_some_and(|age| age < elapsed_hours))
        .map(|(index, _)| index)
}

/// Sort `items` and split them into older and new stories.
#[instrument(level = "info", skip_all, fields(elapsed_hours = window.elapsed_hours(), ?policy))]
pub fn partition(items: Vec<Item>, window: RunWindow, policy: DegeneratePolicy) -> ReportPartition {
    let mut older = sort_by_age(items);
    let elapsed_hours = window.elapsed_hours();

    let (new, degenerate) = match split_index(&older, elapsed_hours) {
        Some(index) => (older.split_off(index), false),
        None if policy == DegeneratePolicy::AllNew => (std::mem::take(&mut older), true),
        None => (Vec::new(), true),
    };

    info!(older = older.len(), new = new.len(), degenerate, "Partitioned stories");
    ReportPartition {
        window,
        older,
        new,
        degenerate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;

    fn item(id: &str, age_hours: Option<f64>) -> Item {
        Item {
            id: id.into(),
            title: format!("Story {id}"),
            external_link: String::new(),
            source_url: format!("https://news.ycombinator.com/item?id={id}"),
            votes: Some(10),
            comment_count: Some(10),
            age_raw: String::new(),
            age_hours,
        }
    }

    fn window(elapsed_hours: i64) -> RunWindow {
        let now = NaiveDateTime::parse_from_str("2025-05-06 18:00:00", TIMESTAMP_FORMAT).unwrap();
        RunWindow {
            previous: now - chrono::Duration::hours(elapsed_hours),
            now,
        }
    }

    fn ages(items: &[Item]) -> Vec<f64> {
        items.iter().filter_map(|i| i.age_hours).collect()
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_sort_oldest_first() {
        let sorted = sort_by_age(vec![
            item("a", Some(1.0)),
            item("b", Some(48.0)),
            item("c", Some(10.0)),
            item("d", Some(24.0)),
        ]);
        assert_eq!(ages(&sorted), vec![48.0, 24.0, 10.0, 1.0]);
    }

    #[test]
    fn test_sort_is_stable() {
        let sorted = sort_by_age(vec![
            item("first", Some(3.0)),
            item("older", Some(5.0)),
            item("second", Some(3.0)),
        ]);
        assert_eq!(ids(&sorted), vec!["older", "first", "second"]);
    }

    #[test]
    fn test_sort_drops_unset_age() {
        let sorted = sort_by_age(vec![item("a", None), item("b", Some(2.0))]);
        assert_eq!(ids(&sorted), vec!["b"]);
    }

    #[test]
    fn test_partition_at_elapsed_hours() {
        let items = vec![
            item("a", Some(10.0)),
            item("b", Some(48.0)),
            item("c", Some(1.0)),
            item("d", Some(24.0)),
        ];
        let partition = partition(items, window(12), DegeneratePolicy::Placeholder);
        assert_eq!(ages(&partition.older), vec![48.0, 24.0]);
        assert_eq!(ages(&partition.new), vec![10.0, 1.0]);
        assert!(!partition.degenerate);
    }

    #[test]
    fn test_age_equal_to_gap_is_older() {
        let items = vec![item("a", Some(12.0)), item("b", Some(11.5))];
        let partition = partition(items, window(12), DegeneratePolicy::Placeholder);
        assert_eq!(ids(&partition.older), vec!["a"]);
        assert_eq!(ids(&partition.new), vec!["b"]);
    }

    #[test]
    fn test_everything_new() {
        let items = vec![item("a", Some(2.0)), item("b", Some(1.0))];
        let partition = partition(items, window(12), DegeneratePolicy::Placeholder);
        assert!(partition.older.is_empty());
        assert_eq!(partition.new.len(), 2);
    }

    #[test]
    fn test_nothing_new_placeholder() {
        let items = vec![item("a", Some(20.0)), item("b", Some(13.0))];
        let partition = partition(items, window(12), DegeneratePolicy::Placeholder);
        assert!(partition.degenerate);
        assert_eq!(partition.older.len(), 2);
        assert!(partition.new.is_empty());
    }

    #[test]
    fn test_nothing_new_all_new() {
        let items = vec![item("a", Some(20.0)), item("b", Some(13.0))];
        let partition = partition(items, window(12), DegeneratePolicy::AllNew);
        assert!(partition.degenerate);
        assert!(partition.older.is_empty());
        assert_eq!(ids(&partition.new), vec!["a", "b"]);
    }

    #[test]
    fn test_first_run_has_zero_gap() {
        let items = vec![item("a", Some(0.5))];
        let partition = partition(items, window(0), DegeneratePolicy::Empty);
        assert!(partition.degenerate);
        assert_eq!(partition.older.len(), 1);
    }

    #[test]
    fn test_empty_list() {
        let partition = partition(Vec::new(), window(12), DegeneratePolicy::Placeholder);
        assert!(partition.is_empty());
        assert!(partition.degenerate);
    }
}
