//! Data models for scraped stories and the report built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ItemFragment`]: Raw per-story data grouped by the front page parser
//! - [`Item`]: A story after extraction, carrying optional numeric fields
//! - [`RunWindow`]: The previous and current run timestamps
//! - [`ReportPartition`]: Sorted stories split into "older" and "new"
//! - [`ReportRecord`]: The serialized shape of one story in the report
//!
//! Optional fields are modelled with `Option` throughout. An unset vote count,
//! comment count or age is never treated as zero; it excludes the story.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format of the run state file and the report header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the parser found for one story on the front page.
///
/// The id row, the title link and the subtext row are grouped while walking
/// the document, so a fragment always describes a single story.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFragment {
    /// The `id` attribute of the story row, if present.
    pub id: Option<String>,
    /// Visible text of the title link.
    pub title: String,
    /// `href` attribute of the title link.
    pub href: Option<String>,
    /// Text of the `.score` element, e.g. `"77 points"`.
    pub score: Option<String>,
    /// Full visible text of the subtext cell.
    pub subtext: String,
    /// Text of the `.age` element, e.g. `"3 hours ago"`.
    pub age: Option<String>,
}

/// A story extracted from the front page.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Site-assigned identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Link target of the title, empty when the story has none.
    pub external_link: String,
    /// Comments page on the site: item base URL followed by `id`.
    pub source_url: String,
    /// Score, unset when the page shows none.
    pub votes: Option<u32>,
    /// Number of comments, unset when the page shows "discuss".
    pub comment_count: Option<u32>,
    /// Age as shown on the page, e.g. `"45 minutes ago"`.
    pub age_raw: String,
    /// Age in hours, set by the normalizer when the unit is recognized.
    pub age_hours: Option<f64>,
}

/// The previous and current invocation timestamps (local time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunWindow {
    pub previous: NaiveDateTime,
    pub now: NaiveDateTime,
}

impl RunWindow {
    /// Hours elapsed since the previous run, fractional.
    ///
    /// Clamped to zero if the clock went backwards between runs.
    pub fn elapsed_hours(&self) -> f64 {
        let secs = (self.now - self.previous).num_milliseconds() as f64 / 1000.0;
        (secs / 3600.0).max(0.0)
    }
}

/// Sorted stories split at the elapsed-time boundary.
#[derive(Debug, Clone)]
pub struct ReportPartition {
    pub window: RunWindow,
    /// Stories at least as old as the gap since the previous run, oldest first.
    pub older: Vec<Item>,
    /// Stories posted since the previous run, oldest first.
    pub new: Vec<Item>,
    /// No story was younger than the gap; see `DegeneratePolicy`.
    pub degenerate: bool,
}

impl ReportPartition {
    pub fn len(&self) -> usize {
        self.older.len() + self.new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One story as it appears in the report.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReportRecord {
    pub title: String,
    pub hn_url: String,
    pub ext_link: String,
    pub votes: Option<u32>,
    pub comments: Option<u32>,
    #[serde(rename = "age (h)")]
    pub age_hours: Option<f64>,
}

impl From<&Item> for ReportRecord {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            hn_url: item.source_url.clone(),
            ext_link: item.external_link.clone(),
            votes: item.votes,
            comments: item.comment_count,
            age_hours: item.age_hours,
        }
    }
}
