//! Utility functions for text clean-up, logging and file system checks.
//!
//! - Cosmetic scrubbing of the rendered report
//! - String truncation for log previews
//! - Output directory validation

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Substitutions applied to the rendered report, in order.
///
/// The first group removes the JSON punctuation around each record so a
/// link can be opened straight from a text viewer. Escaped backslashes are
/// parked on NUL (which serde_json always escapes, so it never appears raw)
/// until the quotes are gone; escaped quotes inside values become
/// apostrophes. The second group maps typographic characters to ASCII.
pub const SCRUB_PAIRS: &[(&str, &str)] = &[
    ("\\\\", "\u{0}"),
    ("\\\"", "'"),
    ("\",\n", "\n"),
    (",\n", "\n"),
    ("\"", ""),
    ("{\n", ""),
    ("}\n", "\n"),
    ("\u{0}", "\\"),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
];

/// Apply literal `(pattern, replacement)` pairs to `text`, one after another.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(scrub("a–b", &[("–", "-")]), "a-b");
/// ```
pub fn scrub(text: &str, pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary)
/// with an ellipsis and byte count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
