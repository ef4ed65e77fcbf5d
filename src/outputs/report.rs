//! Plain-text report rendering.
//!
//! # Layout
//!
//! ```text
//! Old date, time: 2025-05-06 06:00:00
//!            now: 2025-05-06 18:00:00
//!  date_diff (h): 12.0000
//!
//!   title: ...                  <- older stories, oldest first
//!   hn_url: https://news.ycombinator.com/item?id=...
//!   ...
//!
//! ==============================================================================
//! New since: 2025-05-06 06:00:00
//! ==============================================================================
//!
//!   title: ...                  <- new stories, oldest first
//! ```
//!
//! Records are rendered as pretty JSON into an explicit sink, then the whole
//! text goes through [`scrub`](crate::utils::scrub) once to strip the JSON
//! punctuation.

use crate::config::DegeneratePolicy;
use crate::error::{DigestError, Result};
use crate::models::{Item, ReportPartition, ReportRecord, TIMESTAMP_FORMAT};
use crate::utils::{scrub, SCRUB_PAIRS};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

const RULE: &str = "==============================================================================";

/// Render `partition` into `sink` without any cosmetic clean-up.
pub fn render<W: Write>(
    partition: &ReportPartition,
    policy: DegeneratePolicy,
    sink: &mut W,
) -> Result<()> {
    let previous = partition.window.previous.format(TIMESTAMP_FORMAT);
    let now = partition.window.now.format(TIMESTAMP_FORMAT);

    writeln!(sink)?;
    writeln!(sink, "Old date, time: {previous}")?;
    writeln!(sink, "           now: {now}")?;
    writeln!(sink, " date_diff (h): {:0.4}", partition.window.elapsed_hours())?;
    writeln!(sink)?;

    write_records(&partition.older, sink)?;

    writeln!(sink)?;
    writeln!(sink, "{RULE}")?;
    writeln!(sink, "New since: {previous}")?;
    writeln!(sink, "{RULE}")?;
    writeln!(sink)?;

    if partition.new.is_empty() && partition.degenerate && policy == DegeneratePolicy::Placeholder {
        writeln!(sink, "No new stories since {previous}.")?;
    } else {
        write_records(&partition.new, sink)?;
    }
    Ok(())
}

fn write_records<W: Write>(items: &[Item], sink: &mut W) -> Result<()> {
    for item in items {
        let json = serde_json::to_string_pretty(&ReportRecord::from(item))?;
        writeln!(sink, "{json}")?;
    }
    Ok(())
}

/// Render and scrub the full report text.
pub fn render_report(partition: &ReportPartition, policy: DegeneratePolicy) -> Result<String> {
    let mut text = String::new();
    render(partition, policy, &mut text)?;
    Ok(scrub(&text, SCRUB_PAIRS))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Replace the report at `path` with `contents`.
///
/// The text is written next to the target and renamed over it, so a failed
/// run never leaves a truncated report behind.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = contents.len()))]
pub async fn write_report_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    let result = match fs::write(&tmp, contents).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };

    if let Err(source) = result {
        error!(error = %source, "Failed writing report");
        let _ = fs::remove_file(&tmp).await;
        return Err(DigestError::Report {
            path: path.to_path_buf(),
            source,
        });
    }
    info!("Wrote report");
    Ok(())
}
