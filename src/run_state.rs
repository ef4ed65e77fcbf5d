//! The persisted "last run" timestamp.
//!
//! A single text file holds the local time of the previous invocation as
//! `YYYY-MM-DD HH:MM:SS`. Once the front page has been fetched it is read
//! and immediately replaced with the current time, before any extraction or
//! filtering happens.

use crate::error::{DigestError, Result};
use crate::models::{RunWindow, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Timestamp stored at `path`, or `None` if the file is missing or garbled.
pub async fn read_last_run(path: &Path) -> Option<NaiveDateTime> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "No previous run recorded");
            return None;
        }
    };
    let line = contents.lines().next().unwrap_or_default().trim();
    match NaiveDateTime::parse_from_str(line, TIMESTAMP_FORMAT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(path = %path.display(), contents = %line, error = %e, "Unreadable run state; treating as first run");
            None
        }
    }
}

/// Record `now` as the last run.
pub async fn write_last_run(path: &Path, now: NaiveDateTime) -> Result<()> {
    let wrap = |source| DigestError::RunState {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(wrap)?;
    }
    fs::write(path, now.format(TIMESTAMP_FORMAT).to_string())
        .await
        .map_err(wrap)
}

/// Read the previous run and overwrite it with `now`.
///
/// Without a usable previous timestamp the window is empty (previous ==
/// now), so nothing counts as new on a first run.
#[instrument(level = "info", skip_all, fields(path = %path.display(), now = %now))]
pub async fn advance(path: &Path, now: NaiveDateTime) -> Result<RunWindow> {
    let previous = read_last_run(path).await.unwrap_or(now);
    write_last_run(path, now).await?;
    let window = RunWindow { previous, now };
    info!(%previous, %now, elapsed_hours = window.elapsed_hours(), "Advanced run state");
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_first_run_uses_now() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old_date");
        let now = ts("2025-05-06 18:00:00");

        let window = advance(&path, now).await.unwrap();
        assert_eq!(window.previous, now);
        assert_eq!(window.elapsed_hours(), 0.0);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "2025-05-06 18:00:00"
        );
    }

    #[tokio::test]
    async fn test_second_run_sees_previous() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state").join("old_date");

        advance(&path, ts("2025-05-06 06:00:00")).await.unwrap();
        let window = advance(&path, ts("2025-05-06 18:00:00")).await.unwrap();
        assert_eq!(window.previous, ts("2025-05-06 06:00:00"));
        assert_eq!(window.elapsed_hours(), 12.0);
    }

    #[tokio::test]
    async fn test_garbled_state_is_first_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old_date");
        std::fs::write(&path, "yesterday-ish").unwrap();

        assert_eq!(read_last_run(&path).await, None);
        let now = ts("2025-05-06 18:00:00");
        let window = advance(&path, now).await.unwrap();
        assert_eq!(window.previous, now);
    }

    #[tokio::test]
    async fn test_reads_first_line_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old_date");
        std::fs::write(&path, "2025-05-06 06:00:00\nextra\n").unwrap();
        assert_eq!(read_last_run(&path).await, Some(ts("2025-05-06 06:00:00")));
    }

    #[tokio::test]
    async fn test_unwritable_state_is_fatal() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be.
        let err = write_last_run(tmp.path(), ts("2025-05-06 06:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, DigestError::RunState { .. }));
    }
}
