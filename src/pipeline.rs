//! One run of the digest, from the front page to partitioned stories.
//!
//! The last-run timestamp is only advanced once the front page has been
//! fetched, so a failed fetch leaves the state file untouched.

use crate::config::Config;
use crate::error::Result;
use crate::extract::extract_items;
use crate::filter::filter_items;
use crate::models::{ItemFragment, ReportPartition, RunWindow};
use crate::normalize::normalize_items;
use crate::partition::partition;
use crate::run_state;
use crate::scrapers::hackernews::{fetch_front_page, parse_front_page};
use crate::utils::truncate_for_log;
use chrono::NaiveDateTime;
use tracing::warn;

/// Fetch the front page and digest it.
pub async fn run(config: &Config, now: NaiveDateTime) -> Result<ReportPartition> {
    let html = fetch_front_page(&config.front_page_url).await?;
    digest_markup(&html, config, now).await
}

/// Parse fetched markup, advance the run state and build the partition.
pub async fn digest_markup(
    html: &str,
    config: &Config,
    now: NaiveDateTime,
) -> Result<ReportPartition> {
    let fragments = parse_front_page(html);
    if fragments.is_empty() {
        warn!(
            preview = %truncate_for_log(html, 300),
            "No stories found on the front page; markup may have changed"
        );
    }
    let window = run_state::advance(&config.state_path, now).await?;
    build_report(&fragments, config, window)
}

/// Extract, normalize, filter, sort and partition the front page stories.
pub fn build_report(
    fragments: &[ItemFragment],
    config: &Config,
    window: RunWindow,
) -> Result<ReportPartition> {
    let mut items = extract_items(fragments, &config.item_base_url, config.on_missing_field)?;
    normalize_items(&mut items);
    let admitted = filter_items(items, config);
    Ok(partition(admitted, window, config.when_nothing_new))
}
