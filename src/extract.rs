//! Turn parsed story fragments into [`Item`]s.
//!
//! Only the identifier and the age marker are required. A missing score or
//! a "discuss" link in place of a comment count leaves the corresponding
//! field unset; such stories are dropped later by the filter.

use crate::config::ExtractPolicy;
use crate::error::{DigestError, Result};
use crate::models::{Item, ItemFragment};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};

/// Text between the "hide" link and the word "comment(s)".
static COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"hide \| (.+?)\scomment").unwrap());

/// Extract every story, in page order.
///
/// With [`ExtractPolicy::Skip`], stories without an id or an age are logged
/// and left out; with [`ExtractPolicy::Abort`] the first one fails the run.
#[instrument(level = "info", skip_all, fields(fragments = fragments.len(), ?policy))]
pub fn extract_items(
    fragments: &[ItemFragment],
    item_base_url: &str,
    policy: ExtractPolicy,
) -> Result<Vec<Item>> {
    let mut items = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.iter().enumerate() {
        match extract_item(index, fragment, item_base_url) {
            Ok(item) => items.push(item),
            Err(e) if policy == ExtractPolicy::Skip => {
                warn!(error = %e, title = %fragment.title, "Skipping story");
            }
            Err(e) => return Err(e),
        }
    }
    info!(count = items.len(), "Extracted stories");
    Ok(items)
}

/// Extract a single story; `index` is its position on the page.
pub fn extract_item(index: usize, fragment: &ItemFragment, item_base_url: &str) -> Result<Item> {
    let id = fragment
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(DigestError::MissingIdentifier { index })?;

    let age_raw = fragment
        .age
        .as_deref()
        .map(str::trim)
        .ok_or(DigestError::MissingAge { index })?;

    let item = Item {
        id: id.to_string(),
        title: fragment.title.trim().to_string(),
        external_link: fragment.href.clone().unwrap_or_default(),
        source_url: format!("{item_base_url}{id}"),
        votes: fragment.score.as_deref().and_then(parse_votes),
        comment_count: parse_comment_count(&fragment.subtext),
        age_raw: age_raw.to_string(),
        age_hours: None,
    };
    debug!(index, id = %item.id, votes = ?item.votes, comments = ?item.comment_count, "Extracted story");
    Ok(item)
}

/// `"77 points"` → 77. Anything before `" point"` that isn't a number is unset.
pub fn parse_votes(score: &str) -> Option<u32> {
    let count = match score.find(" point") {
        Some(pos) => &score[..pos],
        None => score,
    };
    count.trim().parse().ok()
}

/// `"... | hide | 24 comments"` → 24; `"... | hide | discuss"` → unset.
pub fn parse_comment_count(subtext: &str) -> Option<u32> {
    COMMENTS
        .captures(subtext)
        .and_then(|caps| caps[1].trim().parse().ok())
}
