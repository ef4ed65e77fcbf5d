//! Admission filter: minimum votes, minimum comments and keyword exclusions.

use crate::config::Config;
use crate::models::Item;
use tracing::{debug, info};

/// Whether a story makes it into the report.
///
/// Both the vote and comment counts must be set and strictly above their
/// thresholds, and no exclusion keyword may appear (case-insensitively) in
/// either the title or the external link. Keywords are expected lowercased,
/// which [`Config::validate`] takes care of.
pub fn admits(item: &Item, config: &Config) -> bool {
    let (Some(votes), Some(comments)) = (item.votes, item.comment_count) else {
        return false;
    };
    votes > config.vote_threshold
        && comments > config.comment_threshold
        && !contains_any(&item.title, &config.exclusion_keywords)
        && !contains_any(&item.external_link, &config.exclusion_keywords)
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Keep the admitted stories, in their original order.
pub fn filter_items(items: Vec<Item>, config: &Config) -> Vec<Item> {
    let total = items.len();
    let kept: Vec<Item> = items
        .into_iter()
        .filter(|item| {
            let keep = admits(item, config);
            if !keep {
                debug!(id = %item.id, title = %item.title, votes = ?item.votes, comments = ?item.comment_count, "Filtered out");
            }
            keep
        })
        .collect();
    info!(total, kept = kept.len(), "Applied filter");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(votes: Option<u32>, comments: Option<u32>, title: &str, link: &str) -> Item {
        Item {
            id: "1".into(),
            title: title.into(),
            external_link: link.into(),
            source_url: "https://news.ycombinator.com/item?id=1".into(),
            votes,
            comment_count: comments,
            age_raw: "1 hour ago".into(),
            age_hours: Some(1.0),
        }
    }

    #[test]
    fn test_vote_threshold_is_strict() {
        let config = Config::default();
        assert!(!admits(&item(Some(5), Some(2), "Clean", "https://a.example"), &config));
        assert!(admits(&item(Some(6), Some(2), "Clean", "https://a.example"), &config));
    }

    #[test]
    fn test_comment_threshold_is_strict() {
        let config = Config::default();
        assert!(!admits(&item(Some(100), Some(1), "Clean", ""), &config));
    }

    #[test]
    fn test_unset_counts_are_excluded() {
        let config = Config::default();
        assert!(!admits(&item(None, Some(50), "Clean", ""), &config));
        assert!(!admits(&item(Some(50), None, "Clean", ""), &config));
    }

    #[test]
    fn test_keyword_in_title() {
        let config = Config::default();
        assert!(!admits(
            &item(Some(6), Some(2), "dead project revived", "https://a.example"),
            &config
        ));
        assert!(!admits(&item(Some(6), Some(2), "Watch on YouTube", ""), &config));
    }

    #[test]
    fn test_keyword_in_link() {
        let config = Config::default();
        assert!(!admits(
            &item(Some(6), Some(2), "Alan Turing", "https://en.Wikipedia.org/wiki/Alan_Turing"),
            &config
        ));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let config = Config::default();
        let items = vec![
            item(Some(6), Some(2), "Clean", "https://a.example"),
            item(Some(6), Some(2), "flagged", ""),
            item(Some(3), Some(20), "Low score", ""),
            item(Some(60), Some(20), "Another", "https://b.example"),
        ];
        let once = filter_items(items, &config);
        assert_eq!(once.len(), 2);
        let twice = filter_items(once.clone(), &config);
        assert_eq!(once, twice);
    }
}
