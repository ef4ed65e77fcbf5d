//! Hacker News front page scraper.
//!
//! Each story on the front page spans two table rows:
//!
//! ```text
//! <tr class="athing" id="22897846">        id + title link (.titleline > a)
//! <tr><td class="subtext">                 .score, .age, "hide | 24 comments"
//! ```
//!
//! The parser pairs every `tr.athing` row with the subtext cell of the row
//! that follows it, so the fields of a story can never drift apart.

use crate::error::Result;
use crate::models::ItemFragment;
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::get;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

static STORY_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.athing").unwrap());
// `a.storylink` is the pre-2022 markup.
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".titleline > a, a.storylink").unwrap());
static SUBTEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("td.subtext").unwrap());
static SCORE: Lazy<Selector> = Lazy::new(|| Selector::parse(".score").unwrap());
static AGE: Lazy<Selector> = Lazy::new(|| Selector::parse(".age").unwrap());

/// Download the front page markup.
///
/// A transport error or a non-success status aborts the run.
#[instrument(level = "info")]
pub async fn fetch_front_page(url: &str) -> Result<String> {
    let html = get(url).await?.error_for_status()?.text().await?;
    info!(bytes = html.len(), "Fetched front page");
    Ok(html)
}

/// Parse front page markup into one fragment per story, in page order.
#[instrument(level = "info", skip_all)]
pub fn parse_front_page(html: &str) -> Vec<ItemFragment> {
    let document = Html::parse_document(html);

    let fragments: Vec<ItemFragment> = document
        .select(&STORY_ROW)
        .map(|row| {
            let mut fragment = ItemFragment {
                id: row.value().attr("id").map(str::to_string),
                ..ItemFragment::default()
            };

            if let Some(link) = row.select(&TITLE_LINK).next() {
                fragment.title = visible_text(&link);
                fragment.href = link.value().attr("href").map(str::to_string);
            }

            match subtext_for(&row) {
                Some(subtext) => {
                    fragment.subtext = visible_text(&subtext);
                    fragment.score = subtext.select(&SCORE).next().map(|e| visible_text(&e));
                    fragment.age = subtext.select(&AGE).next().map(|e| visible_text(&e));
                }
                None => warn!(id = ?fragment.id, "Story row has no subtext row"),
            }
            fragment
        })
        .collect();

    info!(count = fragments.len(), "Parsed front page stories");
    debug!(ids = ?fragments.iter().map(|f| f.id.as_deref()).collect::<Vec<_>>(), "Story ids");
    fragments
}

/// The subtext cell in the element row right after a story row.
fn subtext_for<'a>(row: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let next_row = row.next_siblings().find_map(ElementRef::wrap)?;
    next_row.select(&SUBTEXT).next()
}

/// Text content with runs of whitespace (including `&nbsp;`) collapsed.
fn visible_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}
