//! Front page scrapers.
//!
//! A scraper is split in two phases:
//!
//! 1. **Fetching**: download the raw markup of the page
//! 2. **Parsing**: turn the markup into one [`ItemFragment`](crate::models::ItemFragment)
//!    per story, grouping everything that belongs to a story while walking the document
//!
//! Parsing is kept free of I/O so it can be tested against captured markup.

pub mod hackernews;
