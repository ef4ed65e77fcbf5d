//! Output generation.
//!
//! # Submodules
//!
//! - [`report`]: Renders the partitioned stories as a flat text report and
//!   writes it in place of the previous one
//!
//! # Output Structure
//!
//! ```text
//! output/
//! └── hn.txt          # overwritten on every run
//! /tmp/old_date       # last run timestamp (see crate::run_state)
//! ```

pub mod report;
