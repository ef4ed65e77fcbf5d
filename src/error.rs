//! Error types for the digest pipeline.
//!
//! Everything that can abort a run is a [`DigestError`]. Stories that are
//! merely missing a score, a comment count or a parsable age are not errors;
//! they are dropped by the filter and sorter instead.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal (or policy-dependent) failures raised while producing a digest.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The front page could not be retrieved.
    #[error("failed to fetch front page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A story row had no `id` attribute.
    #[error("story #{index} has no identifier")]
    MissingIdentifier { index: usize },

    /// A story's subtext row had no age marker.
    #[error("story #{index} has no age marker")]
    MissingAge { index: usize },

    /// The YAML config file could not be read or parsed.
    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A URL in the configuration does not parse.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The last-run timestamp could not be overwritten.
    #[error("failed to update run state at {path}: {source}")]
    RunState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be written.
    #[error("failed to write report to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render record: {0}")]
    Render(#[from] serde_json::Error),

    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
