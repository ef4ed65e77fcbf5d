//! Runtime configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults (the values below)
//! 2. An optional YAML file passed with `--config`
//! 3. Command-line flags / environment variables (see [`crate::cli`])
//!
//! # Example
//!
//! ```yaml
//! vote_threshold: 50
//! comment_threshold: 10
//! exclusion_keywords: [dead, flagged, youtube, wikipedia, crypto]
//! on_missing_field: abort
//! when_nothing_new: all_new
//! ```

use crate::cli::Cli;
use crate::error::{DigestError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_FRONT_PAGE_URL: &str = "https://news.ycombinator.com/news";
pub const DEFAULT_ITEM_BASE_URL: &str = "https://news.ycombinator.com/item?id=";

/// What the extractor does with a story lacking an id or an age marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractPolicy {
    /// Log the story and carry on with the next one.
    #[default]
    Skip,
    /// Fail the whole run.
    Abort,
}

/// How the report handles a run where no story is younger than the gap
/// since the previous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Everything is "older"; the new section says nothing is new.
    #[default]
    Placeholder,
    /// Everything is "older"; the new section is left blank.
    Empty,
    /// Everything is reported as new.
    AllNew,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub front_page_url: String,
    pub item_base_url: String,
    /// Stories need strictly more votes than this.
    pub vote_threshold: u32,
    /// Stories need strictly more comments than this.
    pub comment_threshold: u32,
    /// Case-insensitive substrings that disqualify a title or link.
    pub exclusion_keywords: Vec<String>,
    pub on_missing_field: ExtractPolicy,
    pub when_nothing_new: DegeneratePolicy,
    pub report_path: PathBuf,
    pub state_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            front_page_url: DEFAULT_FRONT_PAGE_URL.to_string(),
            item_base_url: DEFAULT_ITEM_BASE_URL.to_string(),
            vote_threshold: 5,
            comment_threshold: 1,
            exclusion_keywords: ["dead", "flagged", "youtube", "wikipedia"]
                .into_iter()
                .map(String::from)
                .collect(),
            on_missing_field: ExtractPolicy::Skip,
            when_nothing_new: DegeneratePolicy::Placeholder,
            report_path: PathBuf::from("output/hn.txt"),
            state_path: PathBuf::from("/tmp/old_date"),
        }
    }
}

impl Config {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Read and parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| DigestError::Config {
            path: path.to_path_buf(),
            source,
        };
        let yaml = std::fs::read_to_string(path).map_err(|e| wrap(Box::new(e)))?;
        let config = Self::from_yaml(&yaml).map_err(|e| wrap(Box::new(e)))?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Build the effective configuration from the command line.
    pub fn load(args: &Cli) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(args);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, args: &Cli) {
        if let Some(url) = &args.url {
            self.front_page_url = url.clone();
        }
        if let Some(output) = &args.output {
            self.report_path = output.clone();
        }
        if let Some(state_file) = &args.state_file {
            self.state_path = state_file.clone();
        }
    }

    /// Check the URLs and lowercase the keywords once up front.
    pub fn validate(&mut self) -> Result<()> {
        for url in [&self.front_page_url, &self.item_base_url] {
            Url::parse(url).map_err(|source| DigestError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
        }
        self.exclusion_keywords = self
            .exclusion_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Ok(())
    }
}
