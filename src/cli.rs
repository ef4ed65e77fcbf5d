//! Command-line interface definitions for hn_digest.
//!
//! Every flag is optional. Without any, the digest runs with the built-in
//! defaults from [`crate::config::Config`], which is how it is meant to be
//! scheduled from cron.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for hn_digest.
///
/// # Examples
///
/// ```sh
/// # Defaults: front page -> output/hn.txt, last run kept in /tmp/old_date
/// hn_digest
///
/// # Custom thresholds and locations
/// hn_digest --config ~/.config/hn_digest.yaml --output ~/hn.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "HN_DIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report file, overwritten on every run
    #[arg(short, long, env = "HN_DIGEST_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File holding the timestamp of the previous run
    #[arg(short, long, env = "HN_DIGEST_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Front page URL to scrape
    #[arg(long, env = "HN_DIGEST_URL")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::parse_from(["hn_digest"]);
        assert!(cli.config.is_none());
        assert!(cli.url.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "hn_digest",
            "-c",
            "/etc/hn.yaml",
            "-o",
            "/tmp/hn.txt",
            "-s",
            "/tmp/last",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/hn.yaml")));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/hn.txt")));
        assert_eq!(cli.state_file, Some(PathBuf::from("/tmp/last")));
    }

    #[test]
    fn test_cli_long_url() {
        let cli = Cli::parse_from(["hn_digest", "--url", "https://news.ycombinator.com/best"]);
        assert_eq!(cli.url.as_deref(), Some("https://news.ycombinator.com/best"));
    }
}
