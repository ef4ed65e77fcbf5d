//! # hn_digest
//!
//! Scrapes the Hacker News front page, keeps the stories that clear a vote,
//! comment and keyword filter, and writes them to a flat text report split
//! into stories seen before and stories posted since the previous run.
//!
//! ## Usage
//!
//! ```sh
//! hn_digest                                  # defaults, e.g. from cron
//! hn_digest --config hn.yaml --output ~/hn.txt
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pass:
//! 1. **Fetching**: download the front page
//! 2. **Parsing**: group each story's rows into one fragment
//! 3. **Run state**: read the previous run time, record the current one
//! 4. **Pipeline**: extract, normalize ages, filter, sort and partition
//! 5. **Output**: render, scrub and atomically replace the report

use chrono::{Local, SubsecRound};
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod extract;
mod filter;
mod models;
mod normalize;
mod outputs;
mod partition;
mod pipeline;
mod run_state;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use outputs::report;
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hn_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load(&args)?;
    debug!(?config, "Effective configuration");

    // Early check: the report directory must be writable before we touch anything
    if let Some(dir) = config.report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir.display(),
                error = %e,
                "Report directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch, parse, advance run state, pipeline ----
    // Whole seconds, matching what the state file can hold.
    let now = Local::now().naive_local().trunc_subsecs(0);
    let partition = pipeline::run(&config, now).await?;
    if partition.is_empty() {
        info!("No stories cleared the filter");
    }

    // ---- Output ----
    let text = report::render_report(&partition, config.when_nothing_new)?;
    report::write_report_atomic(&config.report_path, &text).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %config.report_path.display(),
        stories = partition.len(),
        older = partition.older.len(),
        new = partition.new.len(),
        "Execution complete"
    );

    Ok(())
}
