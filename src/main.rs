//! # Aarhus Green Events
//!
//! Collects sustainability-related events from a fixed set of Aarhus event
//! listings and writes a small, ranked JSON feed for a static website.
//!
//! ## Usage
//!
//! ```sh
//! aarhus_green_events -o ./site/aarhus_sustainability_events.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Collecting**: Every source adapter is fetched, in roster order
//! 2. **Filtering**: Records not about sustainability are dropped
//! 3. **Merging**: Records are normalized and deduplicated by title
//! 4. **Labelling**: Each event gets one or more topical categories
//! 5. **Ranking**: Today's events first, then tomorrow's; the list is capped
//! 6. **Output**: The feed is written atomically as JSON
//!
//! A source that fails contributes no events; the run still succeeds. Only
//! failing to read the configuration or write the feed aborts the run.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use aggregator::{Aggregator, RunSettings};
use cli::Cli;
use config::PipelineConfig;
use outputs::json;
use pipeline::Pipeline;
use utils::truncate_for_log;

#[tokio::main]
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
    info!("aarhus_green_events starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = PipelineConfig::load(args.config.as_deref()).await?;

    // ---- Dump effective configuration ----
    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let pipeline = Pipeline::from_config(&config);

    // ---- Offline review of a single text ----
    if let Some(text) = args.check.as_deref() {
        let relevant = pipeline.relevance.is_relevant(text);
        let categories = pipeline.classifier.labels_for(text);
        info!(text = %truncate_for_log(text, 80), relevant, ?categories, "Checked text");
        println!("relevant: {relevant}");
        println!("categories: {}", categories.join(", "));
        return Ok(());
    }

    // ---- Build roster ----
    let timeout = Duration::from_secs(args.timeout_secs);
    let client = scrapers::http_client(timeout)?;
    let roster = scrapers::build_roster(&config, &client)?;
    info!(sources = roster.len(), "Roster ready");

    let settings = RunSettings {
        concurrency: usize::from(args.concurrency),
        delay: Duration::from_millis(args.delay_ms),
        adapter_timeout: timeout,
        deadline: args.deadline_secs.map(Duration::from_secs),
    };
    let aggregator = Aggregator::new(roster, pipeline, settings);

    // ---- Collect, process, assemble ----
    let (envelope, report) = aggregator.run().await;
    for source in &report.sources {
        info!(source = %source.source, harvested = source.harvested(), "Source summary");
    }
    for (source, e) in report.failures() {
        warn!(%source, error = %e, "Source contributed nothing this run");
    }

    // ---- Output ----
    if let Err(e) = json::write_envelope(&envelope, &args.output).await {
        error!(path = %args.output.display(), error = %e, "Failed to write event feed");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        events = envelope.metadata.total_events,
        path = %args.output.display(),
        "Execution complete"
    );

    Ok(())
}
