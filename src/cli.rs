//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape every source and write the feed next to the site
/// aarhus_green_events -o ./site/aarhus_sustainability_events.json
///
/// # Fetch three sources at a time, give up after two minutes
/// aarhus_green_events --concurrency 3 --deadline-secs 120
///
/// # Check how a piece of text would be filtered and labelled
/// aarhus_green_events --check "Klima Workshop: lær om klima"
///
/// # Start a config file from the built-in tables
/// aarhus_green_events --print-config > events.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON feed to write
    #[arg(short, long, env = "EVENTS_OUTPUT", default_value = "aarhus_sustainability_events.json")]
    pub output: PathBuf,

    /// Optional path to a YAML file overriding keyword tables, sites or limits
    #[arg(short, long, env = "EVENTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of sources fetched at the same time
    #[arg(long, env = "EVENTS_CONCURRENCY", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Pause between sources in milliseconds (sequential runs only)
    #[arg(long, env = "EVENTS_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// Per-source fetch timeout in seconds
    #[arg(long, env = "EVENTS_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Stop starting new sources after this many seconds
    #[arg(long, env = "EVENTS_DEADLINE_SECS")]
    pub deadline_secs: Option<u64>,

    /// Print whether TEXT passes the relevance filter and its categories, then exit
    #[arg(long, value_name = "TEXT")]
    pub check: Option<String>,

    /// Print the effective configuration as YAML, then exit
    #[arg(long)]
    pub print_config: bool,
}
