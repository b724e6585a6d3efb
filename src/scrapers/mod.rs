//! Source adapters for the Aarhus event listings.
//!
//! Every source implements [`SourceAdapter`]: it takes no input and yields the
//! events currently listed at one place. The pipeline only ever sees the
//! [`Harvest`] an adapter returns, never the markup it came from.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | migogaarhus.dk, tipaarhus.dk, visitaarhus.dk, aarhusliv.dk, aarhusevents.dk, aarhusinside.dk, domen.aarhus.dk, godsbanen.dk | [`site`] | HTML scraping | One [`site::SiteSpec`] row each, see [`sites`] |
//! | klimahusetaarhus.dk | [`site`] | HTML scraping | Not relevance-gated: the whole listing is climate-related |
//! | Facebook (PDF analysis) | [`curated`] | Static list | Hand-transcribed from a PDF; never touches the network |
//!
//! # Failure Model
//!
//! An adapter never panics and never aborts the run. A broken listing entry
//! is skipped and counted in [`Harvest::skipped`]; a broken source returns an
//! [`AdapterError`], which the aggregator records and treats as an empty
//! contribution.

pub mod curated;
pub mod site;
pub mod sites;

use crate::config::PipelineConfig;
use crate::models::RawEvent;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Why a whole source contributed nothing.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("run deadline exceeded before the source was fetched")]
    DeadlineExceeded,
}

/// Why a single listing entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("entry has no title")]
    MissingTitle,

    #[error("entry has no link")]
    MissingLink,

    #[error("link {href:?} cannot be resolved against {base}")]
    UnresolvableLink { href: String, base: String },
}

/// What one adapter produced in one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Harvest {
    pub events: Vec<RawEvent>,
    /// Number of listing entries dropped because they failed to parse.
    pub skipped: usize,
}

/// A producer of raw events from one external source.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fixed identifier stamped on every record and listed in the feed metadata.
    fn id(&self) -> &str;

    /// Whether records must pass the relevance filter before entering the pool.
    fn requires_relevance(&self) -> bool {
        true
    }

    /// Whether fetching hits the network (and so deserves a courtesy delay).
    fn is_remote(&self) -> bool {
        true
    }

    async fn fetch(&self) -> Result<Harvest, AdapterError>;
}

/// Build the shared HTTP client used by every site adapter.
///
/// Sends browser-like headers with a Danish language preference; several of
/// the listing sites serve an empty shell to unknown agents.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("da-DK,da;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}

/// Assemble the full roster: every configured site in order, then the curated list.
///
/// Fails only on configuration mistakes (bad selector, bad base URL); those
/// are caught at start-up rather than silently dropping a source every run.
pub fn build_roster(
    config: &PipelineConfig,
    client: &Client,
) -> Result<Vec<Box<dyn SourceAdapter>>, AdapterError> {
    let mut roster: Vec<Box<dyn SourceAdapter>> = Vec::with_capacity(config.sites.len() + 1);
    for spec in &config.sites {
        roster.push(Box::new(site::SiteAdapter::new(spec.clone(), client.clone())?));
    }
    roster.push(Box::new(curated::CuratedSource::new(
        config.curated_label.clone(),
        config.curated.clone(),
    )));
    Ok(roster)
}
