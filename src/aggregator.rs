//! Runs the adapter roster and turns its output into the published feed.
//!
//! Adapters are independent, so they may be fetched concurrently. Their
//! results are still collected in roster order: that order decides which
//! source wins when two list the same title.
//!
//! Every adapter outcome is recorded in a [`RunReport`]. A failed, timed-out
//! or skipped source simply contributes no events.

use crate::models::Envelope;
use crate::pipeline::{Contribution, Pipeline};
use crate::scrapers::{AdapterError, Harvest, SourceAdapter};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, error, info, instrument, warn};

/// Knobs for how adapters are invoked; none of them change the result set
/// beyond which sources get to contribute.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Adapters fetched at once. 1 means strictly sequential.
    pub concurrency: usize,
    /// Pause before each remote adapter when running sequentially.
    pub delay: Duration,
    /// Upper bound on a single adapter's fetch.
    pub adapter_timeout: Duration,
    /// Adapters not started before this much time has passed are skipped.
    pub deadline: Option<Duration>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            concurrency: 1,
            delay: Duration::from_secs(1),
            adapter_timeout: Duration::from_secs(15),
            deadline: None,
        }
    }
}

/// What happened to one source this run.
#[derive(Debug)]
pub enum Outcome {
    Harvested(Harvest),
    Failed(AdapterError),
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub gated: bool,
    pub outcome: Outcome,
}

impl SourceReport {
    pub fn harvested(&self) -> usize {
        match &self.outcome {
            Outcome::Harvested(h) => h.events.len(),
            Outcome::Failed(_) => 0,
        }
    }
}

/// Per-source outcomes of a run, in roster order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &AdapterError)> {
        self.sources.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed(e) => Some((r.source.as_str(), e)),
            Outcome::Harvested(_) => None,
        })
    }

    pub fn total_harvested(&self) -> usize {
        self.sources.iter().map(SourceReport::harvested).sum()
    }

    pub fn total_skipped_items(&self) -> usize {
        self.sources
            .iter()
            .map(|r| match &r.outcome {
                Outcome::Harvested(h) => h.skipped,
                Outcome::Failed(_) => 0,
            })
            .sum()
    }
}

/// Owns the roster and the pipeline; produces one [`Envelope`] per run.
pub struct Aggregator {
    roster: Vec<Box<dyn SourceAdapter>>,
    pipeline: Pipeline,
    settings: RunSettings,
}

impl Aggregator {
    pub fn new(roster: Vec<Box<dyn SourceAdapter>>, pipeline: Pipeline, settings: RunSettings) -> Self {
        Self {
            roster,
            pipeline,
            settings,
        }
    }

    /// Source identifiers in roster order, as listed in the feed metadata.
    pub fn source_ids(&self) -> Vec<String> {
        self.roster.iter().map(|a| a.id().to_string()).collect()
    }

    /// Fetch every source. The returned reports are in roster order.
    #[instrument(level = "info", skip_all, fields(sources = self.roster.len(), concurrency = self.settings.concurrency))]
    pub async fn collect(&self) -> RunReport {
        let started = Instant::now();
        let deadline = self.settings.deadline.map(|d| started + d);
        let concurrency = self.settings.concurrency.max(1);
        let sequential = concurrency == 1;

        let sources = stream::iter(self.roster.iter().enumerate())
            .map(|(index, adapter)| async move {
                if sequential && index > 0 && adapter.is_remote() && !self.settings.delay.is_zero() {
                    sleep(self.settings.delay).await;
                }
                let outcome = self.invoke(&**adapter, deadline).await;
                SourceReport {
                    source: adapter.id().to_string(),
                    gated: adapter.requires_relevance(),
                    outcome,
                }
            })
            // `buffered`, not `buffer_unordered`: completion order must not reorder the merge.
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        let report = RunReport { sources };
        info!(
            harvested = report.total_harvested(),
            skipped_items = report.total_skipped_items(),
            failed_sources = report.failures().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Collected all sources"
        );
        report
    }

    async fn invoke(&self, adapter: &dyn SourceAdapter, deadline: Option<Instant>) -> Outcome {
        let id = adapter.id();
        let mut limit = self.settings.adapter_timeout;
        if let Some(deadline) = deadline {
            let now = Instant::now();
            if now >= deadline {
                warn!(source = %id, "Run deadline passed; skipping source");
                return Outcome::Failed(AdapterError::DeadlineExceeded);
            }
            limit = limit.min(deadline - now);
        }

        debug!(source = %id, ?limit, "Fetching source");
        match timeout(limit, adapter.fetch()).await {
            Ok(Ok(harvest)) => {
                info!(
                    source = %id,
                    count = harvest.events.len(),
                    skipped = harvest.skipped,
                    "Source harvested"
                );
                Outcome::Harvested(harvest)
            }
            Ok(Err(e)) => {
                error!(source = %id, error = %e, "Source failed; contributing no events");
                Outcome::Failed(e)
            }
            Err(_) => {
                warn!(source = %id, ?limit, "Source timed out; contributing no events");
                Outcome::Failed(AdapterError::TimedOut(limit))
            }
        }
    }

    /// Run the pure pipeline over a finished report.
    pub fn assemble(&self, report: &RunReport) -> Envelope {
        let contributions = report
            .sources
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Harvested(harvest) => Some(Contribution {
                    source: r.source.clone(),
                    gated: r.gated,
                    events: harvest.events.clone(),
                }),
                Outcome::Failed(_) => None,
            })
            .collect();
        let events = self.pipeline.process(contributions);
        let envelope = Envelope::new(self.source_ids(), events);

        for (category, count) in envelope.category_counts() {
            info!(%category, count, "Category summary");
        }
        envelope
    }

    /// Collect every source and assemble the feed.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> (Envelope, RunReport) {
        let report = self.collect().await;
        let envelope = self.assemble(&report);
        info!(total_events = envelope.metadata.total_events, "Feed assembled");
        (envelope, report)
    }
}
