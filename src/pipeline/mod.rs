//! The pure part of a run: from per-source harvests to the ranked event list.
//!
//! # Stages
//!
//! 1. [`relevance`]: drop records not about sustainability (gated sources only)
//! 2. [`normalize`]: trim text, fill default location and category hint
//! 3. [`dedupe`]: keep the first record for each title
//! 4. [`classify`]: attach topical category labels
//! 5. [`rank`]: order by date tier and cap the list
//!
//! No stage can fail. Malformed records never get this far; the adapters
//! reject them.

pub mod classify;
pub mod dedupe;
pub mod normalize;
pub mod rank;
pub mod relevance;

use crate::config::PipelineConfig;
use crate::models::{Event, RawEvent};
use classify::Classifier;
use normalize::Normalizer;
use rank::Ranker;
use relevance::RelevanceFilter;
use tracing::debug;

/// One source's records, in the order the source produced them.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub source: String,
    /// Whether records must pass the relevance filter.
    pub gated: bool,
    pub events: Vec<RawEvent>,
}

/// All pipeline stages, configured once.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub relevance: RelevanceFilter,
    pub normalizer: Normalizer,
    pub classifier: Classifier,
    pub ranker: Ranker,
}

impl Pipeline {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            relevance: RelevanceFilter::new(&config.relevance_keywords),
            normalizer: Normalizer::new(
                config.default_location.clone(),
                config.default_category_hint.clone(),
            ),
            classifier: Classifier::new(&config.categories, config.fallback_category.clone()),
            ranker: Ranker::new(config.max_events),
        }
    }

    /// Filter and normalize each contribution, then merge them in the given order.
    ///
    /// Contribution order is the deduplication precedence, so callers must
    /// pass them in roster order.
    pub fn merge(&self, contributions: Vec<Contribution>) -> Vec<Event> {
        let mut pool = Vec::new();
        for contribution in contributions {
            let offered = contribution.events.len();
            let before = pool.len();
            pool.extend(
                contribution
                    .events
                    .into_iter()
                    .filter(|raw| !contribution.gated || self.relevance.is_relevant(&raw.haystack()))
                    .map(|raw| self.normalizer.normalize(Event::from(raw))),
            );
            debug!(
                source = %contribution.source,
                offered,
                kept = pool.len() - before,
                "Merged contribution"
            );
        }
        pool
    }

    /// Run every stage and return the final, ranked events.
    pub fn process(&self, contributions: Vec<Contribution>) -> Vec<Event> {
        let pool = self.merge(contributions);
        let unique = dedupe::dedupe(pool);
        let classified = unique
            .into_iter()
            .map(|event| self.classifier.classify(event))
            .collect();
        self.ranker.rank(classified)
    }
}
