//! Title-keyed deduplication.
//!
//! Two records are the same event iff their trimmed, lower-cased titles are
//! equal, regardless of source or link. The first record wins; later ones
//! are dropped whole, never merged into it.

use crate::models::Event;
use itertools::Itertools;

/// The identity key of an event.
pub fn identity_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Keep the first event for each identity key, preserving input order.
pub fn dedupe(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .unique_by(|event| identity_key(&event.title))
        .collect()
}
