//! Canonical field cleanup: trimming and defaults.

use crate::models::Event;

/// Fills the defaults every published event must carry.
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_location: String,
    default_category: String,
}

impl Normalizer {
    pub fn new(default_location: impl Into<String>, default_category: impl Into<String>) -> Self {
        Self {
            default_location: default_location.into(),
            default_category: default_category.into(),
        }
    }

    /// Trim `title` and `description`; default a blank `location` and `category`.
    ///
    /// Idempotent: normalizing twice gives the same record as normalizing once.
    pub fn normalize(&self, mut event: Event) -> Event {
        event.title = event.title.trim().to_string();
        event.description = event.description.trim().to_string();
        if event.location.trim().is_empty() {
            event.location = self.default_location.clone();
        }
        if event.category.trim().is_empty() {
            event.category = self.default_category.clone();
        }
        event
    }
}
