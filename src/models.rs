//! Data models for scraped events and the published feed.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawEvent`]: An event record as produced by a source adapter
//! - [`Event`]: The canonical, normalized and categorized record
//! - [`Envelope`]: The final feed written to disk, with its [`Metadata`]
//!
//! `date` and `time` are carried as opaque display text. Listing sites write
//! dates in free-form Danish or English ("I dag", "Tue, 9 Dec", "Kommer snart"),
//! so nothing downstream attempts to parse them.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default weight an adapter assigns to an event when it has no reason to differ.
pub const DEFAULT_POINTS: u32 = 100;

fn default_points() -> u32 {
    DEFAULT_POINTS
}

/// An event record as produced by a source adapter.
///
/// `title` and `link` are required; adapters reject listing entries that lack
/// either before a `RawEvent` is ever built. The link is already absolute.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub link: String,
    /// Identifier of the adapter (or curated list) the record came from.
    pub source: String,
    /// Legacy single-category hint assigned by the source.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl RawEvent {
    /// Build a record with only the required fields set.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: String::new(),
            time: None,
            location: None,
            address: None,
            link: link.into(),
            source: source.into(),
            category: None,
            image: None,
            organizer: None,
            points: DEFAULT_POINTS,
        }
    }

    /// The text the relevance filter and classifier look at.
    pub fn haystack(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

/// The canonical event record, as published in the feed.
///
/// Every optional field of [`RawEvent`] is flattened to a (possibly empty)
/// string. `categories` is filled in by the classifier and is never empty in
/// a published feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub address: String,
    pub link: String,
    pub source: String,
    pub category: String,
    pub categories: Vec<String>,
    pub image: String,
    pub organizer: String,
    pub points: u32,
}

impl Event {
    /// Lower-cased `title + " " + description`, used by the classifier.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Self {
            title: raw.title,
            description: raw.description.unwrap_or_default(),
            date: raw.date,
            time: raw.time.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            link: raw.link,
            source: raw.source,
            category: raw.category.unwrap_or_default(),
            categories: Vec::new(),
            image: raw.image.unwrap_or_default(),
            organizer: raw.organizer.unwrap_or_default(),
            points: raw.points,
        }
    }
}

/// Feed metadata.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    /// Generation time, ISO-8601.
    pub last_updated: String,
    /// Always equal to the length of [`Envelope::events`].
    pub total_events: usize,
    /// Identifiers of every source in the roster, in roster order.
    pub sources: Vec<String>,
}

/// The feed written to disk: metadata plus the ranked, truncated events.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    pub metadata: Metadata,
    pub events: Vec<Event>,
}

impl Envelope {
    /// Wrap `events`, stamping the current local time.
    pub fn new(sources: Vec<String>, events: Vec<Event>) -> Self {
        Self {
            metadata: Metadata {
                last_updated: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
                total_events: events.len(),
                sources,
            },
            events,
        }
    }

    /// Number of events carrying each category label, sorted by label.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            for category in &event.categories {
                *counts.entry(category.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        let mut raw = RawEvent::new("Repair Café", "https://repaircafeaarhus.dk", "Repair Café Aarhus");
        raw.description = Some("Bring broken items".to_string());
        let mut event = Event::from(raw);
        event.categories = vec!["repair".to_string()];
        event
    }

    #[test]
    fn test_raw_event_defaults() {
        let raw = RawEvent::new("Title", "https://example.com", "example.com");
        assert_eq!(raw.points, 100);
        assert_eq!(raw.description, None);
        assert_eq!(raw.haystack(), "Title ");
    }

    #[test]
    fn test_raw_event_deserialization_fills_defaults() {
        let json = r##"{"title": "Loppemarked", "link": "#", "source": "manual"}"##;
        let raw: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(raw.points, 100);
        assert_eq!(raw.date, "");
        assert!(raw.location.is_none());
    }

    #[test]
    fn test_event_from_raw_flattens_options() {
        let event = Event::from(RawEvent::new("T", "https://x.dk", "x.dk"));
        assert_eq!(event.description, "");
        assert_eq!(event.time, "");
        assert_eq!(event.organizer, "");
        assert!(event.categories.is_empty());
    }

    #[test]
    fn test_event_haystack_is_lowercase() {
        let event = sample_event();
        assert_eq!(event.haystack(), "repair café bring broken items");
    }

    #[test]
    fn test_envelope_serialization_shape() {
        let envelope = Envelope::new(vec!["a.dk".to_string()], vec![sample_event()]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["metadata"]["total_events"], 1);
        assert_eq!(value["metadata"]["sources"][0], "a.dk");
        assert!(value["metadata"]["last_updated"].is_string());

        let event = value["events"][0].as_object().unwrap();
        let mut keys: Vec<&str> = event.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "address", "categories", "category", "date", "description", "image", "link",
                "location", "organizer", "points", "source", "time", "title",
            ]
        );
        assert!(event["points"].is_u64());
    }

    #[test]
    fn test_category_counts() {
        let mut second = sample_event();
        second.categories = vec!["repair".to_string(), "community".to_string()];
        let envelope = Envelope::new(vec![], vec![sample_event(), second]);
        let counts = envelope.category_counts();
        assert_eq!(counts.get("repair"), Some(&2));
        assert_eq!(counts.get("community"), Some(&1));
    }
}
