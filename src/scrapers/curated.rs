//! Hand-transcribed events from sources that cannot be scraped.
//!
//! The entries below were copied out of a PDF export of Facebook event
//! listings. They go through the same relevance filter as scraped entries,
//! so unrelated ones (karaoke nights and the like) drop out on their own.

use super::{AdapterError, Harvest, SourceAdapter};
use crate::models::RawEvent;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Metadata label of the curated list.
pub const CURATED_LABEL: &str = "Facebook (PDF analysis)";

#[allow(clippy::too_many_arguments)]
fn entry(
    title: &str,
    description: &str,
    date: &str,
    time: &str,
    location: &str,
    address: &str,
    link: &str,
    source: &str,
    category: &str,
    organizer: &str,
    points: u32,
) -> RawEvent {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
    RawEvent {
        description: opt(description),
        date: date.to_string(),
        time: opt(time),
        location: opt(location),
        address: opt(address),
        category: opt(category),
        organizer: opt(organizer),
        points,
        ..RawEvent::new(title, link, source)
    }
}

/// The built-in curated records. Points reflect a manual judgement per category.
pub fn default_records() -> Vec<RawEvent> {
    vec![
        entry(
            "Queers & Coffee - at Studenterhus Aarhus",
            "Social gathering for the queer community at Studenterhus Aarhus",
            "Today",
            "16:30",
            "Studenterhus Aarhus",
            "",
            "#",
            "Facebook (PDF)",
            "community",
            "Studenterhus Aarhus",
            80,
        ),
        entry(
            "Italiensk Fællesspisning",
            "Italian community dinner and social gathering",
            "Today",
            "17:00",
            "Katrinebjergvej 77K",
            "Katrinebjergvej 77K, Aarhus",
            "#",
            "Facebook (PDF)",
            "food",
            "Local community",
            80,
        ),
        entry(
            "Christmas Karaoke",
            "Christmas karaoke night at Studenterhus Aarhus",
            "Tue, 9 Dec",
            "20:00",
            "Studenterhus Aarhus",
            "",
            "#",
            "Facebook (PDF)",
            "music",
            "Studenterhus Aarhus",
            60,
        ),
        entry(
            "Repair Café Aarhus",
            "Bring broken items and learn to repair them with volunteers",
            "Regular event",
            "Check schedule",
            "Godsbanen",
            "Skovgaardsgade 3, 8000 Aarhus C",
            "https://repaircafeaarhus.dk",
            "Repair Café Aarhus",
            "repair",
            "Repair Café Aarhus",
            100,
        ),
    ]
}

/// A source backed by a fixed list of records.
#[derive(Debug, Clone)]
pub struct CuratedSource {
    label: String,
    records: Vec<RawEvent>,
}

impl CuratedSource {
    pub fn new(label: impl Into<String>, records: Vec<RawEvent>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }
}

#[async_trait]
impl SourceAdapter for CuratedSource {
    fn id(&self) -> &str {
        &self.label
    }

    fn is_remote(&self) -> bool {
        false
    }

    #[instrument(level = "info", skip_all, fields(source = %self.label))]
    async fn fetch(&self) -> Result<Harvest, AdapterError> {
        debug!(count = self.records.len(), "Serving curated records");
        Ok(Harvest {
            events: self.records.clone(),
            skipped: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_records() {
        let records = default_records();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| (60..=100).contains(&r.points)));
        assert_eq!(records[2].points, 60);
        assert_eq!(records[0].address, None);
        assert_eq!(records[3].link, "https://repaircafeaarhus.dk");
    }

    #[tokio::test]
    async fn test_fetch_returns_records_in_order() {
        let source = CuratedSource::new(CURATED_LABEL, default_records());
        assert_eq!(source.id(), "Facebook (PDF analysis)");
        assert!(source.requires_relevance());
        assert!(!source.is_remote());

        let harvest = source.fetch().await.unwrap();
        assert_eq!(harvest.events.len(), 4);
        assert_eq!(harvest.events[0].title, "Queers & Coffee - at Studenterhus Aarhus");
        assert_eq!(harvest.skipped, 0);
    }
}
