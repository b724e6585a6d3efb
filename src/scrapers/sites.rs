//! The default roster of Aarhus listing sites.
//!
//! Order matters: when two sites list an event under the same title, the one
//! earlier in this table wins deduplication.

use super::site::{AddressRule, SiteSpec};
use crate::models::DEFAULT_POINTS;

#[allow(clippy::too_many_arguments)]
fn row(
    id: &str,
    url: &str,
    base_url: &str,
    item_selector: &str,
    max_items: usize,
    title_selector: &str,
    link_within_title: bool,
    description_selector: &str,
) -> SiteSpec {
    SiteSpec {
        id: id.to_string(),
        url: url.to_string(),
        base_url: Some(base_url.to_string()),
        item_selector: item_selector.to_string(),
        max_items,
        title_selector: title_selector.to_string(),
        link_within_title,
        description_selector: Some(description_selector.to_string()),
        date_selector: None,
        date_fallback: String::new(),
        location_selector: None,
        location_fallback: None,
        address: AddressRule::Blank,
        category: Some("event".to_string()),
        organizer: None,
        points: DEFAULT_POINTS,
        requires_relevance: true,
    }
}

/// Selector rows for the nine scraped sites, in priority order.
pub fn default_sites() -> Vec<SiteSpec> {
    vec![
        SiteSpec {
            date_selector: Some(".date, .event-date, .post-date, time".to_string()),
            location_selector: Some(".location, .venue, .place".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            address: AddressRule::SameAsLocation,
            ..row(
                "migogaarhus.dk",
                "https://migogaarhus.dk/kalender/",
                "https://migogaarhus.dk",
                "article, .event-item, .post, .item",
                20,
                "h2, h3, .title, .event-title",
                false,
                ".description, .excerpt, .content, p",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .post-date, .event-date".to_string()),
            location_selector: Some(".location, .venue".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            address: AddressRule::SameAsLocation,
            ..row(
                "tipaarhus.dk",
                "https://tipaarhus.dk/det-sker-i-aarhus/",
                "https://tipaarhus.dk",
                "article, .post, .event, .arrangement",
                20,
                "h2, h3, .entry-title, .title",
                true,
                ".entry-content, .excerpt, .description",
            )
        },
        SiteSpec {
            date_fallback: "Se link for dato".to_string(),
            location_fallback: Some("Aarhus region".to_string()),
            category: Some("sustainability".to_string()),
            ..row(
                "visitaarhus.dk",
                "https://www.visitaarhus.dk/aarhusregionen/baeredygtighed-i-fokus",
                "https://www.visitaarhus.dk",
                "article, .content-item, .news-item, .card",
                15,
                "h2, h3, h4, .title",
                false,
                "p, .description, .text",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .time, .post-date".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            ..row(
                "aarhusliv.dk",
                "https://aarhusliv.dk/det-sker-i-aarhus/",
                "https://aarhusliv.dk",
                "article, .post, .event-item, .list-item",
                25,
                "h2, h3, .entry-title, .title",
                true,
                ".entry-content, .excerpt, p",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .event-date".to_string()),
            location_selector: Some(".location, .venue".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            address: AddressRule::SameAsLocation,
            ..row(
                "aarhusevents.dk",
                "https://aarhusevents.dk/",
                "https://aarhusevents.dk",
                ".event, .arrangement, article, .item",
                25,
                "h2, h3, .title, .event-title",
                false,
                ".description, .excerpt, .content",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .post-date".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            category: Some("experience".to_string()),
            ..row(
                "aarhusinside.dk",
                "https://aarhusinside.dk/oplevelser-i-aarhus/",
                "https://aarhusinside.dk",
                "article, .post, .experience-item, .listing",
                25,
                "h2, h3, .entry-title, .title",
                true,
                ".entry-content, .excerpt, .description",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .time".to_string()),
            location_selector: Some(".location, .place".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            category: Some("municipal".to_string()),
            organizer: Some("Aarhus Kommune".to_string()),
            ..row(
                "domen.aarhus.dk",
                "https://domen.aarhus.dk/",
                "https://domen.aarhus.dk",
                ".event, .arrangement, .activity, .item",
                20,
                "h2, h3, .title, .event-title",
                false,
                ".description, .summary, p",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .event-date".to_string()),
            date_fallback: "Kommer snart".to_string(),
            location_fallback: Some("Klimahuset Aarhus".to_string()),
            address: AddressRule::Fixed("Magistrsparken 2, 8000 Aarhus C".to_string()),
            category: Some("climate".to_string()),
            organizer: Some("Klimahuset Aarhus".to_string()),
            requires_relevance: false,
            ..row(
                "klimahusetaarhus.dk",
                "https://klimahusetaarhus.dk/arrangementer/",
                "https://klimahusetaarhus.dk",
                "article, .event, .arrangement, .post",
                20,
                "h2, h3, .entry-title",
                true,
                ".entry-content, .description, p",
            )
        },
        SiteSpec {
            date_selector: Some(".date, .event-date".to_string()),
            date_fallback: "Aktiviteter".to_string(),
            location_fallback: Some("Godsbanen".to_string()),
            address: AddressRule::Fixed("Skovgaardsgade 3, 8000 Aarhus C".to_string()),
            category: Some("creative".to_string()),
            organizer: Some("Godsbanen".to_string()),
            ..row(
                "godsbanen.dk",
                "https://godsbanen.dk/arrangementer",
                "https://godsbanen.dk",
                ".event, .arrangement, article, .post",
                25,
                "h2, h3, .event-title",
                false,
                ".description, .excerpt, p",
            )
        },
    ]
}
