//! Selector-table driven scraper for event listing pages.
//!
//! The listing sites differ only in *where* things live in their markup, so a
//! single [`SiteAdapter`] handles all of them, steered by one [`SiteSpec`] row
//! per site. Each row answers: which elements are listing entries, and inside
//! an entry, which elements hold the title, link, description, date and venue.
//!
//! Fetching and extraction are split: [`SiteAdapter::extract`] is a pure
//! function of the HTML, so it can be exercised offline against fixtures.

use super::{AdapterError, Harvest, ItemError, SourceAdapter};
use crate::models::{DEFAULT_POINTS, RawEvent};
use crate::utils::{clean_text, truncate_chars};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Descriptions longer than this many characters are cut.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

fn default_max_items() -> usize {
    20
}

fn default_title_selector() -> String {
    "h2, h3, .title".to_string()
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

fn default_true() -> bool {
    true
}

/// How an entry's `address` is filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRule {
    /// Leave the address blank.
    #[default]
    Blank,
    /// Copy whatever ended up in `location`.
    SameAsLocation,
    /// Every entry is at the same venue.
    Fixed(String),
}

/// Where to find event data on one listing site.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SiteSpec {
    /// Source identifier stamped on every record.
    pub id: String,
    /// Listing page to fetch.
    pub url: String,
    /// Base for resolving relative links; defaults to `url`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Elements that are individual listing entries.
    pub item_selector: String,
    /// Only the first `max_items` entries are looked at.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_title_selector")]
    pub title_selector: String,
    /// Take the link from an anchor inside the title instead of anywhere in the entry.
    #[serde(default)]
    pub link_within_title: bool,
    #[serde(default)]
    pub description_selector: Option<String>,
    #[serde(default)]
    pub date_selector: Option<String>,
    /// Date text used when no date element is found (or no selector is set).
    #[serde(default)]
    pub date_fallback: String,
    #[serde(default)]
    pub location_selector: Option<String>,
    /// Location used when no location element is found.
    #[serde(default)]
    pub location_fallback: Option<String>,
    #[serde(default)]
    pub address: AddressRule,
    /// Category hint for every entry.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
    /// When false, every entry is kept regardless of the relevance filter.
    #[serde(default = "default_true")]
    pub requires_relevance: bool,
}

#[derive(Debug)]
struct Selectors {
    item: Selector,
    title: Selector,
    link: Selector,
    description: Option<Selector>,
    date: Option<Selector>,
    location: Option<Selector>,
}

fn parse_selector(css: &str) -> Result<Selector, AdapterError> {
    Selector::parse(css).map_err(|e| AdapterError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn parse_optional(css: Option<&str>) -> Result<Option<Selector>, AdapterError> {
    css.map(parse_selector).transpose()
}

/// Collapsed text of the first match of `selector` under `scope`, if non-empty.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}

/// A scraper for one listing site, configured by a [`SiteSpec`].
#[derive(Debug)]
pub struct SiteAdapter {
    spec: SiteSpec,
    base: Url,
    selectors: Selectors,
    client: Client,
}

impl SiteAdapter {
    /// Compile the site row's selectors and base URL.
    ///
    /// # Errors
    ///
    /// [`AdapterError::InvalidSelector`] or [`AdapterError::InvalidUrl`] when
    /// the row itself is malformed.
    pub fn new(spec: SiteSpec, client: Client) -> Result<Self, AdapterError> {
        let base_str = spec.base_url.as_deref().unwrap_or(&spec.url);
        let base = Url::parse(base_str).map_err(|source| AdapterError::InvalidUrl {
            url: base_str.to_string(),
            source,
        })?;
        let selectors = Selectors {
            item: parse_selector(&spec.item_selector)?,
            title: parse_selector(&spec.title_selector)?,
            link: parse_selector("a[href]")?,
            description: parse_optional(spec.description_selector.as_deref())?,
            date: parse_optional(spec.date_selector.as_deref())?,
            location: parse_optional(spec.location_selector.as_deref())?,
        };
        Ok(Self {
            spec,
            base,
            selectors,
            client,
        })
    }

    /// Pull every well-formed entry out of a listing page.
    ///
    /// Entries missing a title or link are skipped and counted; they never
    /// affect the rest of the page.
    pub fn extract(&self, html: &str) -> Harvest {
        let document = Html::parse_document(html);
        let mut harvest = Harvest::default();

        for item in document
            .select(&self.selectors.item)
            .take(self.spec.max_items)
        {
            match self.extract_item(item) {
                Ok(event) => harvest.events.push(event),
                Err(e) => {
                    debug!(source = %self.spec.id, error = %e, "Skipping listing entry");
                    harvest.skipped += 1;
                }
            }
        }
        harvest
    }

    fn extract_item(&self, item: ElementRef<'_>) -> Result<RawEvent, ItemError> {
        let title_el = item
            .select(&self.selectors.title)
            .next()
            .ok_or(ItemError::MissingTitle)?;
        let title = clean_text(&title_el.text().collect::<Vec<_>>().join(" "));
        if title.is_empty() {
            return Err(ItemError::MissingTitle);
        }

        let link_scope = if self.spec.link_within_title {
            title_el
        } else {
            item
        };
        let href = link_scope
            .select(&self.selectors.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or(ItemError::MissingLink)?;
        let link = self.absolutize(href)?;

        let description = self
            .selectors
            .description
            .as_ref()
            .and_then(|sel| first_text(item, sel))
            .map(|text| truncate_chars(&text, MAX_DESCRIPTION_CHARS));

        let date = self
            .selectors
            .date
            .as_ref()
            .and_then(|sel| first_text(item, sel))
            .unwrap_or_else(|| self.spec.date_fallback.clone());

        let location = self
            .selectors
            .location
            .as_ref()
            .and_then(|sel| first_text(item, sel))
            .or_else(|| self.spec.location_fallback.clone());

        let address = match &self.spec.address {
            AddressRule::Blank => None,
            AddressRule::SameAsLocation => location.clone(),
            AddressRule::Fixed(address) => Some(address.clone()),
        };

        Ok(RawEvent {
            title,
            description,
            date,
            time: None,
            location,
            address,
            link,
            source: self.spec.id.clone(),
            category: self.spec.category.clone(),
            image: None,
            organizer: self.spec.organizer.clone(),
            points: self.spec.points,
        })
    }

    fn absolutize(&self, href: &str) -> Result<String, ItemError> {
        if href.starts_with("http") {
            return Ok(href.to_string());
        }
        self.base
            .join(href)
            .map(|url| url.to_string())
            .map_err(|_| ItemError::UnresolvableLink {
                href: href.to_string(),
                base: self.base.to_string(),
            })
    }
}

#[async_trait]
impl SourceAdapter for SiteAdapter {
    fn id(&self) -> &str {
        &self.spec.id
    }

    fn requires_relevance(&self) -> bool {
        self.spec.requires_relevance
    }

    #[instrument(level = "info", skip_all, fields(source = %self.spec.id, url = %self.spec.url))]
    async fn fetch(&self) -> Result<Harvest, AdapterError> {
        let response = self.client.get(&self.spec.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Listing page returned an error status");
            return Err(AdapterError::Status {
                url: self.spec.url.clone(),
                status: status.as_u16(),
            });
        }
        let html = response.text().await?;
        let harvest = self.extract(&html);
        info!(
            count = harvest.events.len(),
            skipped = harvest.skipped,
            bytes = html.len(),
            "Scraped listing page"
        );
        Ok(harvest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn spec() -> SiteSpec {
        SiteSpec {
            id: "example.dk".to_string(),
            url: "https://example.dk/kalender/".to_string(),
            base_url: Some("https://example.dk".to_string()),
            item_selector: "article".to_string(),
            max_items: 20,
            title_selector: "h2, h3".to_string(),
            link_within_title: false,
            description_selector: Some(".excerpt, p".to_string()),
            date_selector: Some(".date".to_string()),
            date_fallback: "Se link for dato".to_string(),
            location_selector: Some(".venue".to_string()),
            location_fallback: Some("Aarhus".to_string()),
            address: AddressRule::SameAsLocation,
            category: Some("event".to_string()),
            organizer: None,
            points: 100,
            requires_relevance: true,
        }
    }

    fn adapter(spec: SiteSpec) -> SiteAdapter {
        let client = crate::scrapers::http_client(Duration::from_secs(1)).unwrap();
        SiteAdapter::new(spec, client).unwrap()
    }

    const LISTING: &str = r#"
        <html><body>
          <article>
            <h2>
              Repair   Café
            </h2>
            <a href="/event/repair-cafe">Læs mere</a>
            <p class="excerpt">Kom og reparer dit tøj</p>
            <span class="date">I dag</span>
            <span class="venue">Godsbanen</span>
          </article>
          <article>
            <h2>No link here</h2>
          </article>
          <article>
            <a href="https://other.dk/x">Untitled</a>
          </article>
          <article>
            <h3><a href="https://klima.dk/talk">Klimaforedrag</a></h3>
          </article>
        </body></html>
    "#;

    #[test]
    fn test_extract_well_formed_entries() {
        let harvest = adapter(spec()).extract(LISTING);
        assert_eq!(harvest.events.len(), 2);
        assert_eq!(harvest.skipped, 2);

        let first = &harvest.events[0];
        assert_eq!(first.title, "Repair Café");
        assert_eq!(first.link, "https://example.dk/event/repair-cafe");
        assert_eq!(first.description.as_deref(), Some("Kom og reparer dit tøj"));
        assert_eq!(first.date, "I dag");
        assert_eq!(first.location.as_deref(), Some("Godsbanen"));
        assert_eq!(first.address.as_deref(), Some("Godsbanen"));
        assert_eq!(first.source, "example.dk");
        assert_eq!(first.category.as_deref(), Some("event"));
        assert_eq!(first.points, 100);
    }

    #[test]
    fn test_extract_uses_fallbacks() {
        let harvest = adapter(spec()).extract(LISTING);
        let second = &harvest.events[1];
        assert_eq!(second.title, "Klimaforedrag");
        assert_eq!(second.link, "https://klima.dk/talk");
        assert_eq!(second.description, None);
        assert_eq!(second.date, "Se link for dato");
        assert_eq!(second.location.as_deref(), Some("Aarhus"));
    }

    #[test]
    fn test_link_within_title() {
        let mut spec = spec();
        spec.link_within_title = true;
        let harvest = adapter(spec).extract(LISTING);
        // Only the last entry has an anchor inside its heading.
        assert_eq!(harvest.events.len(), 1);
        assert_eq!(harvest.events[0].title, "Klimaforedrag");
        assert_eq!(harvest.skipped, 3);
    }

    #[test]
    fn test_inline_markup_splits_text_with_a_space() {
        let html = r#"
            <article>
              <h2>Bære<span>dygtig</span> <a href="/m">Marked</a></h2>
              <a href="/m">Læs</a>
              <p>Genbrug<em>s</em>marked</p>
            </article>
        "#;
        let harvest = adapter(spec()).extract(html);
        let event = &harvest.events[0];
        // Text nodes are joined with a space, so a word split by inline
        // markup stays split and no longer matches as one keyword.
        assert_eq!(event.title, "Bære dygtig Marked");
        assert_eq!(event.description.as_deref(), Some("Genbrug s marked"));
        assert!(!event.title.to_lowercase().contains("bæredygtig"));
    }

    #[test]
    fn test_max_items_caps_entries() {
        let mut spec = spec();
        spec.max_items = 1;
        let harvest = adapter(spec).extract(LISTING);
        assert_eq!(harvest.events.len(), 1);
        assert_eq!(harvest.skipped, 0);
    }

    #[test]
    fn test_description_truncated() {
        let long = "ø".repeat(400);
        let html = format!(
            r#"<article><h2>Titel</h2><a href="/a">x</a><p class="excerpt">{long}</p></article>"#
        );
        let harvest = adapter(spec()).extract(&html);
        let description = harvest.events[0].description.as_deref().unwrap();
        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_fixed_address_and_no_location_selector() {
        let mut spec = spec();
        spec.location_selector = None;
        spec.location_fallback = Some("Klimahuset Aarhus".to_string());
        spec.address = AddressRule::Fixed("Magistrsparken 2, 8000 Aarhus C".to_string());
        let harvest = adapter(spec).extract(LISTING);
        assert_eq!(harvest.events[0].location.as_deref(), Some("Klimahuset Aarhus"));
        assert_eq!(
            harvest.events[0].address.as_deref(),
            Some("Magistrsparken 2, 8000 Aarhus C")
        );
    }

    #[test]
    fn test_empty_page_yields_empty_harvest() {
        let harvest = adapter(spec()).extract("<html><body></body></html>");
        assert_eq!(harvest, Harvest::default());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut spec = spec();
        spec.base_url = Some("not a url".to_string());
        let client = crate::scrapers::http_client(Duration::from_secs(1)).unwrap();
        let err = SiteAdapter::new(spec, client).err().unwrap();
        assert!(matches!(err, AdapterError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_site_is_an_error_not_a_panic() {
        let mut spec = spec();
        // Nothing listens on the discard port.
        spec.url = "http://127.0.0.1:9/kalender".to_string();
        let adapter = adapter(spec);
        assert!(adapter.fetch().await.is_err());
    }
}
