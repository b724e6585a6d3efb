//! Pipeline configuration: keyword tables, site roster, curated records and limits.
//!
//! Every field has a built-in default, so a YAML file passed with `--config`
//! only needs to list what it overrides:
//!
//! ```yaml
//! max_events: 20
//! relevance_keywords: [klima, repair, genbrug]
//! categories:
//!   - label: repair
//!     keywords: [repair, reparation]
//! ```
//!
//! The tables are read once at start-up and handed to the pipeline stages;
//! nothing else reads them.

use crate::models::RawEvent;
use crate::scrapers::{curated, site::SiteSpec, sites};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Sustainability vocabulary gating which scraped items are kept at all.
pub static DEFAULT_RELEVANCE_KEYWORDS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "bæredygtig", "bæredygtighed", "klima", "miljø", "genbrug", "affald", "madspild",
        "energibesparelse", "grøn", "grønt", "økologi", "cykel", "løb", "ren", "natur",
        "plante", "træ", "skov", "have", "frugt", "grøntsag", "dyrevelfærd", "fairtrade",
        "økologisk", "co2", "bæredygtig udvikling", "miljøvenlig", "bæredygtig livsstil",
        "zero waste", "plastikfri", "bæredygtig mode", "bæredygtig mad", "bæredygtig transport",
        "bæredygtig by", "bæredygtig energi", "bæredygtig turisme", "bæredygtig design",
        "bæredygtig innovation", "bæredygtigt forbrug", "bæredygtigt landbrug",
        "bæredygtig skovbrug", "bæredygtig fiskeri", "bæredygtig vand", "bæredygtig luft",
        "bæredygtig sundhed", "bæredygtig uddannelse", "bæredygtig økonomi",
        "bæredygtig teknologi", "bæredygtig arkitektur", "bæredygtig byggeri",
        "bæredygtig bolig", "bæredygtig mobilitet", "bæredygtig emballage",
        "bæredygtig virksomhed", "bæredygtig forening", "bæredygtig frivillig",
        "bæredygtig festival", "bæredygtig kunst", "bæredygtig rejse",
        "bæredygtig oplevelse", "bæredygtig shopping",
        "repair", "reparation", "vandring", "workshop", "kursus", "foredrag",
        "oprydning", "clean-up", "beach clean", "plantning", "dyrkning", "læring",
        "undervisning", "swap", "bytte", "fællesspisning", "madlavning", "genbrugsmarked",
        "loppemarked", "brugt", "secondhand", "vintage", "bæredygtigt", "klimavenlig",
    ]
    .into_iter()
    .map(String::from)
    .collect()
});

/// Topical labels, evaluated in this order.
pub static DEFAULT_CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        ("cleaning", &["renhold", "oprydning", "clean-up", "skrald", "affald", "plastik"]),
        ("food", &["madspild", "madlavning", "fødevare", "spise", "måltid", "fællesspisning"]),
        ("repair", &["repair", "reparation", "fix", "istandsættelse"]),
        ("workshop", &["workshop", "kursus", "læring", "undervisning", "foredrag"]),
        ("gardening", &["have", "plante", "dyrkning", "gartneri", "grøntsag", "frugt"]),
        ("transport", &["cykel", "transport", "mobilitet", "elbil", "løb", "vandring"]),
        ("energy", &["energi", "besparelse", "solcelle", "vindmølle", "co2"]),
        ("community", &["fællesskab", "forening", "frivillig", "samfund", "community"]),
        ("swap", &["swap", "bytte", "genbrugsmarked", "loppemarked"]),
        ("climate", &["klima", "klimahuset", "co2", "opvarmning"]),
        ("creative", &["kunst", "design", "kreativ", "håndværk"]),
    ];
    table
        .iter()
        .map(|(label, keywords)| CategoryRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
});

/// One row of the classifier table: a label and the keywords that earn it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Everything the pipeline needs besides the network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub relevance_keywords: Vec<String>,
    pub categories: Vec<CategoryRule>,
    /// Label used when no category rule matches.
    pub fallback_category: String,
    /// Location given to events that have none.
    pub default_location: String,
    /// Category hint given to events that have none.
    pub default_category_hint: String,
    /// Size cap of the published feed.
    pub max_events: usize,
    /// Sites scraped, in priority order.
    pub sites: Vec<SiteSpec>,
    /// Label the curated list is reported under in the feed metadata.
    pub curated_label: String,
    /// Hand-transcribed records from sources that cannot be scraped.
    pub curated: Vec<RawEvent>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            relevance_keywords: DEFAULT_RELEVANCE_KEYWORDS.clone(),
            categories: DEFAULT_CATEGORY_RULES.clone(),
            fallback_category: "sustainability".to_string(),
            default_location: "Aarhus".to_string(),
            default_category_hint: "event".to_string(),
            max_events: 15,
            sites: sites::default_sites(),
            curated_label: curated::CURATED_LABEL.to_string(),
            curated: curated::default_records(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document, falling back to defaults for missing fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Render the effective configuration, in the format `from_yaml` reads.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load from `path` if given, otherwise use the built-in tables.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using built-in tables");
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            path = %path.display(),
            sites = config.sites.len(),
            relevance_keywords = config.relevance_keywords.len(),
            categories = config.categories.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
