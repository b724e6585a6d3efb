//! Multi-label topical classification.
//!
//! Uses its own keyword table, separate from the relevance vocabulary: one
//! decides whether an event is kept, the other how it is labelled.

use crate::config::CategoryRule;
use crate::models::Event;

/// Assigns every matching category label to an event.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Classifier {
    /// Rule keywords are lower-cased once here; rule order is kept.
    pub fn new(rules: &[CategoryRule], fallback: impl Into<String>) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CategoryRule {
                label: rule.label.clone(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Labels whose keywords occur in `haystack`, in rule order; never empty.
    pub fn labels_for(&self, haystack: &str) -> Vec<String> {
        let haystack = haystack.to_lowercase();
        let labels: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|rule| rule.label.clone())
            .collect();
        if labels.is_empty() {
            vec![self.fallback.clone()]
        } else {
            labels
        }
    }

    /// Set `categories` from the event's title and description.
    pub fn classify(&self, mut event: Event) -> Event {
        event.categories = self.labels_for(&event.haystack());
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CATEGORY_RULES;
    use crate::models::RawEvent;

    fn classifier() -> Classifier {
        Classifier::new(&DEFAULT_CATEGORY_RULES, "sustainability")
    }

    fn event(title: &str, description: &str) -> Event {
        let mut raw = RawEvent::new(title, "https://x.dk", "x.dk");
        raw.description = Some(description.to_string());
        Event::from(raw)
    }

    #[test]
    fn test_climate_workshop_gets_both_labels() {
        let out = classifier().classify(event("Klima Workshop", "lær om klima og bæredygtighed"));
        assert!(out.categories.contains(&"climate".to_string()));
        assert!(out.categories.contains(&"workshop".to_string()));
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let out = classifier().classify(event("Bæredygtig jul", ""));
        assert_eq!(out.categories, vec!["sustainability"]);
    }

    #[test]
    fn test_labels_follow_rule_order() {
        // co2 belongs to both energy and climate.
        let labels = classifier().labels_for("CO2-regnskab");
        assert_eq!(labels, vec!["energy", "climate"]);
    }

    #[test]
    fn test_every_keyword_implies_its_label() {
        let classifier = classifier();
        for rule in DEFAULT_CATEGORY_RULES.iter() {
            for keyword in &rule.keywords {
                let labels = classifier.labels_for(&format!("Noget med {}", keyword.to_uppercase()));
                assert!(labels.contains(&rule.label), "{keyword} -> {}", rule.label);
            }
        }
    }

    #[test]
    fn test_categories_never_empty() {
        let classifier = classifier();
        for text in ["", " ", "Christmas Karaoke", "Repair Café"] {
            assert!(!classifier.labels_for(text).is_empty());
        }
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![CategoryRule {
            label: "swap".to_string(),
            keywords: vec!["Bytte".to_string()],
        }];
        let classifier = Classifier::new(&rules, "other");
        assert_eq!(classifier.labels_for("byttemarked"), vec!["swap"]);
        assert_eq!(classifier.labels_for("koncert"), vec!["other"]);
    }
}
