//! Keyword relevance gate.
//!
//! Plain case-insensitive substring containment: no stemming and no word
//! boundaries. Short keywords such as `ren` therefore also match inside
//! unrelated words; the filter errs towards keeping events.

/// Decides whether free text is about sustainability at all.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    /// Keywords are lower-cased once here; blank ones are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// `true` iff `text` contains any keyword, ignoring case. Empty text is never relevant.
    pub fn is_relevant(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
