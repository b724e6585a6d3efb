//! Utility functions for text cleanup, truncation, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace cleanup for text pulled out of listing HTML
//! - Character-safe truncation for descriptions and log previews
//! - File system validation for the output location

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Listing markup tends to wrap titles in newlines and indentation; this
/// turns `"\n   Repair\n  Café "` into `"Repair Café"`.
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Keep at most `max` characters of `s`.
///
/// Counts `char`s, not bytes, so Danish letters are never split.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("bæredygtig", 3), "bær");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = truncate_chars(s, max);
    if head.len() == s.len() {
        head
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("\n   Repair\n  Café "), "Repair Café");
        assert_eq!(clean_text("a\t\tb"), "a b");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("bæredygtig", 3), "bær");
        assert_eq!(truncate_chars("kort", 300), "kort");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars(&"ø".repeat(400), 300).chars().count(), 300);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("feed").join("out");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }
}
