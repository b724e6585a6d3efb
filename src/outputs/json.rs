//! JSON output generation for the static site.
//!
//! The feed is replaced atomically: it is written to a temporary sibling file
//! and renamed over the target, so a reader never sees a half-written feed and
//! a failed run leaves the previous feed in place.

use crate::models::Envelope;
use crate::utils::ensure_writable_dir;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize an [`Envelope`] as pretty-printed JSON and write it to `path`.
///
/// Non-ASCII text (æ, ø, å) is written as-is, not escaped.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or written,
/// or if the final rename fails. In every case the previous file at `path`
/// is left untouched.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_envelope(envelope: &Envelope, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(envelope)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_writable_dir(&dir).await?;

    let tmp = temp_path(path);
    info!(tmp = %tmp.display(), bytes = json.len(), "Writing JSON");
    if let Err(e) = fs::write(&tmp, json).await {
        error!(error = %e, "Failed to write temporary JSON file");
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        error!(error = %e, "Failed to move JSON into place");
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    info!(events = envelope.metadata.total_events, "Wrote event feed");
    Ok(())
}
