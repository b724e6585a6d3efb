//! Output generation for the published feed.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`Envelope`](crate::models::Envelope) to a JSON file for the static site
//!
//! # Output Structure
//!
//! ```text
//! aarhus_sustainability_events.json
//! {
//!   "metadata": { "last_updated": ..., "total_events": ..., "sources": [...] },
//!   "events": [ ... ]
//! }
//! ```

pub mod json;
