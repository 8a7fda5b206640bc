//! Business logic for each vault operation.
//!
//! Every command is a free function generic over `S: VaultStore`, takes
//! plain arguments, and returns a typed result — no I/O assumptions, no
//! printing. The API facade in `api.rs` is the public entry point.

use crate::error::Result;
use crate::frontmatter;
use crate::model::Metadata;
use crate::store::{canonical_note_path, VaultStore};

pub mod links;
pub mod notes;
pub mod search;
pub mod sections;
pub mod stats;
pub mod tags;
pub mod templates;

/// Canonicalize, read, and split a note in one step.
pub(crate) fn read_parsed<S: VaultStore>(
    store: &S,
    path: &str,
) -> Result<(String, Metadata, String)> {
    let canonical = canonical_note_path(path)?;
    let raw = store.read_note(&canonical)?;
    let (metadata, body) = frontmatter::parse_note(&raw)?;
    Ok((canonical, metadata, body))
}
