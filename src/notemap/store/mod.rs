//! # Storage Layer
//!
//! The [`VaultStore`] trait is the engine's only view of the filesystem:
//! note enumeration and I/O, template files, and the persisted settings
//! document. Abstracting it behind a trait keeps the command layer free of
//! I/O assumptions and lets the tests run against [`memory::InMemoryStore`]
//! instead of a real vault.
//!
//! ## Canonical note paths
//!
//! Every note is identified by a root-relative, `/`-separated path ending in
//! `.md`, case-sensitive. [`canonical_note_path`] appends the extension and
//! rejects anything that could escape the vault root (`..`, absolute paths,
//! empty segments) *before* any I/O happens — implementations receive only
//! validated paths.
//!
//! ## Settings
//!
//! The folder-template mapping is the single piece of durable state the
//! engine owns. It lives in one JSON document at the vault root
//! (`.notemap.json`), read and rewritten whole on every mutation; an absent
//! file is an empty mapping.

use crate::error::{Result, VaultError};
use crate::resolve::ensure_md_ext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

/// Settings document persisted at the vault root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultSettings {
    #[serde(default)]
    pub folder_templates: BTreeMap<String, String>,
}

/// Abstract interface to a vault's files.
///
/// `list_notes` must return canonical paths in sorted order — the link
/// resolver's filename fallback depends on that order for determinism.
pub trait VaultStore {
    /// All note paths in the vault, sorted, excluded prefixes skipped.
    fn list_notes(&self) -> Result<Vec<String>>;

    fn note_exists(&self, path: &str) -> Result<bool>;

    /// Raw note text (front-matter included).
    fn read_note(&self, path: &str) -> Result<String>;

    /// Write raw note text, creating parent folders as needed.
    fn write_note(&mut self, path: &str, text: &str) -> Result<()>;

    fn delete_note(&mut self, path: &str) -> Result<()>;

    /// Template names (relative to the template folder), sorted.
    fn list_templates(&self) -> Result<Vec<String>>;

    fn template_exists(&self, name: &str) -> Result<bool>;

    fn read_template(&self, name: &str) -> Result<String>;

    /// Load the settings document; absent storage yields the default.
    fn load_settings(&self) -> Result<VaultSettings>;

    /// Replace the settings document as a whole.
    fn save_settings(&mut self, settings: &VaultSettings) -> Result<()>;
}

/// Validate and canonicalize a caller-supplied note path.
pub fn canonical_note_path(path: &str) -> Result<String> {
    let qualified = ensure_md_ext(path.trim()).replace('\\', "/");
    if qualified.starts_with('/') {
        return Err(VaultError::OutOfBounds(path.to_string()));
    }
    for segment in qualified.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(VaultError::OutOfBounds(path.to_string()));
        }
    }
    Ok(qualified)
}
