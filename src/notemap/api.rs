//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer: the single
//! entry point for every vault operation, regardless of the UI driving it.
//!
//! It dispatches to the right command function and returns structured types
//! (`Result<T>`). No business logic lives here (that belongs in
//! `commands/*.rs`), no I/O formatting (that belongs in the CLI).
//!
//! `VaultApi<S: VaultStore>` is generic over the storage backend:
//! production uses `VaultApi<FileStore>`, tests use
//! `VaultApi<InMemoryStore>` without touching the filesystem.

use crate::commands::{links, notes, search, sections, stats, tags, templates};
use crate::error::Result;
use crate::model::{Graph, Metadata, NoteData, Section};
use crate::store::VaultStore;
use std::collections::BTreeMap;

/// The main API facade for vault operations.
pub struct VaultApi<S: VaultStore> {
    store: S,
}

impl<S: VaultStore> VaultApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Notes ────────────────────────────────────────────

    pub fn list_notes(&self) -> Result<Vec<String>> {
        self.store.list_notes()
    }

    pub fn read_note(&self, path: &str) -> Result<NoteData> {
        notes::read(&self.store, path)
    }

    pub fn create_note(
        &mut self,
        path: &str,
        content: &str,
        metadata: Option<Metadata>,
        template: Option<&str>,
        variables: &BTreeMap<String, String>,
    ) -> Result<notes::CreateOutcome> {
        notes::create(&mut self.store, path, content, metadata, template, variables)
    }

    pub fn update_note(
        &mut self,
        path: &str,
        content: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<String> {
        notes::update(&mut self.store, path, content, metadata)
    }

    pub fn append_to_note(&mut self, path: &str, content: &str) -> Result<String> {
        notes::append(&mut self.store, path, content)
    }

    pub fn delete_note(&mut self, path: &str) -> Result<String> {
        notes::delete(&mut self.store, path)
    }

    // ── Sections ─────────────────────────────────────────

    pub fn list_sections(&self, path: &str) -> Result<Vec<Section>> {
        sections::list(&self.store, path)
    }

    pub fn read_section(&self, path: &str, heading: &str) -> Result<Section> {
        sections::read(&self.store, path, heading)
    }

    pub fn update_section(&mut self, path: &str, heading: &str, content: &str) -> Result<String> {
        sections::update(&mut self.store, path, heading, content)
    }

    // ── Links & graph ────────────────────────────────────

    pub fn forward_links(&self, path: &str) -> Result<Vec<String>> {
        links::forward(&self.store, path)
    }

    pub fn backlinks(&self, path: &str) -> Result<Vec<String>> {
        links::backlinks(&self.store, path)
    }

    pub fn graph(&self) -> Result<Graph> {
        links::graph(&self.store)
    }

    // ── Tags ─────────────────────────────────────────────

    pub fn list_tags(&self) -> Result<Vec<tags::TagCount>> {
        tags::list(&self.store)
    }

    pub fn search_by_tag(&self, tag: &str) -> Result<Vec<String>> {
        tags::search(&self.store, tag)
    }

    pub fn add_tag(&mut self, path: &str, tag: &str) -> Result<bool> {
        tags::add(&mut self.store, path, tag)
    }

    pub fn remove_tag(&mut self, path: &str, tag: &str) -> Result<bool> {
        tags::remove(&mut self.store, path, tag)
    }

    // ── Search & stats ───────────────────────────────────

    pub fn search(&self, query: &str) -> Result<Vec<search::SearchHit>> {
        search::run(&self.store, query)
    }

    pub fn stats(&self) -> Result<stats::VaultStats> {
        stats::run(&self.store)
    }

    // ── Templates ────────────────────────────────────────

    pub fn list_templates(&self) -> Result<Vec<String>> {
        templates::list(&self.store)
    }

    pub fn create_from_template(
        &mut self,
        template: &str,
        path: &str,
        variables: &BTreeMap<String, String>,
    ) -> Result<notes::CreateOutcome> {
        templates::create_from(&mut self.store, template, path, variables)
    }

    pub fn folder_mappings(&self) -> Result<BTreeMap<String, String>> {
        templates::folder_mappings(&self.store)
    }

    pub fn resolve_folder_template(&self, folder: &str) -> Result<Option<String>> {
        templates::resolve_folder(&self.store, folder)
    }

    pub fn set_folder_template(&mut self, folder: &str, template: &str) -> Result<(String, String)> {
        templates::set_folder(&mut self.store, folder, template)
    }

    pub fn remove_folder_template(&mut self, folder: &str) -> Result<String> {
        templates::remove_folder(&mut self.store, folder)
    }
}

// Re-exported so CLI clients only need the api module for result types.
pub use crate::commands::notes::CreateOutcome;
pub use crate::commands::search::SearchHit;
pub use crate::commands::stats::VaultStats;
pub use crate::commands::tags::TagCount;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn facade_dispatches_across_layers() {
        let store = InMemoryStore::new().with_template("Daily", "daily body");
        let mut api = VaultApi::new(store);

        api.set_folder_template("journal/**", "Daily").unwrap();
        api.create_note("journal/2025/Mon", "", None, None, &BTreeMap::new())
            .unwrap();
        assert_eq!(
            api.read_note("journal/2025/Mon").unwrap().content,
            "daily body"
        );

        api.create_note("Hub", "[[Mon]]", None, None, &BTreeMap::new())
            .unwrap();
        assert_eq!(
            api.forward_links("Hub").unwrap(),
            vec!["journal/2025/Mon.md"]
        );
        assert_eq!(api.backlinks("journal/2025/Mon").unwrap(), vec!["Hub.md"]);
        assert_eq!(api.stats().unwrap().note_count, 2);
    }
}
