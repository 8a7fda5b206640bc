use super::{canonical_note_path, VaultSettings, VaultStore};
use crate::error::{Result, VaultError};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    notes: BTreeMap<String, String>,
    templates: BTreeMap<String, String>,
    settings: VaultSettings,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixture builder: seed a note.
    pub fn with_note(mut self, path: &str, text: &str) -> Self {
        let canonical = canonical_note_path(path).expect("fixture path");
        self.notes.insert(canonical, text.to_string());
        self
    }

    /// Fixture builder: seed a template.
    pub fn with_template(mut self, name: &str, text: &str) -> Self {
        let canonical = canonical_note_path(name).expect("fixture template");
        self.templates.insert(canonical, text.to_string());
        self
    }
}

impl VaultStore for InMemoryStore {
    fn list_notes(&self) -> Result<Vec<String>> {
        // BTreeMap keys are already sorted.
        Ok(self.notes.keys().cloned().collect())
    }

    fn note_exists(&self, path: &str) -> Result<bool> {
        Ok(self.notes.contains_key(&canonical_note_path(path)?))
    }

    fn read_note(&self, path: &str) -> Result<String> {
        let canonical = canonical_note_path(path)?;
        self.notes
            .get(&canonical)
            .cloned()
            .ok_or(VaultError::NoteNotFound(canonical))
    }

    fn write_note(&mut self, path: &str, text: &str) -> Result<()> {
        self.notes.insert(canonical_note_path(path)?, text.to_string());
        Ok(())
    }

    fn delete_note(&mut self, path: &str) -> Result<()> {
        let canonical = canonical_note_path(path)?;
        if self.notes.remove(&canonical).is_none() {
            return Err(VaultError::NoteNotFound(canonical));
        }
        Ok(())
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        Ok(self.templates.keys().cloned().collect())
    }

    fn template_exists(&self, name: &str) -> Result<bool> {
        Ok(self.templates.contains_key(&canonical_note_path(name)?))
    }

    fn read_template(&self, name: &str) -> Result<String> {
        let canonical = canonical_note_path(name)?;
        self.templates
            .get(&canonical)
            .cloned()
            .ok_or(VaultError::TemplateNotFound(canonical))
    }

    fn load_settings(&self) -> Result<VaultSettings> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &VaultSettings) -> Result<()> {
        self.settings = settings.clone();
        Ok(())
    }
}
