use super::{canonical_note_path, VaultSettings, VaultStore};
use crate::error::{Result, VaultError};
use crate::resolve::NOTE_EXT;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = ".notemap.json";
const DEFAULT_TEMPLATE_DIR: &str = "Templates";

/// Production store over a vault directory on disk.
pub struct FileStore {
    root: PathBuf,
    template_dir: String,
    exclude: Vec<String>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            exclude: vec![".obsidian".to_string(), ".trash".to_string()],
        }
    }

    /// Folder (relative to the root) holding template files.
    pub fn with_template_dir(mut self, dir: &str) -> Self {
        self.template_dir = dir.trim_matches('/').to_string();
        self
    }

    /// Path prefixes skipped during note enumeration.
    pub fn with_excluded(mut self, prefixes: Vec<String>) -> Self {
        self.exclude = prefixes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_file(&self, path: &str) -> Result<(String, PathBuf)> {
        let canonical = canonical_note_path(path)?;
        let full = self.root.join(&canonical);
        Ok((canonical, full))
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.exclude.iter().any(|prefix| rel.starts_with(prefix.as_str()))
    }

    fn template_root(&self) -> PathBuf {
        self.root.join(&self.template_dir)
    }

    fn template_file(&self, name: &str) -> Result<(String, PathBuf)> {
        // Template names follow the same canonical rules as note paths.
        let canonical = canonical_note_path(name)?;
        let full = self.template_root().join(&canonical);
        Ok((canonical, full))
    }

    fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    fn collect_md(
        &self,
        dir: &Path,
        prefix: &str,
        apply_excludes: bool,
        out: &mut Vec<String>,
    ) -> Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{}", name)
            };
            if apply_excludes && self.is_excluded(&rel) {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                self.collect_md(&path, &rel, apply_excludes, out)?;
            } else if rel.ends_with(NOTE_EXT) {
                out.push(rel);
            }
        }
        Ok(())
    }
}

impl VaultStore for FileStore {
    fn list_notes(&self) -> Result<Vec<String>> {
        let mut notes = Vec::new();
        self.collect_md(&self.root, "", true, &mut notes)?;
        notes.sort();
        Ok(notes)
    }

    fn note_exists(&self, path: &str) -> Result<bool> {
        let (_, full) = self.note_file(path)?;
        Ok(full.is_file())
    }

    fn read_note(&self, path: &str) -> Result<String> {
        let (canonical, full) = self.note_file(path)?;
        if !full.is_file() {
            return Err(VaultError::NoteNotFound(canonical));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn write_note(&mut self, path: &str, text: &str) -> Result<()> {
        let (_, full) = self.note_file(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, text)?;
        Ok(())
    }

    fn delete_note(&mut self, path: &str) -> Result<()> {
        let (canonical, full) = self.note_file(path)?;
        if !full.is_file() {
            return Err(VaultError::NoteNotFound(canonical));
        }
        fs::remove_file(full)?;
        Ok(())
    }

    fn list_templates(&self) -> Result<Vec<String>> {
        let mut templates = Vec::new();
        self.collect_md(&self.template_root(), "", false, &mut templates)?;
        templates.sort();
        Ok(templates)
    }

    fn template_exists(&self, name: &str) -> Result<bool> {
        let (_, full) = self.template_file(name)?;
        Ok(full.is_file())
    }

    fn read_template(&self, name: &str) -> Result<String> {
        let (canonical, full) = self.template_file(name)?;
        if !full.is_file() {
            return Err(VaultError::TemplateNotFound(canonical));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn load_settings(&self) -> Result<VaultSettings> {
        let file = self.settings_file();
        if !file.is_file() {
            return Ok(VaultSettings::default());
        }
        let text = fs::read_to_string(file)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save_settings(&mut self, settings: &VaultSettings) -> Result<()> {
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_file(), text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn write_then_list_read_delete() {
        let (_dir, mut store) = vault();
        store.write_note("inbox/First", "hello").unwrap();
        store.write_note("Second.md", "world").unwrap();

        assert_eq!(store.list_notes().unwrap(), vec!["Second.md", "inbox/First.md"]);
        assert_eq!(store.read_note("inbox/First").unwrap(), "hello");
        assert!(store.note_exists("Second").unwrap());

        store.delete_note("Second").unwrap();
        assert!(!store.note_exists("Second").unwrap());
        assert!(matches!(
            store.read_note("Second"),
            Err(VaultError::NoteNotFound(_))
        ));
    }

    #[test]
    fn excluded_prefixes_are_skipped() {
        let (_dir, mut store) = vault();
        store.write_note("keep", "x").unwrap();
        store.write_note(".trash/gone", "x").unwrap();
        store.write_note(".obsidian/config", "x").unwrap();
        assert_eq!(store.list_notes().unwrap(), vec!["keep.md"]);
    }

    #[test]
    fn templates_live_under_the_template_dir() {
        let (_dir, mut store) = vault();
        store.write_note("Templates/Daily", "# {{date}}").unwrap();
        assert_eq!(store.list_templates().unwrap(), vec!["Daily.md"]);
        assert!(store.template_exists("Daily").unwrap());
        assert_eq!(store.read_template("Daily.md").unwrap(), "# {{date}}");
        assert!(matches!(
            store.read_template("Nope"),
            Err(VaultError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn settings_default_when_absent_and_round_trip() {
        let (_dir, mut store) = vault();
        assert_eq!(store.load_settings().unwrap(), VaultSettings::default());

        let mut settings = VaultSettings::default();
        settings
            .folder_templates
            .insert("daily/**".into(), "Daily".into());
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings().unwrap(), settings);

        // Whole-document pretty JSON on disk.
        let text = fs::read_to_string(store.root().join(".notemap.json")).unwrap();
        assert!(text.contains("\"folder_templates\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn out_of_bounds_paths_never_touch_disk() {
        let (_dir, mut store) = vault();
        assert!(matches!(
            store.write_note("../escape", "x"),
            Err(VaultError::OutOfBounds(_))
        ));
    }
}
