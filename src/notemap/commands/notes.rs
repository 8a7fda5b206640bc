use super::read_parsed;
use crate::error::{Result, VaultError};
use crate::frontmatter;
use crate::model::{Metadata, NoteData};
use crate::pattern;
use crate::store::{canonical_note_path, VaultStore};
use std::collections::BTreeMap;

/// Outcome of a create, reporting which template (if any) was applied.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub path: String,
    pub template_applied: Option<String>,
}

pub fn read<S: VaultStore>(store: &S, path: &str) -> Result<NoteData> {
    let (canonical, metadata, body) = read_parsed(store, path)?;
    Ok(NoteData {
        path: canonical,
        metadata,
        content: body,
    })
}

/// Create a new note.
///
/// Template precedence: an explicitly named template always wins; otherwise,
/// when neither content nor metadata was supplied, the folder-template
/// mapping decides; otherwise the note is written as given.
pub fn create<S: VaultStore>(
    store: &mut S,
    path: &str,
    content: &str,
    metadata: Option<Metadata>,
    template: Option<&str>,
    variables: &BTreeMap<String, String>,
) -> Result<CreateOutcome> {
    let canonical = canonical_note_path(path)?;
    if store.note_exists(&canonical)? {
        return Err(VaultError::NoteExists(canonical));
    }

    let mut effective = template.map(str::to_string);
    if effective.is_none() && content.is_empty() && metadata.is_none() {
        if let Some(folder) = parent_folder(&canonical) {
            let settings = store.load_settings()?;
            effective = pattern::resolve_template(&settings.folder_templates, folder)?;
        }
    }

    let (meta, body) = match &effective {
        Some(name) => {
            let raw = store.read_template(name)?;
            frontmatter::parse_note(&apply_variables(&raw, variables))?
        }
        None => (metadata.unwrap_or_default(), content.to_string()),
    };

    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &body)?)?;
    Ok(CreateOutcome {
        path: canonical,
        template_applied: effective,
    })
}

/// Replace the body and/or merge front-matter keys (incoming keys win).
pub fn update<S: VaultStore>(
    store: &mut S,
    path: &str,
    content: Option<&str>,
    metadata: Option<Metadata>,
) -> Result<String> {
    let (canonical, mut meta, body) = read_parsed(store, path)?;
    if let Some(incoming) = metadata {
        meta.merge(incoming);
    }
    let new_body = content.map_or(body, str::to_string);
    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &new_body)?)?;
    Ok(canonical)
}

pub fn append<S: VaultStore>(store: &mut S, path: &str, content: &str) -> Result<String> {
    let (canonical, meta, body) = read_parsed(store, path)?;
    let new_body = format!("{}\n\n{content}", body.trim_end());
    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &new_body)?)?;
    Ok(canonical)
}

pub fn delete<S: VaultStore>(store: &mut S, path: &str) -> Result<String> {
    let canonical = canonical_note_path(path)?;
    store.delete_note(&canonical)?;
    Ok(canonical)
}

fn parent_folder(canonical: &str) -> Option<&str> {
    canonical.rfind('/').map(|i| &canonical[..i])
}

fn apply_variables(text: &str, variables: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (key, value) in variables {
        out = out.replace(&format!("{{{{{key}}}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn create_plain_note_and_read_it_back() {
        let mut store = InMemoryStore::new();
        let out = create(&mut store, "inbox/Idea", "Body text", None, None, &BTreeMap::new())
            .unwrap();
        assert_eq!(out.path, "inbox/Idea.md");
        assert_eq!(out.template_applied, None);

        let note = read(&store, "inbox/Idea").unwrap();
        assert_eq!(note.content, "Body text");
        assert!(note.metadata.is_empty());
    }

    #[test]
    fn create_refuses_existing_path() {
        let mut store = InMemoryStore::new().with_note("Idea", "x");
        assert!(matches!(
            create(&mut store, "Idea", "", None, None, &BTreeMap::new()),
            Err(VaultError::NoteExists(_))
        ));
    }

    #[test]
    fn explicit_template_with_variables() {
        let mut store = InMemoryStore::new()
            .with_template("Meeting", "---\ntags:\n  - meeting\n---\n# {{topic}}\n");
        let out = create(
            &mut store,
            "work/Standup",
            "",
            None,
            Some("Meeting"),
            &BTreeMap::from([("topic".to_string(), "Standup".to_string())]),
        )
        .unwrap();
        assert_eq!(out.template_applied.as_deref(), Some("Meeting"));

        let note = read(&store, "work/Standup").unwrap();
        assert_eq!(note.metadata.tags(), vec!["meeting"]);
        assert!(note.content.starts_with("# Standup"));
    }

    #[test]
    fn folder_mapping_applies_only_to_empty_creates() {
        let mut store = InMemoryStore::new().with_template("Daily", "daily body");
        let mut settings = store.load_settings().unwrap();
        settings
            .folder_templates
            .insert("journal/**".into(), "Daily".into());
        store.save_settings(&settings).unwrap();

        let out = create(
            &mut store,
            "journal/2025/Mon",
            "",
            None,
            None,
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(out.template_applied.as_deref(), Some("Daily"));
        assert_eq!(read(&store, "journal/2025/Mon").unwrap().content, "daily body");

        // Supplied content suppresses the mapping.
        let out = create(
            &mut store,
            "journal/2025/Tue",
            "own text",
            None,
            None,
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(out.template_applied, None);
    }

    #[test]
    fn missing_template_fails_before_any_write() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            create(&mut store, "X", "", None, Some("Nope"), &BTreeMap::new()),
            Err(VaultError::TemplateNotFound(_))
        ));
        assert!(!store.note_exists("X").unwrap());
    }

    #[test]
    fn update_merges_metadata_and_replaces_content() {
        let mut store =
            InMemoryStore::new().with_note("Plan", "---\nstatus: draft\nowner: kim\n---\nold");
        let mut incoming = Metadata::default();
        incoming
            .extra
            .insert("status".into(), serde_yaml::Value::String("done".into()));

        update(&mut store, "Plan", Some("new"), Some(incoming)).unwrap();
        let note = read(&store, "Plan").unwrap();
        assert_eq!(note.content, "new");
        assert_eq!(
            note.metadata.extra["status"],
            serde_yaml::Value::String("done".into())
        );
        assert_eq!(
            note.metadata.extra["owner"],
            serde_yaml::Value::String("kim".into())
        );
    }

    #[test]
    fn append_separates_with_a_blank_line() {
        let mut store = InMemoryStore::new().with_note("Log", "first\n\n");
        append(&mut store, "Log", "second").unwrap();
        assert_eq!(read(&store, "Log").unwrap().content, "first\n\nsecond");
    }

    #[test]
    fn delete_missing_note_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            delete(&mut store, "ghost"),
            Err(VaultError::NoteNotFound(_))
        ));
    }
}
