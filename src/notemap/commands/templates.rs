use super::notes::{self, CreateOutcome};
use crate::error::{Result, VaultError};
use crate::pattern;
use crate::store::VaultStore;
use std::collections::BTreeMap;

pub fn list<S: VaultStore>(store: &S) -> Result<Vec<String>> {
    store.list_templates()
}

pub fn create_from<S: VaultStore>(
    store: &mut S,
    template: &str,
    path: &str,
    variables: &BTreeMap<String, String>,
) -> Result<CreateOutcome> {
    notes::create(store, path, "", None, Some(template), variables)
}

/// The whole persisted folder→template mapping.
pub fn folder_mappings<S: VaultStore>(store: &S) -> Result<BTreeMap<String, String>> {
    Ok(store.load_settings()?.folder_templates)
}

/// Effective template for a folder, by the precedence in [`pattern`].
pub fn resolve_folder<S: VaultStore>(store: &S, folder: &str) -> Result<Option<String>> {
    let settings = store.load_settings()?;
    pattern::resolve_template(&settings.folder_templates, folder)
}

/// Map a folder (or wildcard pattern) to a template. The template must
/// exist and the pattern must compile before anything is persisted.
pub fn set_folder<S: VaultStore>(
    store: &mut S,
    folder: &str,
    template: &str,
) -> Result<(String, String)> {
    pattern::validate(folder)?;
    if !store.template_exists(template)? {
        return Err(VaultError::TemplateNotFound(template.to_string()));
    }
    let key = pattern::normalize_folder(folder);
    let mut settings = store.load_settings()?;
    settings
        .folder_templates
        .insert(key.clone(), template.to_string());
    store.save_settings(&settings)?;
    Ok((key, template.to_string()))
}

/// Drop a folder mapping; the removed template name is returned.
pub fn remove_folder<S: VaultStore>(store: &mut S, folder: &str) -> Result<String> {
    let key = pattern::normalize_folder(folder);
    let mut settings = store.load_settings()?;
    let Some(template) = settings.folder_templates.remove(&key) else {
        return Err(VaultError::MappingNotFound(key));
    };
    store.save_settings(&settings)?;
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_template("Daily", "d")
            .with_template("Weekly", "w")
    }

    #[test]
    fn set_requires_an_existing_template() {
        let mut s = store();
        assert!(matches!(
            set_folder(&mut s, "journal", "Nope"),
            Err(VaultError::TemplateNotFound(_))
        ));
        assert!(folder_mappings(&s).unwrap().is_empty());
    }

    #[test]
    fn set_rejects_malformed_patterns_before_persisting() {
        let mut s = store();
        assert!(matches!(
            set_folder(&mut s, "journal/[bad", "Daily"),
            Err(VaultError::InvalidPattern(_))
        ));
        assert!(folder_mappings(&s).unwrap().is_empty());
    }

    #[test]
    fn set_normalizes_the_folder_key() {
        let mut s = store();
        let (key, _) = set_folder(&mut s, "/journal\\2025/", "Daily").unwrap();
        assert_eq!(key, "journal/2025");
        assert_eq!(
            resolve_folder(&s, "journal/2025").unwrap().as_deref(),
            Some("Daily")
        );
    }

    #[test]
    fn remove_returns_the_old_template_or_fails() {
        let mut s = store();
        set_folder(&mut s, "journal", "Daily").unwrap();
        assert_eq!(remove_folder(&mut s, "journal").unwrap(), "Daily");
        assert!(matches!(
            remove_folder(&mut s, "journal"),
            Err(VaultError::MappingNotFound(_))
        ));
    }

    #[test]
    fn resolve_is_stable_between_mutations() {
        let mut s = store();
        set_folder(&mut s, "journal/**", "Daily").unwrap();
        let a = resolve_folder(&s, "journal/x").unwrap();
        let b = resolve_folder(&s, "journal/x").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("Daily"));
    }

    #[test]
    fn create_from_template_applies_it() {
        let mut s = store();
        let out = create_from(&mut s, "Weekly", "work/W01", &BTreeMap::new()).unwrap();
        assert_eq!(out.template_applied.as_deref(), Some("Weekly"));
    }
}
