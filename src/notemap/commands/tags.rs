use super::read_parsed;
use crate::error::Result;
use crate::frontmatter;
use crate::markdown::extract::extract_tags;
use crate::store::VaultStore;
use std::collections::BTreeMap;

/// One tag with its vault-wide usage count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// A note's effective tags: front-matter tags plus inline tags.
fn effective_tags<S: VaultStore>(store: &S, path: &str) -> Result<Vec<String>> {
    let (_, metadata, body) = read_parsed(store, path)?;
    let mut tags = metadata.tags();
    tags.extend(extract_tags(&body));
    Ok(tags)
}

/// Vault-wide tag census, most used first (name order for ties).
pub fn list<S: VaultStore>(store: &S) -> Result<Vec<TagCount>> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for path in store.list_notes()? {
        for tag in effective_tags(store, &path)? {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    let mut out: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.name.cmp(&b.name)));
    Ok(out)
}

/// Notes carrying `tag` (leading `#`s tolerated), in path order.
pub fn search<S: VaultStore>(store: &S, tag: &str) -> Result<Vec<String>> {
    let wanted = tag.trim_start_matches('#');
    let mut out = Vec::new();
    for path in store.list_notes()? {
        if effective_tags(store, &path)?.iter().any(|t| t == wanted) {
            out.push(path);
        }
    }
    Ok(out)
}

/// Add a tag to the note's front-matter. Returns false when already present
/// (a no-op, not an error).
pub fn add<S: VaultStore>(store: &mut S, path: &str, tag: &str) -> Result<bool> {
    let tag = tag.trim_start_matches('#');
    let (canonical, mut meta, body) = read_parsed(store, path)?;
    let mut tags = meta.tags();
    if tags.iter().any(|t| t == tag) {
        return Ok(false);
    }
    tags.push(tag.to_string());
    meta.set_tags(tags);
    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &body)?)?;
    Ok(true)
}

/// Remove a tag from the note's front-matter. Returns false when absent.
pub fn remove<S: VaultStore>(store: &mut S, path: &str, tag: &str) -> Result<bool> {
    let tag = tag.trim_start_matches('#');
    let (canonical, mut meta, body) = read_parsed(store, path)?;
    let mut tags = meta.tags();
    let Some(pos) = tags.iter().position(|t| t == tag) else {
        return Ok(false);
    };
    tags.remove(pos);
    meta.set_tags(tags);
    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &body)?)?;
    Ok(true)
}
