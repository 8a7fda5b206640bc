use super::read_parsed;
use crate::error::{Result, VaultError};
use crate::frontmatter;
use crate::markdown::extract::extract_links;
use crate::model::{Graph, GraphEdge};
use crate::resolve::{normalize_target, stem};
use crate::store::{canonical_note_path, VaultStore};
use std::collections::BTreeSet;

/// Raw extracted targets per note, built once per query (a single pass over
/// the vault, not one per candidate).
pub(crate) fn link_map<S: VaultStore>(store: &S) -> Result<Vec<(String, Vec<String>)>> {
    let mut map = Vec::new();
    for path in store.list_notes()? {
        let raw = store.read_note(&path)?;
        let (_, body) = frontmatter::parse_note(&raw)?;
        map.push((path, extract_links(&body)));
    }
    Ok(map)
}

/// Resolved targets the note links to, deduplicated and sorted.
pub fn forward<S: VaultStore>(store: &S, path: &str) -> Result<Vec<String>> {
    let (_, _, body) = read_parsed(store, path)?;
    let known = store.list_notes()?;
    let resolved: BTreeSet<String> = extract_links(&body)
        .iter()
        .filter_map(|target| normalize_target(target, &known))
        .collect();
    Ok(resolved.into_iter().collect())
}

/// Notes referencing this one, sorted and deduplicated.
///
/// A source counts when any of its raw targets resolves to this note's
/// canonical path, or shares its bare filename stem — the same name
/// convention the resolver's fallback uses. The stem check can
/// false-positive when distinct notes share a filename; that looseness is
/// kept deliberately.
pub fn backlinks<S: VaultStore>(store: &S, path: &str) -> Result<Vec<String>> {
    let canonical = canonical_note_path(path)?;
    if !store.note_exists(&canonical)? {
        return Err(VaultError::NoteNotFound(canonical));
    }
    let target_stem = stem(&canonical).to_string();
    let known = store.list_notes()?;

    let mut sources = BTreeSet::new();
    for (source, targets) in link_map(store)? {
        if source == canonical {
            continue;
        }
        let hits = targets.iter().any(|raw| {
            normalize_target(raw, &known).as_deref() == Some(canonical.as_str())
                || stem(raw) == target_stem
        });
        if hits {
            sources.insert(source);
        }
    }
    Ok(sources.into_iter().collect())
}

/// The whole-vault link graph. Nodes cover every enumerated note (linked or
/// not) plus every resolved target; unresolved references contribute no
/// edge.
pub fn graph<S: VaultStore>(store: &S) -> Result<Graph> {
    let known = store.list_notes()?;
    let mut nodes: BTreeSet<String> = known.iter().cloned().collect();
    let mut edges = Vec::new();
    for (source, targets) in link_map(store)? {
        for raw in &targets {
            if let Some(to) = normalize_target(raw, &known) {
                nodes.insert(to.clone());
                edges.push(GraphEdge {
                    from: source.clone(),
                    to,
                });
            }
        }
    }
    Ok(Graph {
        node_count: nodes.len(),
        edge_count: edges.len(),
        nodes: nodes.into_iter().collect(),
        edges,
    })
}
