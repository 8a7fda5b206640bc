use super::read_parsed;
use crate::error::{Result, VaultError};
use crate::frontmatter;
use crate::markdown::sections::{find_section, parse_sections, reconstruct_body};
use crate::model::Section;
use crate::store::VaultStore;

pub fn list<S: VaultStore>(store: &S, path: &str) -> Result<Vec<Section>> {
    let (_, _, body) = read_parsed(store, path)?;
    Ok(parse_sections(&body))
}

pub fn read<S: VaultStore>(store: &S, path: &str, heading: &str) -> Result<Section> {
    let (_, _, body) = read_parsed(store, path)?;
    let sections = parse_sections(&body);
    find_section(&sections, heading)
        .cloned()
        .ok_or_else(|| VaultError::SectionNotFound(heading.to_string()))
}

/// Replace one section's content, keeping its heading, and write the
/// reconstructed body back. Nothing is written when the section is missing.
pub fn update<S: VaultStore>(
    store: &mut S,
    path: &str,
    heading: &str,
    content: &str,
) -> Result<String> {
    let (canonical, meta, body) = read_parsed(store, path)?;
    let mut sections = parse_sections(&body);
    let index = find_section(&sections, heading)
        .map(|s| s.index)
        .ok_or_else(|| VaultError::SectionNotFound(heading.to_string()))?;
    sections[index].content = content.to_string();

    let new_body = reconstruct_body(&sections);
    store.write_note(&canonical, &frontmatter::serialize_note(&meta, &new_body)?)?;
    Ok(canonical)
}
