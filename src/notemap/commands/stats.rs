use super::{links, tags};
use crate::error::Result;
use crate::store::VaultStore;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VaultStats {
    pub note_count: usize,
    pub tag_count: usize,
    /// Raw extracted references, resolved or not.
    pub link_count: usize,
}

pub fn run<S: VaultStore>(store: &S) -> Result<VaultStats> {
    let note_count = store.list_notes()?.len();
    let tag_count = tags::list(store)?.len();
    let link_count = links::link_map(store)?
        .iter()
        .map(|(_, targets)| targets.len())
        .sum();
    Ok(VaultStats {
        note_count,
        tag_count,
        link_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn counts_notes_distinct_tags_and_raw_links() {
        let store = InMemoryStore::new()
            .with_note("A", "#x #y [[B]] [[Ghost]]")
            .with_note("B", "#x");
        let s = run(&store).unwrap();
        assert_eq!(s.note_count, 2);
        assert_eq!(s.tag_count, 2);
        assert_eq!(s.link_count, 2);
    }
}
