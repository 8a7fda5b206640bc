use crate::error::Result;
use crate::frontmatter;
use crate::store::VaultStore;

const PREVIEW_LINES: usize = 5;

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub path: String,
    /// Up to five body lines containing the query.
    pub matches: Vec<String>,
}

/// Case-insensitive substring search over note bodies and paths.
pub fn run<S: VaultStore>(store: &S, query: &str) -> Result<Vec<SearchHit>> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();
    for path in store.list_notes()? {
        let raw = store.read_note(&path)?;
        if !raw.to_lowercase().contains(&needle) && !path.to_lowercase().contains(&needle) {
            continue;
        }
        let (_, body) = frontmatter::parse_note(&raw)?;
        let matches: Vec<String> = body
            .lines()
            .filter(|line| line.to_lowercase().contains(&needle))
            .take(PREVIEW_LINES)
            .map(String::from)
            .collect();
        hits.push(SearchHit { path, matches });
    }
    Ok(hits)
}
