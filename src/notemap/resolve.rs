//! Link Resolver: turn a raw link target into a canonical note path.
//!
//! Resolution is exact-path first, then filename fallback — the convention
//! where authors write `[[Note]]` for a note living anywhere in the vault.
//! Two notes sharing a filename in different folders are ambiguous and the
//! fallback silently picks the first in enumeration order (documented
//! precision loss, not an error).

/// The fixed note extension; canonical paths always carry it.
pub const NOTE_EXT: &str = ".md";

/// Normalize a raw link target against the known path set.
///
/// `known_paths` must be the store's sorted enumeration, which makes the
/// filename fallback deterministic (lexicographically first match wins).
pub fn normalize_target(target: &str, known_paths: &[String]) -> Option<String> {
    let qualified = ensure_md_ext(target);
    if known_paths.iter().any(|p| p == &qualified) {
        return Some(qualified);
    }
    let name = filename(&qualified);
    known_paths.iter().find(|p| filename(p) == name).cloned()
}

/// Append the note extension unless already present.
pub fn ensure_md_ext(path: &str) -> String {
    if path.ends_with(NOTE_EXT) {
        path.to_string()
    } else {
        format!("{path}{NOTE_EXT}")
    }
}

/// Final path segment.
pub fn filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Final path segment minus its last extension, used by the backlink name
/// fallback. A leading dot does not count as an extension separator.
pub fn stem(path: &str) -> &str {
    let name = filename(path);
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_path_wins() {
        let known = paths(&["a/Note.md", "Note.md"]);
        assert_eq!(
            normalize_target("a/Note", &known).as_deref(),
            Some("a/Note.md")
        );
    }

    #[test]
    fn extension_is_appended_when_absent() {
        let known = paths(&["Plan.md"]);
        assert_eq!(normalize_target("Plan", &known).as_deref(), Some("Plan.md"));
        assert_eq!(
            normalize_target("Plan.md", &known).as_deref(),
            Some("Plan.md")
        );
    }

    #[test]
    fn filename_fallback_finds_nested_note() {
        let known = paths(&["folder/Note.md"]);
        assert_eq!(
            normalize_target("Note", &known).as_deref(),
            Some("folder/Note.md")
        );
    }

    #[test]
    fn fallback_takes_first_in_sorted_order() {
        let known = paths(&["a/Dup.md", "b/Dup.md"]);
        assert_eq!(normalize_target("Dup", &known).as_deref(), Some("a/Dup.md"));
    }

    #[test]
    fn unknown_target_is_unresolved() {
        assert_eq!(normalize_target("Ghost", &paths(&["Real.md"])), None);
    }

    #[test]
    fn stem_strips_one_extension() {
        assert_eq!(stem("a/b/Note.md"), "Note");
        assert_eq!(stem("Note"), "Note");
        assert_eq!(stem("archive.tar.gz"), "archive.tar");
        assert_eq!(stem(".hidden"), ".hidden");
    }
}
