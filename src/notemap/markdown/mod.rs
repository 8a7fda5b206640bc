//! Markdown text engines: the section tokenizer and reference extraction.
//!
//! Both submodules are pure functions over body text (front-matter already
//! stripped). They share one piece of grammar: code fences. A fence line is
//! ≥3 identical backticks or tildes; everything between an opening fence and
//! the next line starting with ≥3 of the *same* marker is opaque. An
//! unterminated fence stays open through end of document.

pub mod extract;
pub mod sections;

/// Returns the fence marker when `line` opens (or closes) a code fence.
pub(crate) fn fence_marker(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = 1 + chars.take_while(|&c| c == first).count();
    (run >= 3).then_some(first)
}
