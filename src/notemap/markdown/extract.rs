//! Reference Extractor: link targets and inline tags from body text.
//!
//! Tag extraction strips fenced blocks and inline code spans first; link
//! extraction deliberately does not — a target inside a code span is still
//! extracted. The asymmetry is long-standing observed behavior and is kept
//! as-is (see the tests that pin it down).

use super::fence_marker;
use once_cell::sync::Lazy;
use regex::Regex;

// [[target]] or [[target|alias]]; the alias is never captured.
static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").expect("wikilink regex"));

// [label](target); external http(s) targets are filtered after capture.
static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").expect("markdown link regex"));

// #tag at line start or after whitespace; word chars are Unicode-aware.
static INLINE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#([\w/-]+)").expect("inline tag regex"));

static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`\n]*`").expect("inline code regex"));

/// Extract raw link targets: wikilink targets first, then markdown-link
/// targets, external URLs excluded. No deduplication, no resolution.
pub fn extract_links(body: &str) -> Vec<String> {
    let mut links: Vec<String> = WIKILINK_RE
        .captures_iter(body)
        .map(|cap| cap[1].to_string())
        .collect();
    for cap in MD_LINK_RE.captures_iter(body) {
        let target = &cap[1];
        if target.starts_with("http://") || target.starts_with("https://") {
            continue;
        }
        links.push(target.to_string());
    }
    links
}

/// Extract inline `#tag` occurrences, ignoring code content. Returned
/// without the leading `#`.
pub fn extract_tags(body: &str) -> Vec<String> {
    let stripped = strip_code(body);
    INLINE_TAG_RE
        .captures_iter(&stripped)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Drop fenced blocks (fence lines included) and blank out inline code
/// spans. An unterminated fence strips to end of document, consistent with
/// the section tokenizer.
fn strip_code(body: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut fence: Option<char> = None;
    for line in body.split('\n') {
        match fence {
            Some(marker) => {
                if fence_marker(line) == Some(marker) {
                    fence = None;
                }
            }
            None => {
                if let Some(marker) = fence_marker(line) {
                    fence = Some(marker);
                } else {
                    kept.push(line);
                }
            }
        }
    }
    INLINE_CODE_RE.replace_all(&kept.join("\n"), " ").into_owned()
}
