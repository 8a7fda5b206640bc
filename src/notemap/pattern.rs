//! Folder Pattern Resolver: wildcard patterns mapping folders to templates.
//!
//! Pattern language: `/`-separated segments where `**` matches zero or more
//! whole segments and every other segment is a shell glob over exactly one
//! folder segment (`*`, `?`, `[...]` classes, `[!...]` negation). Matching
//! is an iterative dynamic program over (folder-segment, pattern-segment)
//! index pairs, and the per-segment glob is a second DP over (char, token)
//! pairs, so long `**` chains stay linear-ish instead of exploding a naive
//! recursion.
//!
//! `resolve_template` precedence, short-circuiting on the first hit:
//! 1. exact key equality;
//! 2. the most specific structurally-matching wildcard key — greatest
//!    `(segment_count, literal_segment_count)`, fewest `**` segments, then
//!    pattern string order as the final deterministic tie-break;
//! 3. the nearest ancestor folder present as an exact key;
//! 4. nothing.

use crate::error::{Result, VaultError};
use std::collections::BTreeMap;

/// True when the key should compete in wildcard matching rather than exact
/// or ancestor lookup.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Ranking key for competing wildcard matches: total segments, then
/// segments free of `*`/`?`.
pub fn specificity(pattern: &str) -> (usize, usize) {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal = segments
        .iter()
        .filter(|s| !s.contains('*') && !s.contains('?'))
        .count();
    (segments.len(), literal)
}

/// Backslashes to slashes, no leading or trailing slash.
pub fn normalize_folder(folder: &str) -> String {
    folder.replace('\\', "/").trim_matches('/').to_string()
}

/// Check every glob segment compiles; `set` validates patterns before they
/// are persisted so a malformed class never reaches the matcher from our
/// own writes.
pub fn validate(pattern: &str) -> Result<()> {
    for segment in pattern.split('/') {
        if segment != "**" {
            compile_segment(segment)?;
        }
    }
    Ok(())
}

/// Does `folder` structurally match `pattern`? Both exhausted together is
/// required; `**` may consume zero segments.
pub fn pattern_matches(folder: &str, pattern: &str) -> Result<bool> {
    let folder_segs: Vec<&str> = folder.split('/').collect();
    // None marks a `**` segment; everything else is a compiled glob.
    let compiled: Vec<Option<Vec<Token>>> = pattern
        .split('/')
        .map(|seg| {
            if seg == "**" {
                Ok(None)
            } else {
                compile_segment(seg).map(Some)
            }
        })
        .collect::<Result<_>>()?;

    let (n, m) = (folder_segs.len(), compiled.len());
    // dp[i][j]: folder[i..] matches pattern[j..]
    let mut dp = vec![vec![false; m + 1]; n + 1];
    dp[n][m] = true;
    for j in (0..m).rev() {
        dp[n][j] = compiled[j].is_none() && dp[n][j + 1];
    }
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = match &compiled[j] {
                None => dp[i][j + 1] || dp[i + 1][j],
                Some(tokens) => segment_matches(folder_segs[i], tokens) && dp[i + 1][j + 1],
            };
        }
    }
    Ok(dp[0][0])
}

/// Resolve the effective template for `folder` against the persisted
/// mapping. See the module docs for the precedence order.
pub fn resolve_template(
    mapping: &BTreeMap<String, String>,
    folder: &str,
) -> Result<Option<String>> {
    let folder = normalize_folder(folder);

    // 1. Exact match.
    if let Some(template) = mapping.get(&folder) {
        return Ok(Some(template.clone()));
    }

    // 2. Most specific matching wildcard pattern.
    let mut candidates: Vec<((usize, usize), usize, &str, &str)> = Vec::new();
    for (pattern, template) in mapping {
        if is_wildcard(pattern) && pattern_matches(&folder, pattern)? {
            let doublestar = pattern.split('/').filter(|s| *s == "**").count();
            candidates.push((specificity(pattern), doublestar, pattern, template));
        }
    }
    candidates.sort_by(|a, b| {
        a.0.cmp(&b.0) // specificity ascending
            .then(b.1.cmp(&a.1)) // fewer ** segments ranks higher
            .then(a.2.cmp(b.2)) // pattern string, deterministic
    });
    if let Some((_, _, _, template)) = candidates.last() {
        return Ok(Some((*template).to_string()));
    }

    // 3. Nearest ancestor with an exact mapping, root excluded.
    let segments: Vec<&str> = folder.split('/').collect();
    for i in (1..segments.len()).rev() {
        let parent = segments[..i].join("/");
        if let Some(template) = mapping.get(&parent) {
            return Ok(Some(template.clone()));
        }
    }

    Ok(None)
}

enum Token {
    Literal(char),
    AnyChar,
    Star,
    Class { negated: bool, ranges: Vec<(char, char)> },
}

fn compile_segment(segment: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = segment.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => tokens.push(Token::Star),
            '?' => tokens.push(Token::AnyChar),
            '[' => {
                let mut j = i + 1;
                let negated = chars.get(j) == Some(&'!');
                if negated {
                    j += 1;
                }
                let mut ranges = Vec::new();
                let mut first = true;
                loop {
                    match chars.get(j) {
                        None => return Err(VaultError::InvalidPattern(segment.to_string())),
                        // `]` closes the class unless it is the first member.
                        Some(']') if !first => break,
                        Some(&c) => {
                            if chars.get(j + 1) == Some(&'-')
                                && chars.get(j + 2).is_some_and(|&e| e != ']')
                            {
                                ranges.push((c, chars[j + 2]));
                                j += 3;
                            } else {
                                ranges.push((c, c));
                                j += 1;
                            }
                        }
                    }
                    first = false;
                }
                tokens.push(Token::Class { negated, ranges });
                i = j;
            }
            c => tokens.push(Token::Literal(c)),
        }
        i += 1;
    }
    Ok(tokens)
}

fn segment_matches(text: &str, tokens: &[Token]) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let (n, m) = (chars.len(), tokens.len());
    // dp[i][j]: chars[i..] matches tokens[j..]
    let mut dp = vec![vec![false; m + 1]; n + 1];
    dp[n][m] = true;
    for j in (0..m).rev() {
        dp[n][j] = matches!(tokens[j], Token::Star) && dp[n][j + 1];
    }
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = match &tokens[j] {
                Token::Star => dp[i][j + 1] || dp[i + 1][j],
                Token::AnyChar => dp[i + 1][j + 1],
                Token::Literal(c) => chars[i] == *c && dp[i + 1][j + 1],
                Token::Class { negated, ranges } => {
                    let inside = ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&chars[i]));
                    inside != *negated && dp[i + 1][j + 1]
                }
            };
        }
    }
    dp[0][0]
}
