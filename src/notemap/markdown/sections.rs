//! Section Model: tokenize a body into delimiter-separated sections and
//! reconstruct a body from them.
//!
//! Delimiters are ATX headings (`#`–`######` followed by at least one space
//! and text) and thematic breaks (a line of 3+ dashes). Lines inside code
//! fences are never delimiters — a `# comment` in a code block must not
//! split the document.
//!
//! Reconstruction is not a byte-exact inverse of arbitrary input (blank-line
//! normalization around headings is not preserved): `reconstruct(parse(x))`
//! need not equal `x`, but `parse(reconstruct(parse(x)))` always equals
//! `parse(x)` — section boundaries are stable after one round trip.

use super::fence_marker;
use crate::model::Section;

/// The literal heading stored for thematic-break sections.
pub const BREAK_MARKER: &str = "---";

/// Tokenize `body` into an ordered section sequence.
///
/// Content before the first delimiter becomes a headingless level-0 preamble
/// (only when non-empty). A body without any delimiter is a single section,
/// even when empty.
pub fn parse_sections(body: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut fence: Option<char> = None;
    let mut current: Option<(String, u8)> = None;
    let mut buf: Vec<&str> = Vec::new();

    for line in body.split('\n') {
        if let Some(marker) = fence {
            buf.push(line);
            if fence_marker(line) == Some(marker) {
                fence = None;
            }
            continue;
        }
        if let Some(marker) = fence_marker(line) {
            fence = Some(marker);
            buf.push(line);
            continue;
        }

        let delimiter = if let Some(level) = heading_level(line) {
            Some((line.to_string(), level))
        } else if is_thematic_break(line) {
            Some((BREAK_MARKER.to_string(), 0))
        } else {
            None
        };

        match delimiter {
            Some(next) => {
                flush(&mut sections, current.take(), &mut buf);
                current = Some(next);
            }
            None => buf.push(line),
        }
    }
    flush(&mut sections, current.take(), &mut buf);

    if sections.is_empty() {
        sections.push(Section {
            index: 0,
            heading: None,
            level: 0,
            content: body.to_string(),
        });
    }
    sections
}

fn flush(sections: &mut Vec<Section>, delimiter: Option<(String, u8)>, buf: &mut Vec<&str>) {
    let content = buf.join("\n");
    buf.clear();
    match delimiter {
        Some((heading, level)) => sections.push(Section {
            index: sections.len(),
            heading: Some(heading),
            level,
            content,
        }),
        // Headingless preamble, only worth a section when non-empty.
        None => {
            if !content.is_empty() {
                sections.push(Section {
                    index: sections.len(),
                    heading: None,
                    level: 0,
                    content,
                });
            }
        }
    }
}

fn heading_level(line: &str) -> Option<u8> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if rest.starts_with(' ') && !rest.trim().is_empty() {
        Some(hashes as u8)
    } else {
        None
    }
}

fn is_thematic_break(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Join sections back into a body: heading line (if any), then content (if
/// non-empty), single newlines between parts. A heading with empty content
/// emits only the heading line.
pub fn reconstruct_body(sections: &[Section]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for section in sections {
        if let Some(heading) = &section.heading {
            parts.push(heading);
        }
        if !section.content.is_empty() {
            parts.push(&section.content);
        }
    }
    parts.join("\n")
}

/// Look a section up by heading text. Leading `#`s and surrounding
/// whitespace are stripped from both sides; the thematic-break marker `---`
/// is matched verbatim. Only the first of duplicate headings is addressable.
pub fn find_section<'a>(sections: &'a [Section], heading: &str) -> Option<&'a Section> {
    let wanted = normalize_heading(heading);
    sections
        .iter()
        .find(|s| s.heading.as_deref().is_some_and(|h| normalize_heading(h) == wanted))
}

fn normalize_heading(heading: &str) -> &str {
    heading.trim_start_matches(['#', ' ']).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(sections: &[Section]) -> Vec<(Option<String>, u8)> {
        sections.iter().map(|s| (s.heading.clone(), s.level)).collect()
    }

    #[test]
    fn empty_body_is_one_empty_section() {
        let sections = parse_sections("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn body_without_delimiters_is_one_section() {
        let body = "just text\nwith lines\n";
        let sections = parse_sections(body);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, body);
    }

    #[test]
    fn headings_split_sections_and_keep_raw_lines() {
        let body = "intro\n# One\nalpha\n### Three\nbeta";
        let sections = parse_sections(body);
        assert_eq!(
            shape(&sections),
            vec![
                (None, 0),
                (Some("# One".into()), 1),
                (Some("### Three".into()), 3),
            ]
        );
        assert_eq!(sections[0].content, "intro");
        assert_eq!(sections[1].content, "alpha");
        assert_eq!(sections[2].content, "beta");
    }

    #[test]
    fn thematic_break_is_a_level_zero_delimiter() {
        let sections = parse_sections("a\n-----  \nb");
        assert_eq!(
            shape(&sections),
            vec![(None, 0), (Some("---".into()), 0)]
        );
        assert_eq!(sections[1].content, "b");
    }

    #[test]
    fn fenced_heading_never_splits() {
        let body = "```\n# Not A Heading\n```\nReal\n# Heading\nBody";
        let sections = parse_sections(body);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].content, "```\n# Not A Heading\n```\nReal");
        assert_eq!(sections[1].heading.as_deref(), Some("# Heading"));
        assert_eq!(sections[1].content, "Body");
    }

    #[test]
    fn fence_only_closes_on_matching_marker() {
        let body = "~~~\n```\n# still fenced\n~~~~\n# Real\nx";
        let sections = parse_sections(body);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].heading.as_deref(), Some("# Real"));
    }

    #[test]
    fn unterminated_fence_swallows_the_rest() {
        let body = "```\n# One\n---\n# Two";
        let sections = parse_sections(body);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, body);
    }

    #[test]
    fn seven_hashes_or_no_space_is_not_a_heading() {
        assert_eq!(parse_sections("####### nope").len(), 1);
        assert_eq!(parse_sections("#nope").len(), 1);
        assert_eq!(parse_sections("# ").len(), 1);
    }

    #[test]
    fn heading_with_empty_content_reconstructs_without_trailing_line() {
        let sections = parse_sections("# A\n");
        assert_eq!(reconstruct_body(&sections), "# A");
    }

    #[test]
    fn reconstruct_is_exact_for_already_normalized_bodies() {
        let body = "intro\n# One\nalpha\n\nbeta\n## Two\ngamma";
        assert_eq!(reconstruct_body(&parse_sections(body)), body);
    }

    #[test]
    fn boundaries_are_stable_under_one_round_trip() {
        let bodies = [
            "",
            "plain",
            "\n\n# A\n\ntext\n\n## B\n",
            "```\n# x\n```\n# Real\nbody",
            "---\nafter break\n# H\n",
        ];
        for body in bodies {
            let first = parse_sections(body);
            let second = parse_sections(&reconstruct_body(&first));
            assert_eq!(first, second, "boundaries drifted for {body:?}");
        }
    }

    #[test]
    fn lookup_normalizes_hashes_and_whitespace() {
        let sections = parse_sections("# Plan \ntext\n## Done\nmore");
        assert_eq!(find_section(&sections, "Plan").unwrap().index, 0);
        assert_eq!(find_section(&sections, "## Plan").unwrap().index, 0);
        assert_eq!(find_section(&sections, " Done ").unwrap().index, 1);
        assert!(find_section(&sections, "Missing").is_none());
    }

    #[test]
    fn break_marker_is_matched_verbatim() {
        let sections = parse_sections("a\n---\nb");
        assert_eq!(find_section(&sections, "---").unwrap().index, 1);
    }

    #[test]
    fn only_first_duplicate_heading_is_addressable() {
        let sections = parse_sections("# Log\nfirst\n# Log\nsecond");
        assert_eq!(find_section(&sections, "Log").unwrap().content, "first");
    }
}
