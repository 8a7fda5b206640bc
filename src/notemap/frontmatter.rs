//! Front-matter split and serialization.
//!
//! A note file is an optional YAML block fenced by `---` lines, followed by
//! the Markdown body. [`parse_note`] splits one into `(Metadata, body)`;
//! [`serialize_note`] is the inverse. A file without a front-matter block is
//! all body.

use crate::error::Result;
use crate::model::Metadata;

const DELIMITER: &str = "---";

/// Split a raw note into front-matter and body.
///
/// The body is returned without the conventional blank line after the
/// closing delimiter. A leading `---` with no closing delimiter is treated
/// as plain body text, not an error.
pub fn parse_note(text: &str) -> Result<(Metadata, String)> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.first().map(|l| l.trim_end()) != Some(DELIMITER) {
        return Ok((Metadata::default(), text.to_string()));
    }

    let Some(close) = lines[1..]
        .iter()
        .position(|l| l.trim_end() == DELIMITER)
        .map(|i| i + 1)
    else {
        return Ok((Metadata::default(), text.to_string()));
    };

    let yaml = lines[1..close].join("\n");
    let metadata = if yaml.trim().is_empty() {
        Metadata::default()
    } else {
        serde_yaml::from_str(&yaml)?
    };
    let body = lines[close + 1..].join("\n");
    Ok((metadata, body.trim_start_matches('\n').to_string()))
}

/// Join front-matter and body back into note text. Empty front-matter emits
/// no delimiter block at all.
pub fn serialize_note(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagField;

    #[test]
    fn splits_front_matter_and_body() {
        let text = "---\ntitle: Plan\ntags:\n  - work\n  - daily\n---\n\n# Heading\nBody";
        let (meta, body) = parse_note(text).unwrap();
        assert_eq!(meta.tags(), vec!["work", "daily"]);
        assert_eq!(meta.extra["title"], serde_yaml::Value::String("Plan".into()));
        assert_eq!(body, "# Heading\nBody");
    }

    #[test]
    fn no_front_matter_is_all_body() {
        let (meta, body) = parse_note("# Just a note\n").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "# Just a note\n");
    }

    #[test]
    fn unterminated_front_matter_is_body() {
        let text = "---\ntitle: Oops\nno closing line";
        let (meta, body) = parse_note(text).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn csv_tag_string_survives_the_split() {
        let (meta, _) = parse_note("---\ntags: work, urgent\n---\nx").unwrap();
        assert_eq!(meta.tags, Some(TagField::Csv("work, urgent".into())));
        assert_eq!(meta.tags(), vec!["work", "urgent"]);
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let mut meta = Metadata::default();
        meta.set_tags(vec!["work".into()]);
        meta.extra
            .insert("title".into(), serde_yaml::Value::String("Plan".into()));

        let text = serialize_note(&meta, "Body line\n\nMore").unwrap();
        let (parsed, body) = parse_note(&text).unwrap();
        assert_eq!(parsed, meta);
        assert_eq!(body, "Body line\n\nMore");
    }

    #[test]
    fn empty_metadata_emits_bare_body() {
        let text = serialize_note(&Metadata::default(), "plain").unwrap();
        assert_eq!(text, "plain");
    }
}
