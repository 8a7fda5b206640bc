use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Front-matter of a note: a `tags` field of variant shape plus an open map
/// for every other key. Unknown keys round-trip untouched through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagField>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `tags` front-matter field as authors actually write it: either a YAML
/// sequence or a single comma-separated string. Anything else is carried
/// through verbatim and contributes no tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    Csv(String),
    List(Vec<Value>),
    Other(Value),
}

impl Metadata {
    /// The normalized tag list from the front-matter.
    pub fn tags(&self) -> Vec<String> {
        match &self.tags {
            Some(TagField::Csv(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            Some(TagField::List(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Replace the tag field with an explicit list.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = Some(TagField::List(tags.into_iter().map(Value::String).collect()));
    }

    /// Merge incoming front-matter into this one; incoming keys win.
    pub fn merge(&mut self, incoming: Metadata) {
        if incoming.tags.is_some() {
            self.tags = incoming.tags;
        }
        self.extra.extend(incoming.extra);
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_none() && self.extra.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One slice of a note body, delimited by headings or thematic breaks.
///
/// `heading` holds the raw heading line (`### Text`), the literal `---` for a
/// thematic break, or nothing for the headingless preamble. Sections form a
/// flat ordered sequence; `level` nesting is observable but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub index: usize,
    pub heading: Option<String>,
    pub level: u8,
    pub content: String,
}

/// A note read from the vault, split into front-matter and body.
#[derive(Debug, Clone, Serialize)]
pub struct NoteData {
    pub path: String,
    pub metadata: Metadata,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// The whole-vault link graph. Nodes are sorted for determinism; edges keep
/// insertion order (one per source/resolved-target pair).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    pub nodes: Vec<String>,
    pub edges: Vec<GraphEdge>,
    pub node_count: usize,
    pub edge_count: usize,
}
