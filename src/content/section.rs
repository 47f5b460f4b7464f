//! Section model: the loose authoring shape and the closed typed shape

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Inline;

/// Keys a section record may carry. Anything else is an unknown variant.
pub const KNOWN_KEYS: &[&str] = &[
    "id",
    "title",
    "summary",
    "paragraphs",
    "checklist",
    "perspectives",
    "comparisonTable",
    "plays",
    "references",
    "faqs",
];

/// A section as authored. The variant is implied by which keys are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<Inline>,
    #[serde(default)]
    pub paragraphs: Vec<Inline>,
    #[serde(default)]
    pub checklist: Option<Checklist>,
    #[serde(default)]
    pub perspectives: Option<Vec<Card>>,
    #[serde(default)]
    pub comparison_table: Option<ComparisonTable>,
    #[serde(default)]
    pub plays: Option<Vec<Play>>,
    #[serde(default)]
    pub references: Option<Vec<Reference>>,
    #[serde(default)]
    pub faqs: Option<Vec<Card>>,

    /// Keys outside the known set
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl RawSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Structured-block kinds present on this record, in declaration order
    pub fn block_kinds(&self) -> Vec<SectionKind> {
        let mut kinds = Vec::new();
        if self.checklist.is_some() {
            kinds.push(SectionKind::Checklist);
        }
        if self.perspectives.is_some() {
            kinds.push(SectionKind::Perspectives);
        }
        if self.comparison_table.is_some() {
            kinds.push(SectionKind::ComparisonTable);
        }
        if self.plays.is_some() {
            kinds.push(SectionKind::Plays);
        }
        if self.references.is_some() {
            kinds.push(SectionKind::References);
        }
        if self.faqs.is_some() {
            kinds.push(SectionKind::Faqs);
        }
        kinds
    }

    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.unknown.keys().map(String::as_str)
    }
}

/// Checklist block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Title + body pair used by perspectives and FAQs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub title: String,
    pub detail: Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub label: String,
    pub href: String,
}

/// The one structured block a section may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Checklist(Checklist),
    Perspectives(Vec<Card>),
    ComparisonTable(ComparisonTable),
    Plays(Vec<Play>),
    References(Vec<Reference>),
    Faqs(Vec<Card>),
}

impl Block {
    pub fn kind(&self) -> SectionKind {
        match self {
            Block::Checklist(_) => SectionKind::Checklist,
            Block::Perspectives(_) => SectionKind::Perspectives,
            Block::ComparisonTable(_) => SectionKind::ComparisonTable,
            Block::Plays(_) => SectionKind::Plays,
            Block::References(_) => SectionKind::References,
            Block::Faqs(_) => SectionKind::Faqs,
        }
    }

    /// Number of entries (items, cards, rows, links)
    pub fn len(&self) -> usize {
        match self {
            Block::Checklist(c) => c.items.len(),
            Block::Perspectives(cards) | Block::Faqs(cards) => cards.len(),
            Block::ComparisonTable(t) => t.rows.len(),
            Block::Plays(plays) => plays.len(),
            Block::References(refs) => refs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Variant tag of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Summary,
    Narrative,
    Checklist,
    Perspectives,
    ComparisonTable,
    Plays,
    References,
    Faqs,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Summary,
        SectionKind::Narrative,
        SectionKind::Checklist,
        SectionKind::Perspectives,
        SectionKind::ComparisonTable,
        SectionKind::Plays,
        SectionKind::References,
        SectionKind::Faqs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Narrative => "narrative",
            SectionKind::Checklist => "checklist",
            SectionKind::Perspectives => "perspectives",
            SectionKind::ComparisonTable => "comparisonTable",
            SectionKind::Plays => "plays",
            SectionKind::References => "references",
            SectionKind::Faqs => "faqs",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub summary: Option<Inline>,
    pub paragraphs: Vec<Inline>,
    pub block: Option<Block>,
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match &self.block {
            Some(block) => block.kind(),
            None if !self.paragraphs.is_empty() => SectionKind::Narrative,
            None => SectionKind::Summary,
        }
    }

    /// FAQ cards, if this is an FAQ section
    pub fn faqs(&self) -> Option<&[Card]> {
        match &self.block {
            Some(Block::Faqs(cards)) => Some(cards),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checklist_section() {
        let yaml = r#"
id: key-takeaways
title: Key takeaways
summary: What to remember.
checklist:
  title: Before you publish
  items:
    - Audit titles
    - Check canonical tags
"#;
        let raw: RawSection = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(raw.id, "key-takeaways");
        assert_eq!(raw.block_kinds(), vec![SectionKind::Checklist]);
        assert!(raw.unknown.is_empty());
        let checklist = raw.checklist.unwrap();
        assert_eq!(checklist.items.len(), 2);
        assert_eq!(checklist.title.as_deref(), Some("Before you publish"));
    }

    #[test]
    fn test_unknown_key_is_captured() {
        let json = r#"{"id": "promo", "title": "Promo", "callout": {"text": "Buy now"}}"#;
        let raw: RawSection = serde_json::from_str(json).unwrap();
        assert_eq!(raw.unknown_keys().collect::<Vec<_>>(), vec!["callout"]);
    }

    #[test]
    fn test_comparison_table_key_is_camel_case() {
        let json = r#"{"id": "t", "title": "T", "comparisonTable": {"headers": ["a"], "rows": [["1"]]}}"#;
        let raw: RawSection = serde_json::from_str(json).unwrap();
        assert_eq!(raw.block_kinds(), vec![SectionKind::ComparisonTable]);
        assert!(raw.unknown.is_empty());
    }

    #[test]
    fn test_kind_falls_back_to_narrative_then_summary() {
        let mut section = Section {
            id: "intro".to_string(),
            title: "Intro".to_string(),
            summary: Some(Inline::text("Lead")),
            paragraphs: Vec::new(),
            block: None,
        };
        assert_eq!(section.kind(), SectionKind::Summary);
        section.paragraphs.push(Inline::text("Body"));
        assert_eq!(section.kind(), SectionKind::Narrative);
        section.block = Some(Block::References(Vec::new()));
        assert_eq!(section.kind(), SectionKind::References);
    }
}
