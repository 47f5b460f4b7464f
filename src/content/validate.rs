//! Section validation
//!
//! Turns authored [`RawSection`] records into the closed [`Section`] model.
//! Every violation in the document is collected, so an author sees all
//! problems in one pass. Nothing is rendered unless the whole list is valid.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use super::section::{Block, RawSection, Section, SectionKind, KNOWN_KEYS};

lazy_static! {
    /// Section ids double as in-page anchors
    static ref ANCHOR_ID: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap();
}

/// Whether `s` can be used as a URL segment or in-page anchor
pub(crate) fn is_anchor_id(s: &str) -> bool {
    ANCHOR_ID.is_match(s)
}

/// Why a section was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// More than one structured block on one section
    MixedBlocks(Vec<SectionKind>),
    /// A comparison-table row whose cell count differs from the header count
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Id already used by an earlier section
    DuplicateId { first_index: usize },
    /// Id empty or not usable as an anchor
    InvalidId,
    /// No summary, no paragraphs and no block
    EmptySection,
    /// A structured block with nothing in it
    EmptyBlock(SectionKind),
    /// A key outside the section vocabulary
    UnknownVariant(String),
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::MixedBlocks(kinds) => {
                let names: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
                write!(
                    f,
                    "mixes structured blocks ({}); a section may carry only one",
                    names.join(", ")
                )
            }
            ValidationReason::RowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "comparison table row {} has {} cells, headers define {}",
                row, found, expected
            ),
            ValidationReason::DuplicateId { first_index } => {
                write!(f, "duplicate id, first used by section #{}", first_index)
            }
            ValidationReason::InvalidId => {
                write!(f, "id must match [A-Za-z0-9][A-Za-z0-9_-]*")
            }
            ValidationReason::EmptySection => {
                write!(f, "has no summary, paragraphs or structured block")
            }
            ValidationReason::EmptyBlock(kind) => write!(f, "{} block is empty", kind),
            ValidationReason::UnknownVariant(key) => write!(
                f,
                "unknown section key '{}' (expected one of: {})",
                key,
                KNOWN_KEYS.join(", ")
            ),
        }
    }
}

/// One violation, tied to the section that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub section_id: String,
    /// Position in the input sequence
    pub index: usize,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(raw: &RawSection, index: usize, reason: ValidationReason) -> Self {
        Self {
            section_id: raw.id.clone(),
            index,
            reason,
        }
    }

    pub fn is_unknown_variant(&self) -> bool {
        matches!(self.reason, ValidationReason::UnknownVariant(_))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section_id.is_empty() {
            write!(f, "section #{}: {}", self.index, self.reason)
        } else {
            write!(f, "section '{}': {}", self.section_id, self.reason)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Sections that passed [`validate`], in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSections(Vec<Section>);

impl ValidSections {
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ValidSections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate a document's sections, collecting every error
pub fn validate(sections: &[RawSection]) -> Result<ValidSections, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut valid = Vec::with_capacity(sections.len());

    for (index, raw) in sections.iter().enumerate() {
        let before = errors.len();

        for key in raw.unknown_keys() {
            errors.push(ValidationError::new(
                raw,
                index,
                ValidationReason::UnknownVariant(key.to_string()),
            ));
        }

        if !ANCHOR_ID.is_match(&raw.id) {
            errors.push(ValidationError::new(raw, index, ValidationReason::InvalidId));
        } else if let Some(&first_index) = seen.get(raw.id.as_str()) {
            errors.push(ValidationError::new(
                raw,
                index,
                ValidationReason::DuplicateId { first_index },
            ));
        } else {
            seen.insert(raw.id.as_str(), index);
        }

        let kinds = raw.block_kinds();
        if kinds.len() > 1 {
            errors.push(ValidationError::new(
                raw,
                index,
                ValidationReason::MixedBlocks(kinds),
            ));
        }

        if let Some(table) = &raw.comparison_table {
            let expected = table.headers.len();
            for (row, cells) in table.rows.iter().enumerate() {
                if cells.len() != expected {
                    errors.push(ValidationError::new(
                        raw,
                        index,
                        ValidationReason::RowLength {
                            row,
                            expected,
                            found: cells.len(),
                        },
                    ));
                }
            }
        }

        let block = take_block(raw);
        if let Some(block) = &block {
            let headerless = matches!(block, Block::ComparisonTable(t) if t.headers.is_empty());
            if block.is_empty() || headerless {
                errors.push(ValidationError::new(
                    raw,
                    index,
                    ValidationReason::EmptyBlock(block.kind()),
                ));
            }
        }

        let has_summary = raw.summary.as_ref().is_some_and(|s| !s.is_blank());
        if !has_summary && raw.paragraphs.is_empty() && raw.block_kinds().is_empty() {
            errors.push(ValidationError::new(
                raw,
                index,
                ValidationReason::EmptySection,
            ));
        }

        if errors.len() == before {
            valid.push(Section {
                id: raw.id.clone(),
                title: raw.title.clone(),
                summary: raw.summary.clone(),
                paragraphs: raw.paragraphs.clone(),
                block,
            });
        }
    }

    if errors.is_empty() {
        Ok(ValidSections(valid))
    } else {
        Err(errors)
    }
}

/// The single block on a record; only meaningful once mixing is ruled out
fn take_block(raw: &RawSection) -> Option<Block> {
    if let Some(c) = &raw.checklist {
        return Some(Block::Checklist(c.clone()));
    }
    if let Some(p) = &raw.perspectives {
        return Some(Block::Perspectives(p.clone()));
    }
    if let Some(t) = &raw.comparison_table {
        return Some(Block::ComparisonTable(t.clone()));
    }
    if let Some(p) = &raw.plays {
        return Some(Block::Plays(p.clone()));
    }
    if let Some(r) = &raw.references {
        return Some(Block::References(r.clone()));
    }
    raw.faqs.as_ref().map(|f| Block::Faqs(f.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::section::{Card, Checklist, ComparisonTable, Reference};
    use crate::content::Inline;

    fn summary(id: &str) -> RawSection {
        let mut s = RawSection::new(id, "Title");
        s.summary = Some(Inline::text("Lead-in"));
        s
    }

    fn checklist(id: &str) -> RawSection {
        let mut s = RawSection::new(id, "Checklist");
        s.checklist = Some(Checklist {
            title: None,
            items: vec!["One".to_string(), "Two".to_string()],
        });
        s
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawSection {
        let mut s = RawSection::new("compare", "Compare");
        s.comparison_table = Some(ComparisonTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        });
        s
    }

    #[test]
    fn test_valid_document_keeps_order() {
        let sections = vec![summary("executive-summary"), checklist("key-takeaways")];
        let valid = validate(&sections).unwrap();
        let ids: Vec<&str> = valid.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["executive-summary", "key-takeaways"]);
        assert_eq!(valid.as_slice()[1].kind(), SectionKind::Checklist);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let sections = vec![summary("intro"), summary("intro")];
        let errors = validate(&sections).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].section_id, "intro");
        assert_eq!(errors[0].index, 1);
        assert_eq!(
            errors[0].reason,
            ValidationReason::DuplicateId { first_index: 0 }
        );
        assert!(errors[0].to_string().contains("'intro'"));
    }

    #[test]
    fn test_mixed_blocks_rejected_not_merged() {
        let mut mixed = checklist("mixed");
        mixed.references = Some(vec![Reference {
            label: "Docs".to_string(),
            href: "/docs".to_string(),
        }]);
        let errors = validate(&[mixed]).unwrap_err();
        assert_eq!(
            errors[0].reason,
            ValidationReason::MixedBlocks(vec![SectionKind::Checklist, SectionKind::References])
        );
    }

    #[test]
    fn test_table_row_length_mismatch() {
        let bad = table(&["Plan", "Price"], &[&["Basic", "$10"], &["Pro"], &["Team", "$50", "x"]]);
        let errors = validate(&[bad]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].reason,
            ValidationReason::RowLength {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            errors[1].reason,
            ValidationReason::RowLength {
                row: 2,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_well_formed_table_passes_untouched() {
        let ok = table(&["Plan", "Price"], &[&["Basic", "$10"], &["Pro", "$20"]]);
        let valid = validate(&[ok]).unwrap();
        match &valid.as_slice()[0].block {
            Some(Block::ComparisonTable(t)) => {
                assert!(t.rows.iter().all(|r| r.len() == t.headers.len()))
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let mut empty = RawSection::new("empty", "Nothing here");
        empty.summary = Some(Inline::text("  "));
        let sections = vec![
            summary("bad id!"),
            empty,
            summary("ok"),
            summary("ok"),
            table(&["a", "b"], &[&["1"]]),
        ];
        let errors = validate(&sections).unwrap_err();
        let reasons: Vec<_> = errors.iter().map(|e| e.reason.clone()).collect();
        assert_eq!(reasons.len(), 4);
        assert_eq!(reasons[0], ValidationReason::InvalidId);
        assert_eq!(reasons[1], ValidationReason::EmptySection);
        assert_eq!(reasons[2], ValidationReason::DuplicateId { first_index: 2 });
        assert!(matches!(reasons[3], ValidationReason::RowLength { .. }));
    }

    #[test]
    fn test_empty_block_rejected() {
        let mut s = RawSection::new("faq", "FAQ");
        s.faqs = Some(Vec::<Card>::new());
        let errors = validate(&[s]).unwrap_err();
        assert_eq!(errors[0].reason, ValidationReason::EmptyBlock(SectionKind::Faqs));
    }

    #[test]
    fn test_headerless_table_with_rows_rejected() {
        let errors = validate(&[table(&[], &[&["Basic", "$9"]])]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.reason == ValidationReason::EmptyBlock(SectionKind::ComparisonTable)));
        assert!(errors.iter().any(|e| e.reason
            == ValidationReason::RowLength {
                row: 0,
                expected: 0,
                found: 2,
            }));
    }

    #[test]
    fn test_headerless_table_without_rows_rejected() {
        let errors = validate(&[table(&[], &[])]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].reason,
            ValidationReason::EmptyBlock(SectionKind::ComparisonTable)
        );
    }

    #[test]
    fn test_anchor_id() {
        assert!(is_anchor_id("example-post_2"));
        assert!(!is_anchor_id("../escaped"));
        assert!(!is_anchor_id("blog/post"));
        assert!(!is_anchor_id(""));
    }

    #[test]
    fn test_unknown_key_reported() {
        let mut s = summary("promo");
        s.unknown
            .insert("callout".to_string(), serde_json::json!({"text": "hi"}));
        let errors = validate(&[s]).unwrap_err();
        assert!(errors[0].is_unknown_variant());
        assert!(errors[0].to_string().contains("callout"));
    }

    #[test]
    fn test_pure_narrative_is_valid() {
        let mut s = RawSection::new("story", "Story");
        s.paragraphs = vec![Inline::text("Once."), Inline::text("Twice.")];
        let valid = validate(&[s]).unwrap();
        assert_eq!(valid.as_slice()[0].kind(), SectionKind::Narrative);
    }
}
