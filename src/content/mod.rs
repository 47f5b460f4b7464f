//! Content module - documents, sections, and validation

mod document;
mod inline;
pub mod loader;
mod meta;
mod section;
mod validate;

pub use document::{Document, FaqEntry};
pub use inline::{is_external_href, Emphasis, Inline, Link};
pub use meta::{parse_date_string, Meta, PageKind};
pub use section::{
    Block, Card, Checklist, ComparisonTable, Play, RawSection, Reference, Section, SectionKind,
    KNOWN_KEYS,
};
pub use validate::{validate, ValidSections, ValidationError, ValidationReason};
