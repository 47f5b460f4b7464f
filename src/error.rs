//! Content errors

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::ValidationError;

/// Validation failures for one document
#[derive(Debug, Clone)]
pub struct DocumentErrors {
    pub slug: String,
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for DocumentErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} error(s))", self.slug, self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

/// Errors that stop a document, or the whole build, from rendering
#[derive(Error, Debug)]
pub enum ContentError {
    /// Section schema violations; fixable by editing content
    #[error("{} invalid document(s):\n{}", .0.len(), display_all(.0))]
    Invalid(Vec<DocumentErrors>),

    /// The section vocabulary and the renderer disagree
    #[error("document '{slug}', section '{section_id}': unknown section variant '{key}'")]
    UnknownVariant {
        slug: String,
        section_id: String,
        key: String,
    },

    /// The slug is the last URL segment and the output directory name
    #[error("slug '{slug}' must be a single URL segment of letters, digits, '-' or '_'")]
    InvalidSlug { slug: String },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("slug '{slug}' is used by both {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_all(docs: &[DocumentErrors]) -> String {
    docs.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl ContentError {
    /// Total validation errors carried, zero for other kinds
    pub fn validation_count(&self) -> usize {
        match self {
            ContentError::Invalid(docs) => docs.iter().map(|d| d.errors.len()).sum(),
            _ => 0,
        }
    }
}
