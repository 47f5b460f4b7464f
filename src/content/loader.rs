//! Content loader - reads documents from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::Document;
use crate::error::ContentError;

/// Loads documents from a directory tree
pub struct ContentLoader {
    content_dir: PathBuf,
}

/// A document together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: Document,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every document, sorted by date descending (newest first).
    ///
    /// Fails on the first unparsable file and on duplicate slugs.
    pub fn load_all(&self) -> Result<Vec<LoadedDocument>, ContentError> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        let mut slugs: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_document_file(path) || is_ignored(path) {
                continue;
            }

            let document = load_document(path)?;
            if let Some(first) = slugs.get(&document.meta.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: document.meta.slug.clone(),
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            slugs.insert(document.meta.slug.clone(), path.to_path_buf());
            tracing::debug!("Loaded {:?} ({} sections)", path, document.sections.len());

            docs.push(LoadedDocument {
                path: path.to_path_buf(),
                document,
            });
        }

        docs.sort_by(|a, b| b.document.meta.date.cmp(&a.document.meta.date));
        Ok(docs)
    }
}

/// Parse a single document file, picking the format from its extension
pub fn load_document(path: &Path) -> Result<Document, ContentError> {
    let content = fs::read_to_string(path)?;
    parse_document(&content, is_json(path)).map_err(|message| ContentError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a document from YAML or JSON text
pub fn parse_document(content: &str, json: bool) -> Result<Document, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Check if a file is a content document
fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml" || e == "json")
        .unwrap_or(false)
}

/// Files starting with `_` are partials or scratch files
fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}
