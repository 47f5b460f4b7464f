//! pagewright: typed section documents rendered into static content pages
//!
//! A document is page metadata plus an ordered list of sections. Sections are
//! validated into a closed variant model, rendered through a host-agnostic
//! back end, and paired with SEO artifacts (canonical URL, breadcrumbs,
//! JSON-LD, head tags) derived from the metadata.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod render;
pub mod seo;
pub mod server;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub use error::ContentError;

use content::{Document, ValidSections};
use render::{Backend, RenderedBlock, Renderer};
use seo::{SeoBuilder, SeoMetadata};

/// Rendered body plus head-level SEO artifacts for one document
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub path: String,
    pub body: Vec<RenderedBlock>,
    pub seo: SeoMetadata,
}

/// Validate, render and describe one document as HTML.
///
/// Fails closed: if any section is invalid nothing is rendered.
pub fn render_document(
    config: &config::SiteConfig,
    document: &Document,
) -> std::result::Result<RenderedDocument, ContentError> {
    render_document_with(config, document, &Renderer::html())
}

/// Same as [`render_document`] with a caller-chosen back end
pub fn render_document_with<B: Backend>(
    config: &config::SiteConfig,
    document: &Document,
    renderer: &Renderer<B>,
) -> std::result::Result<RenderedDocument, ContentError> {
    let sections = document.validate()?;
    Ok(render_validated(config, document, &sections, renderer))
}

/// Render sections already checked by [`Document::validate`]
pub fn render_validated<B: Backend>(
    config: &config::SiteConfig,
    document: &Document,
    sections: &ValidSections,
    renderer: &Renderer<B>,
) -> RenderedDocument {
    let body = renderer.render_all(sections);

    let path = document.route_path(config);
    let faqs = Document::faq_entries(sections);
    let seo = SeoBuilder::new(config).build(&document.meta, &path, &faqs);

    RenderedDocument { path, body, seo }
}

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content (documents) directory
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Open a site, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already-loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Validate every document without writing output
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
