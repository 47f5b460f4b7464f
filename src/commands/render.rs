//! Render a single document to stdout

use anyhow::Result;
use std::path::Path;

use crate::content::loader::load_document;
use crate::render::{join_blocks, Renderer};
use crate::{render_document, render_document_with, Site};

/// Output flavour for `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Html,
    Text,
}

/// Render one document file and return the body
pub fn render_file(site: &Site, path: &Path, format: Format) -> Result<String> {
    let document = load_document(path)?;
    let rendered = match format {
        Format::Html => render_document(&site.config, &document)?,
        Format::Text => render_document_with(&site.config, &document, &Renderer::text())?,
    };

    for warning in &rendered.seo.warnings {
        tracing::debug!("{}: {}", document.meta.slug, warning);
    }

    let body = join_blocks(&rendered.body);
    Ok(match format {
        Format::Html => body,
        Format::Text => format!(
            "{}\n{}\n\n{}",
            document.meta.title, rendered.seo.canonical, body
        ),
    })
}

pub fn run(site: &Site, path: &Path, format: Format) -> Result<()> {
    println!("{}", render_file(site, path, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"
meta:
  title: Audit checklist
  slug: audit-checklist
  date: 2024-05-02
  category: checklists
sections:
  - id: steps
    title: Steps
    checklist:
      items: [Crawl, Fix]
"#;

    #[test]
    fn test_render_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.yml");
        fs::write(&path, DOC).unwrap();
        let site = Site::new(dir.path()).unwrap();

        let out = render_file(&site, &path, Format::Text).unwrap();
        assert!(out.starts_with("Audit checklist\nhttp://example.com/checklists/audit-checklist\n"));
        assert!(out.contains("[x] Crawl"));

        let html = render_file(&site, &path, Format::Html).unwrap();
        assert!(html.starts_with(r#"<section id="steps""#));
    }
}
