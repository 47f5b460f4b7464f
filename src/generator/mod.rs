//! Generator module - writes the static site from loaded documents

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::content::loader::LoadedDocument;
use crate::content::ValidSections;
use crate::error::{ContentError, DocumentErrors};
use crate::render::{html_escape, join_blocks, strip_html, RenderedBlock, Renderer};
use crate::seo::{is_publishable, Breadcrumb, SeoBuilder};
use crate::{render_validated, RenderedDocument, Site};

/// Static site generator
pub struct Generator {
    site: Site,
}

/// What one generation run produced
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: usize,
    pub skipped_drafts: usize,
    pub warnings: usize,
}

/// Entry in `pages.json`
#[derive(Debug, Clone, Serialize)]
struct ListingEntry {
    title: String,
    url: String,
    description: String,
    excerpt: String,
    category: String,
    tags: Vec<String>,
    date: String,
    kind: &'static str,
}

impl Generator {
    pub fn new(site: &Site) -> Self {
        Self { site: site.clone() }
    }

    /// Validate every document, then write pages, sitemap and listing.
    ///
    /// If any document is invalid no file is written.
    pub fn generate(&self, docs: &[LoadedDocument]) -> Result<GenerateReport> {
        let validated = validate_all(docs)?;

        let config = &self.site.config;
        let renderer = Renderer::html();
        let mut report = GenerateReport::default();
        let mut rendered = Vec::new();

        for (loaded, sections) in docs.iter().zip(&validated) {
            let meta = &loaded.document.meta;
            if !is_publishable(meta) && !config.render_drafts {
                tracing::debug!("Skipping draft: {}", meta.slug);
                report.skipped_drafts += 1;
                continue;
            }
            let page = render_validated(config, &loaded.document, sections, &renderer);
            report.warnings += page.seo.warnings.len();
            rendered.push((loaded, page));
        }

        // Resolve every output path before writing anything
        let mut outputs = Vec::with_capacity(rendered.len());
        for (loaded, page) in &rendered {
            outputs.push((loaded, page, self.output_path(&page.path)?));
        }

        fs::create_dir_all(&self.site.public_dir)?;

        for (loaded, page, output_path) in &outputs {
            let html = page_shell(&self.site, loaded, page);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
            }
            fs::write(&output_path, html)
                .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
            tracing::debug!("Generated page: {:?}", output_path);
            report.pages += 1;
        }

        let public: Vec<_> = rendered
            .iter()
            .filter(|(_, page)| page.seo.publishable)
            .collect();

        self.generate_sitemap(&public)?;
        self.generate_listing(&public)?;

        Ok(report)
    }

    /// `public/<route>/index.html`; routes may not leave the public directory
    fn output_path(&self, route: &str) -> Result<PathBuf> {
        let relative = Path::new(route.trim_start_matches('/'));
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("Route {:?} escapes the public directory", route);
        }
        Ok(self.site.public_dir.join(relative).join("index.html"))
    }

    /// Generate sitemap.xml with publishable pages only
    fn generate_sitemap(&self, pages: &[&(&LoadedDocument, RenderedDocument)]) -> Result<()> {
        let home = SeoBuilder::new(&self.site.config).canonical("/");

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');
        xml.push_str(&format!("  <url><loc>{}</loc></url>\n", escape_xml(home.as_str())));

        for (loaded, page) in pages {
            let lastmod = loaded.document.meta.last_modified().format("%Y-%m-%d");
            xml.push_str(&format!(
                "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
                escape_xml(page.seo.canonical.as_str()),
                lastmod
            ));
        }

        xml.push_str("</urlset>\n");

        let output_path = self.site.public_dir.join("sitemap.xml");
        fs::write(&output_path, xml)?;
        tracing::info!("Generated sitemap.xml ({} urls)", pages.len() + 1);

        Ok(())
    }

    /// Generate pages.json, newest first
    fn generate_listing(&self, pages: &[&(&LoadedDocument, RenderedDocument)]) -> Result<()> {
        let mut entries: Vec<(chrono::NaiveDate, ListingEntry)> = pages
            .iter()
            .map(|(loaded, page)| {
                let meta = &loaded.document.meta;
                (
                    meta.date,
                    ListingEntry {
                        title: meta.title.clone(),
                        url: page.seo.canonical.to_string(),
                        description: meta.meta_description.clone(),
                        excerpt: excerpt(&page.body),
                        category: meta.category.clone(),
                        tags: meta.tags.clone(),
                        date: meta.date.format("%Y-%m-%d").to_string(),
                        kind: meta.kind.as_str(),
                    },
                )
            })
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        let listing: Vec<ListingEntry> = entries.into_iter().map(|(_, e)| e).collect();

        let output_path = self.site.public_dir.join("pages.json");
        fs::write(&output_path, serde_json::to_string_pretty(&listing)?)?;
        tracing::info!("Generated pages.json");

        Ok(())
    }
}

/// Validate all documents, grouping errors by slug.
///
/// An unknown section variant or an invalid slug aborts immediately.
pub fn validate_all(docs: &[LoadedDocument]) -> Result<Vec<ValidSections>, ContentError> {
    let mut invalid: Vec<DocumentErrors> = Vec::new();
    let mut valid = Vec::with_capacity(docs.len());

    for loaded in docs {
        match loaded.document.validate() {
            Ok(sections) => valid.push(sections),
            Err(ContentError::Invalid(mut errors)) => invalid.append(&mut errors),
            Err(other) => return Err(other),
        }
    }

    if invalid.is_empty() {
        Ok(valid)
    } else {
        Err(ContentError::Invalid(invalid))
    }
}

/// Full HTML page around a rendered document
fn page_shell(site: &Site, loaded: &LoadedDocument, page: &RenderedDocument) -> String {
    let meta = &loaded.document.meta;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
        html_escape(&site.config.language)
    ));
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push('\n');
    html.push_str(&format!(
        r#"<meta name="generator" content="pagewright {}">"#,
        env!("CARGO_PKG_VERSION")
    ));
    html.push('\n');
    html.push_str(&page.seo.head.to_html());
    html.push_str("\n</head>\n<body>\n");

    html.push_str(&breadcrumb_nav(&page.seo.breadcrumbs));
    html.push_str("<article class=\"pw-document\">\n<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&meta.title)));
    html.push_str(&format!(
        r#"<p class="pw-meta"><time datetime="{0}">{0}</time>"#,
        meta.date.format("%Y-%m-%d")
    ));
    if let Some(reading_time) = &meta.reading_time {
        html.push_str(&format!(" · {}", html_escape(reading_time)));
    }
    html.push_str("</p>\n");
    if let Some(cover) = &meta.cover {
        html.push_str(&format!(
            r#"<img class="pw-cover" src="{}" alt="{}">"#,
            html_escape(cover),
            html_escape(meta.cover_alt.as_deref().unwrap_or(""))
        ));
        html.push('\n');
    }
    html.push_str("</header>\n");

    html.push_str(&table_of_contents(page));
    html.push_str(&join_blocks(&page.body));
    html.push_str("\n</article>\n</body>\n</html>\n");
    html
}

fn breadcrumb_nav(crumbs: &[Breadcrumb]) -> String {
    let mut html = String::from(r#"<nav class="pw-breadcrumbs" aria-label="Breadcrumb"><ol>"#);
    for (i, crumb) in crumbs.iter().enumerate() {
        if i + 1 == crumbs.len() {
            html.push_str(&format!(
                r#"<li aria-current="page">{}</li>"#,
                html_escape(&crumb.name)
            ));
        } else {
            html.push_str(&format!(
                r#"<li><a href="{}">{}</a></li>"#,
                html_escape(&crumb.url),
                html_escape(&crumb.name)
            ));
        }
    }
    html.push_str("</ol></nav>\n");
    html
}

/// Section order is the table of contents
fn table_of_contents(page: &RenderedDocument) -> String {
    if page.body.len() < 2 {
        return String::new();
    }
    let mut html = String::from(r#"<nav class="pw-toc"><ol>"#);
    for block in &page.body {
        html.push_str(&format!(
            r##"<li class="toc-item"><a href="#{}">{}</a></li>"##,
            html_escape(&block.id),
            html_escape(&block.title)
        ));
    }
    html.push_str("</ol></nav>\n");
    html
}

/// Plain text of the first section without its heading, cut at a word boundary
fn excerpt(body: &[RenderedBlock]) -> String {
    const MAX_CHARS: usize = 160;

    let Some(block) = body.first() else {
        return String::new();
    };
    let text = strip_html(&block.markup);
    let heading = html_escape(&block.title);
    let text = text.strip_prefix(heading.as_str()).unwrap_or(&text);
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut out = String::new();
    for word in words {
        if out.chars().count() + word.chars().count() + 1 > MAX_CHARS {
            out.push('…');
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_stays_in_public() {
        let dir = tempfile::TempDir::new().unwrap();
        let generator = Generator::new(&Site::new(dir.path()).unwrap());
        assert_eq!(
            generator.output_path("/blog/example-post").unwrap(),
            dir.path().join("public/blog/example-post/index.html")
        );
        assert!(generator.output_path("/../../escaped").is_err());
        assert!(generator.output_path("/blog/../x").is_err());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let body = vec![RenderedBlock {
            id: "intro".to_string(),
            title: "Intro".to_string(),
            kind: crate::content::SectionKind::Summary,
            markup: r#"<section id="intro"><h2>Intro</h2><p class="pw-lead">Short   and <em>sweet</em>.</p></section>"#
                .to_string(),
        }];
        assert_eq!(excerpt(&body), "Short and sweet.");
        assert_eq!(excerpt(&[]), "");
    }

    #[test]
    fn test_breadcrumb_nav_marks_current() {
        let crumbs = vec![
            Breadcrumb {
                name: "Home".to_string(),
                url: "https://example.com/".to_string(),
            },
            Breadcrumb {
                name: "Post".to_string(),
                url: "https://example.com/post".to_string(),
            },
        ];
        let html = breadcrumb_nav(&crumbs);
        assert!(html.contains(r#"<li><a href="https://example.com/">Home</a></li>"#));
        assert!(html.contains(r#"<li aria-current="page">Post</li>"#));
    }
}
