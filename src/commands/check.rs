//! Validate every document without writing output

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::Document;
use crate::generator::validate_all;
use crate::seo::SeoBuilder;
use crate::Site;

/// Load and validate all documents, printing every problem found
pub fn run(site: &Site) -> Result<()> {
    let docs = ContentLoader::new(&site.content_dir).load_all()?;
    tracing::info!("Checking {} document(s)", docs.len());

    let valid = match validate_all(&docs) {
        Ok(valid) => valid,
        Err(err) => {
            let count = err.validation_count();
            eprintln!("{}", err);
            anyhow::bail!("{} validation error(s) found", count.max(1));
        }
    };

    let builder = SeoBuilder::new(&site.config);
    let mut warnings = 0;
    for (loaded, sections) in docs.iter().zip(&valid) {
        let faqs = Document::faq_entries(sections);
        for warning in builder.check(&loaded.document.meta, &faqs) {
            println!("warning: {}: {}", loaded.document.meta.slug, warning);
            warnings += 1;
        }
    }

    println!("{} document(s) valid, {} warning(s)", docs.len(), warnings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(doc: &str) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(site.content_dir.join("doc.yml"), doc).unwrap();
        (dir, site)
    }

    #[test]
    fn test_check_valid() {
        let (_dir, site) = site_with(
            r#"
meta:
  title: Fine
  slug: fine
  date: 2024-03-01
sections:
  - id: intro
    title: Intro
    summary: All good.
"#,
        );
        run(&site).unwrap();
    }

    #[test]
    fn test_check_reports_invalid() {
        let (_dir, site) = site_with(
            r#"
meta:
  title: Broken
  slug: broken
  date: 2024-03-01
sections:
  - id: intro
    title: Intro
    summary: One.
  - id: intro
    title: Again
    summary: Two.
"#,
        );
        let err = run(&site).unwrap_err();
        assert!(err.to_string().contains("1 validation error(s)"));
    }
}
