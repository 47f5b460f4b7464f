//! Create a new draft document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::PageKind;
use crate::Site;

/// Write a draft document skeleton and return its path
pub fn create_document(
    site: &Site,
    title: &str,
    kind: PageKind,
    category: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let category = category.map(slug::slugify).unwrap_or_default();
    let target_dir = if category.is_empty() {
        site.content_dir.clone()
    } else {
        site.content_dir.join(&category)
    };
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.yml", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let content = format!(
        r#"meta:
  title: {title}
  metaDescription: ''
  slug: {slug}
  date: {today}
  category: '{category}'
  kind: {kind}
  tags: []
  draft: true

sections:
  - id: executive-summary
    title: Executive summary
    summary: One or two sentences on what this page covers.
"#,
        title = yaml_quote(title),
        slug = slug,
        today = today,
        category = category,
        kind = kind.as_str(),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Single-quote a scalar so titles with `:` or `#` stay strings
fn yaml_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
