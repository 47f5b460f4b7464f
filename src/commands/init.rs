//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Pagewright configuration

# Site
title: Pagewright
description: ''
author: John Doe
language: en
organization: ''
# twitter_site: '@example'

# URL
## Base domain, optionally with a base path
url: http://example.com
permalink: :category/:slug
pretty_urls:
  trailing_slash: false

# Directory
content_dir: content
public_dir: public

# Writing
render_drafts: false
# default_author: John Doe

# Breadcrumbs
home_label: Home
breadcrumb_labels:
  blog: Blog
  checklists: Checklists
  services: Services
"#;

const SAMPLE: &str = r#"meta:
  title: Hello World
  metaDescription: Your first pagewright document.
  slug: hello-world
  date: {date}
  category: blog
  tags: [getting-started]
  readingTime: 2 min read

sections:
  - id: executive-summary
    title: Executive summary
    summary: Documents are metadata plus an ordered list of typed sections.

  - id: how-it-works
    title: How it works
    paragraphs:
      - Each section carries exactly one block, or none for plain prose.
      - - "Run "
        - em: pagewright check
        - " to validate every document."

  - id: next-steps
    title: Next steps
    checklist:
      items:
        - Edit _config.yml
        - Write a document under content/
        - Run pagewright generate

  - id: faq
    title: FAQ
    faqs:
      - title: Where does output go?
        body: Into public/, one directory per page.

  - id: further-reading
    title: Further reading
    references:
      - label: schema.org FAQPage
        href: https://schema.org/FAQPage
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::write(&config_path, CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(
        target_dir.join("content/blog/hello-world.yml"),
        SAMPLE.replace("{date}", &today),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffold_is_valid() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.breadcrumb_labels["blog"], "Blog");

        let docs = ContentLoader::new(&site.content_dir).load_all().unwrap();
        assert_eq!(docs.len(), 1);
        let sections = docs[0].document.validate().unwrap();
        assert_eq!(sections.len(), 5);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
