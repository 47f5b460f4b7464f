use std::fs;
use std::path::Path;

use pagewright::{ContentError, Site};
use tempfile::TempDir;

const CONFIG: &str = r#"
title: Acme Growth
url: https://acme.example
organization: Acme Inc.
breadcrumb_labels:
  blog: Blog
  services: Services
"#;

const ARTICLE: &str = r#"
meta:
  title: Example Post
  metaDescription: All about examples.
  slug: example-post
  date: 2024-01-15
  updated: 2024-02-01
  category: blog
  tags: [seo]
sections:
  - id: executive-summary
    title: Executive summary
    summary: The short version.
  - id: compare
    title: Compare
    comparisonTable:
      headers: [Plan, Price]
      rows:
        - [Basic, "$9"]
        - [Pro, "$29"]
  - id: faq
    title: FAQ
    faqs:
      - title: Is it free?
        body: The basic plan is.
"#;

const SERVICE: &str = r#"
meta:
  title: SEO audits
  metaDescription: We audit your site.
  slug: seo-audits
  date: 2024-03-10
  category: services
  kind: service
sections:
  - id: plays
    title: How we work
    plays:
      - title: Crawl
        detail: We crawl everything.
"#;

const DRAFT: &str = r#"
meta:
  title: Coming soon
  slug: coming-soon
  date: 2024-04-01
  category: blog
  draft: true
sections:
  - id: intro
    title: Intro
    summary: Not yet.
"#;

fn site(files: &[(&str, &str)]) -> (TempDir, Site) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("_config.yml"), CONFIG).unwrap();
    let content = dir.path().join("content");
    for (name, body) in files {
        let path = content.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
    let site = Site::new(dir.path()).unwrap();
    (dir, site)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn generates_pages_sitemap_and_listing() {
    let (_dir, site) = site(&[
        ("blog/example-post.yml", ARTICLE),
        ("services/seo-audits.yml", SERVICE),
        ("blog/coming-soon.yml", DRAFT),
    ]);
    site.generate().unwrap();

    let page = read(&site.public_dir.join("blog/example-post/index.html"));
    assert!(page.contains(r#"<link rel="canonical" href="https://acme.example/blog/example-post">"#));
    assert!(page.contains(r#""@type":"FAQPage""#));
    assert!(page.contains(r##"<a href="#compare">Compare</a>"##));
    let first = page.find(r#"<section id="executive-summary""#).unwrap();
    let second = page.find(r#"<section id="compare""#).unwrap();
    let third = page.find(r#"<section id="faq""#).unwrap();
    assert!(first < second && second < third);

    let service = read(&site.public_dir.join("services/seo-audits/index.html"));
    assert!(service.contains(r#""@type":"Service""#));
    assert!(!service.contains("FAQPage"));

    // Drafts are skipped unless render_drafts is set
    assert!(!site.public_dir.join("blog/coming-soon").exists());

    let sitemap = read(&site.public_dir.join("sitemap.xml"));
    assert!(sitemap.contains(
        "<loc>https://acme.example/blog/example-post</loc><lastmod>2024-02-01</lastmod>"
    ));
    assert!(!sitemap.contains("coming-soon"));

    let listing: serde_json::Value =
        serde_json::from_str(&read(&site.public_dir.join("pages.json"))).unwrap();
    let urls: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://acme.example/services/seo-audits",
            "https://acme.example/blog/example-post"
        ]
    );
    assert_eq!(listing[1]["excerpt"], "The short version.");
}

#[test]
fn rendered_drafts_stay_out_of_search() {
    let (dir, _) = site(&[("blog/coming-soon.yml", DRAFT)]);
    fs::write(
        dir.path().join("_config.yml"),
        format!("{}render_drafts: true\n", CONFIG),
    )
    .unwrap();
    let site = Site::new(dir.path()).unwrap();
    site.generate().unwrap();

    let page = read(&site.public_dir.join("blog/coming-soon/index.html"));
    assert!(page.contains(r#"<meta name="robots" content="noindex">"#));
    assert!(!read(&site.public_dir.join("sitemap.xml")).contains("coming-soon"));
    assert_eq!(read(&site.public_dir.join("pages.json")), "[]");
}

#[test]
fn invalid_content_writes_nothing() {
    let broken = r#"
meta:
  title: Broken
  slug: broken
  date: 2024-05-01
sections:
  - id: table
    title: Table
    comparisonTable:
      headers: [A, B]
      rows:
        - [only one]
  - id: table
    title: Again
    summary: Duplicate id.
"#;
    let (_dir, site) = site(&[("blog/example-post.yml", ARTICLE), ("broken.yml", broken)]);

    let err = site.generate().unwrap_err();
    let content_err = err.downcast_ref::<ContentError>().unwrap();
    assert!(matches!(content_err, ContentError::Invalid(docs) if docs.len() == 1));
    assert_eq!(content_err.validation_count(), 2);
    assert!(!site.public_dir.exists());

    assert!(site.check().is_err());
}

#[test]
fn unknown_section_key_halts() {
    let unknown = r#"
meta:
  title: Odd
  slug: odd
  date: 2024-05-01
sections:
  - id: gallery
    title: Gallery
    carousel: [a, b]
"#;
    let (_dir, site) = site(&[("odd.yml", unknown)]);

    let err = site.generate().unwrap_err();
    match err.downcast_ref::<ContentError>() {
        Some(ContentError::UnknownVariant { section_id, key, .. }) => {
            assert_eq!(section_id, "gallery");
            assert_eq!(key, "carousel");
        }
        other => panic!("expected unknown variant, got {:?}", other),
    }
}

#[test]
fn clean_removes_output() {
    let (_dir, site) = site(&[("blog/example-post.yml", ARTICLE)]);
    site.generate().unwrap();
    assert!(site.public_dir.exists());
    site.clean().unwrap();
    assert!(!site.public_dir.exists());
}

#[test]
fn path_like_slug_is_rejected_before_writing() {
    let escaping = r#"
meta:
  title: Escaping
  slug: ../../../escaped
  date: 2024-05-01
sections:
  - id: intro
    title: Intro
    summary: Should never be written.
"#;
    let (dir, site) = site(&[("blog/example-post.yml", ARTICLE), ("escaping.yml", escaping)]);

    let err = site.generate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::InvalidSlug { slug }) if slug == "../../../escaped"
    ));
    assert!(!site.public_dir.exists());
    assert!(!dir.path().join("escaped").exists());
}
