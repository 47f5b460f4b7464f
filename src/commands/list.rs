//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::loader::{ContentLoader, LoadedDocument};
use crate::seo::is_publishable;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let docs = ContentLoader::new(&site.content_dir).load_all()?;

    match content_type {
        "post" | "posts" => {
            let published: Vec<_> = docs
                .iter()
                .filter(|d| is_publishable(&d.document.meta))
                .collect();
            println!("Documents ({}):", published.len());
            for loaded in published {
                print_document(site, loaded);
            }
        }
        "draft" | "drafts" => {
            let drafts: Vec<_> = docs
                .iter()
                .filter(|d| !is_publishable(&d.document.meta))
                .collect();
            println!("Drafts ({}):", drafts.len());
            for loaded in drafts {
                print_document(site, loaded);
            }
        }
        "tag" | "tags" => {
            let tags = count_by(&docs, |d| d.document.meta.tags.clone());
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_by(&docs, |d| {
                let category = d.document.meta.category.trim();
                if category.is_empty() {
                    Vec::new()
                } else {
                    vec![category.to_string()]
                }
            });
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag, draft",
                content_type
            );
        }
    }

    Ok(())
}

fn print_document(site: &Site, loaded: &LoadedDocument) {
    let meta = &loaded.document.meta;
    println!(
        "  {} - {} [{}] ({}, {} sections)",
        meta.date.format("%Y-%m-%d"),
        meta.title,
        loaded.document.route_path(&site.config),
        meta.kind.as_str(),
        loaded.document.sections.len()
    );
}

/// Count documents per key, most used first. Ties keep first-seen order.
fn count_by<F>(docs: &[LoadedDocument], keys: F) -> IndexMap<String, usize>
where
    F: Fn(&LoadedDocument) -> Vec<String>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for doc in docs {
        for key in keys(doc) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Document, Meta};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn doc(slug: &str, tags: &[&str]) -> LoadedDocument {
        let mut meta = Meta::new(slug, slug, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        meta.tags = tags.iter().map(|t| t.to_string()).collect();
        LoadedDocument {
            path: PathBuf::from(format!("{}.yml", slug)),
            document: Document::new(meta, Vec::new()),
        }
    }

    #[test]
    fn test_count_by_orders_by_usage() {
        let docs = vec![
            doc("a", &["seo"]),
            doc("b", &["content", "seo"]),
            doc("c", &["content", "seo", "ads"]),
        ];
        let counts = count_by(&docs, |d| d.document.meta.tags.clone());
        let ordered: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(ordered, vec![("seo", 3), ("content", 2), ("ads", 1)]);
    }
}
