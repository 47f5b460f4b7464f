//! SEO metadata and structured data
//!
//! Everything here is a pure function of the site config and the inputs.
//! Nothing is cached, fetched, or randomised.

mod breadcrumbs;
mod canonical;
mod head;
mod jsonld;

pub use breadcrumbs::{build_breadcrumbs, path_segments, segment_label, Breadcrumb};
pub use canonical::{base_url, build_canonical, CanonicalUrl};
pub use head::{open_graph, HeadTags};
pub use jsonld::{
    article_json_ld, breadcrumb_json_ld, faq_json_ld, service_json_ld, webpage_json_ld,
    ArticleInput, SchemaNode, ServiceInput, WebPageInput,
};

use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;

use crate::config::SiteConfig;
use crate::content::{FaqEntry, Meta};

/// Whether a page may appear in listings, sitemaps and search
pub fn is_publishable(meta: &Meta) -> bool {
    !meta.draft
}

/// A recommended field is missing. The build continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataWarning {
    EmptyTitle,
    EmptyDescription,
    CoverWithoutAlt,
    FaqMissingAnswer { question: String },
}

impl fmt::Display for MetadataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataWarning::EmptyTitle => write!(f, "title is empty"),
            MetadataWarning::EmptyDescription => {
                write!(f, "metaDescription is empty; description omitted from head and schema")
            }
            MetadataWarning::CoverWithoutAlt => write!(f, "cover image has no coverAlt text"),
            MetadataWarning::FaqMissingAnswer { question } => {
                write!(f, "FAQ '{}' has no answer text", question)
            }
        }
    }
}

/// Head-level SEO artifacts for one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMetadata {
    pub canonical: CanonicalUrl,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub json_ld: Vec<SchemaNode>,
    pub head: HeadTags,
    pub publishable: bool,
    pub warnings: Vec<MetadataWarning>,
}

/// Builds SEO metadata against one site configuration
#[derive(Debug, Clone, Copy)]
pub struct SeoBuilder<'a> {
    config: &'a SiteConfig,
}

impl<'a> SeoBuilder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn canonical(&self, path: &str) -> CanonicalUrl {
        build_canonical(self.config, path)
    }

    pub fn breadcrumbs(&self, segments: &[&str], current_title: Option<&str>) -> Vec<Breadcrumb> {
        build_breadcrumbs(self.config, segments, current_title)
    }

    /// Absolute URL for an asset reference such as a cover image
    pub fn asset_url(&self, reference: &str) -> String {
        if crate::content::is_external_href(reference) {
            reference.to_string()
        } else {
            format!("{}/{}", base_url(self.config), reference.trim_start_matches('/'))
        }
    }

    /// Collect warnings for recommended-but-missing fields
    pub fn check(&self, meta: &Meta, faqs: &[FaqEntry]) -> Vec<MetadataWarning> {
        let mut warnings = Vec::new();
        if meta.title.trim().is_empty() {
            warnings.push(MetadataWarning::EmptyTitle);
        }
        if meta.meta_description.trim().is_empty() {
            warnings.push(MetadataWarning::EmptyDescription);
        }
        if meta.cover.is_some() && meta.cover_alt.as_deref().map_or(true, |a| a.trim().is_empty())
        {
            warnings.push(MetadataWarning::CoverWithoutAlt);
        }
        for faq in faqs {
            if faq.answer.trim().is_empty() {
                warnings.push(MetadataWarning::FaqMissingAnswer {
                    question: faq.question.clone(),
                });
            }
        }
        warnings
    }

    /// Build canonical URL, breadcrumbs, JSON-LD nodes and head tags
    pub fn build(&self, meta: &Meta, path: &str, faqs: &[FaqEntry]) -> SeoMetadata {
        let config = self.config;
        let canonical = self.canonical(path);
        // Labels read the decoded segment; build_canonical re-encodes the urls
        let segments: Vec<String> = path_segments(canonical.path())
            .into_iter()
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        let breadcrumbs = self.breadcrumbs(&segments, Some(&meta.title));
        let title = meta.head_title();
        let description = meta.meta_description.as_str();
        let image = meta.cover.as_deref().map(|c| self.asset_url(c));

        let warnings = self.check(meta, faqs);
        for warning in &warnings {
            tracing::warn!("{}: {}", meta.slug, warning);
        }

        let mut json_ld = vec![webpage_json_ld(&WebPageInput {
            title,
            description,
            url: canonical.as_str(),
            language: Some(&config.language),
        })];

        if meta.kind.is_service() {
            json_ld.push(service_json_ld(&ServiceInput {
                name: &meta.title,
                description,
                url: canonical.as_str(),
                provider: Some(config.organization_name()),
                service_type: Some(&meta.category),
            }));
        } else {
            let published = meta.date.format("%Y-%m-%d").to_string();
            let modified = meta.last_modified().format("%Y-%m-%d").to_string();
            json_ld.push(article_json_ld(&ArticleInput {
                headline: title,
                description,
                url: canonical.as_str(),
                date_published: &published,
                date_modified: &modified,
                author: meta.author.as_deref().or(config.default_author.as_deref()),
                publisher: Some(config.organization_name()),
                image: image.as_deref(),
                keywords: &meta.tags,
                section: Some(&meta.category),
            }));
        }

        json_ld.extend(breadcrumb_json_ld(&breadcrumbs));
        json_ld.extend(faq_json_ld(faqs));

        let publishable = is_publishable(meta);
        let og_type = if meta.kind.is_service() {
            "website"
        } else {
            "article"
        };
        let head = HeadTags {
            title: title.to_string(),
            meta_description: Some(description.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            canonical: canonical.to_string(),
            robots: (!publishable).then(|| "noindex".to_string()),
            open_graph: open_graph(
                og_type,
                title,
                description,
                canonical.as_str(),
                image.as_deref(),
                &config.title,
                config.twitter_site.as_deref(),
            ),
            json_ld: json_ld.clone(),
        };

        SeoMetadata {
            canonical,
            breadcrumbs,
            json_ld,
            head,
            publishable,
            warnings,
        }
    }
}
