//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// Publisher / provider name used in structured data
    pub organization: String,
    pub twitter_site: Option<String>,

    // URL
    /// Base domain, optionally with a base path (`https://example.com/docs`)
    pub url: String,
    pub permalink: String,
    #[serde(default)]
    pub pretty_urls: PrettyUrlsConfig,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub default_author: Option<String>,
    pub render_drafts: bool,

    // Breadcrumbs
    pub home_label: String,
    /// Display names for path segments, e.g. `blog: Blog`
    #[serde(default)]
    pub breadcrumb_labels: IndexMap<String, String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Pagewright".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            organization: String::new(),
            twitter_site: None,

            url: "http://example.com".to_string(),
            permalink: ":category/:slug".to_string(),
            pretty_urls: PrettyUrlsConfig::default(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            default_author: None,
            render_drafts: false,

            home_label: "Home".to_string(),
            breadcrumb_labels: IndexMap::new(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Name shown for `organization`, falling back to the site title
    pub fn organization_name(&self) -> &str {
        if self.organization.trim().is_empty() {
            &self.title
        } else {
            &self.organization
        }
    }
}

/// Pretty URL configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyUrlsConfig {
    /// Keep a trailing slash on canonical URLs
    pub trailing_slash: bool,
}
