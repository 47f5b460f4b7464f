//! Head-level tags: title, description, canonical link, Open Graph, JSON-LD

use serde::Serialize;

use super::jsonld::SchemaNode;
use crate::render::html_escape;

/// Everything a page shell puts inside `<head>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadTags {
    pub title: String,
    pub meta_description: Option<String>,
    pub canonical: String,
    /// `noindex` for pages that must stay out of search
    pub robots: Option<String>,
    pub open_graph: Vec<(String, String)>,
    pub json_ld: Vec<SchemaNode>,
}

impl HeadTags {
    /// Serialize as HTML, one tag per line
    pub fn to_html(&self) -> String {
        let mut tags = vec![format!("<title>{}</title>", html_escape(&self.title))];

        if let Some(description) = &self.meta_description {
            tags.push(format!(
                r#"<meta name="description" content="{}">"#,
                html_escape(description)
            ));
        }
        tags.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            html_escape(&self.canonical)
        ));
        if let Some(robots) = &self.robots {
            tags.push(format!(
                r#"<meta name="robots" content="{}">"#,
                html_escape(robots)
            ));
        }
        for (property, content) in &self.open_graph {
            let attr = if property.starts_with("twitter:") {
                "name"
            } else {
                "property"
            };
            tags.push(format!(
                r#"<meta {}="{}" content="{}">"#,
                attr,
                html_escape(property),
                html_escape(content)
            ));
        }
        for node in &self.json_ld {
            tags.push(format!(
                r#"<script type="application/ld+json">{}</script>"#,
                script_safe(&node.to_json())
            ));
        }

        tags.join("\n")
    }
}

/// Keep JSON from closing the surrounding script element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Open Graph and Twitter card properties for a page
pub fn open_graph(
    og_type: &str,
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
    twitter_site: Option<&str>,
) -> Vec<(String, String)> {
    let mut tags = vec![
        ("og:type".to_string(), og_type.to_string()),
        ("og:title".to_string(), title.to_string()),
        ("og:url".to_string(), url.to_string()),
    ];

    if !site_name.trim().is_empty() {
        tags.push(("og:site_name".to_string(), site_name.to_string()));
    }
    if !description.trim().is_empty() {
        tags.push(("og:description".to_string(), description.to_string()));
    }
    if let Some(img) = image {
        tags.push(("og:image".to_string(), img.to_string()));
    }

    let card = if image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    tags.push(("twitter:card".to_string(), card.to_string()));
    if let Some(site) = twitter_site {
        tags.push(("twitter:site".to_string(), site.to_string()));
    }

    tags
}
