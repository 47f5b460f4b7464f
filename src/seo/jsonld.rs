//! schema.org JSON-LD nodes
//!
//! Builders only assemble. Empty text fields are left out of the node and
//! deciding whether that matters is someone else's job.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::breadcrumbs::Breadcrumb;
use crate::content::FaqEntry;

const CONTEXT: &str = "https://schema.org";

/// One structured-data object, keys in insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaNode(Map<String, Value>);

impl SchemaNode {
    fn new(schema_type: &str) -> Self {
        let mut map = Map::new();
        map.insert("@context".to_string(), Value::from(CONTEXT));
        map.insert("@type".to_string(), Value::from(schema_type));
        Self(map)
    }

    /// The node's `@type`
    pub fn schema_type(&self) -> &str {
        self.0.get("@type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a text field unless it is blank
    fn text(mut self, key: &str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn opt_text(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(key, v),
            None => self,
        }
    }

    fn value(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Input for a `WebPage` node
#[derive(Debug, Clone, Default)]
pub struct WebPageInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub language: Option<&'a str>,
}

pub fn webpage_json_ld(input: &WebPageInput<'_>) -> SchemaNode {
    SchemaNode::new("WebPage")
        .text("name", input.title)
        .text("description", input.description)
        .text("url", input.url)
        .opt_text("inLanguage", input.language)
}

/// Input for a `Service` node
#[derive(Debug, Clone, Default)]
pub struct ServiceInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub provider: Option<&'a str>,
    pub service_type: Option<&'a str>,
}

pub fn service_json_ld(input: &ServiceInput<'_>) -> SchemaNode {
    let mut node = SchemaNode::new("Service")
        .text("name", input.name)
        .text("description", input.description)
        .text("url", input.url)
        .opt_text("serviceType", input.service_type);
    if let Some(provider) = input.provider.filter(|p| !p.trim().is_empty()) {
        node = node.value(
            "provider",
            json!({ "@type": "Organization", "name": provider.trim() }),
        );
    }
    node
}

/// Input for an `Article` node
#[derive(Debug, Clone, Default)]
pub struct ArticleInput<'a> {
    pub headline: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub date_published: &'a str,
    pub date_modified: &'a str,
    pub author: Option<&'a str>,
    pub publisher: Option<&'a str>,
    pub image: Option<&'a str>,
    pub keywords: &'a [String],
    pub section: Option<&'a str>,
}

pub fn article_json_ld(input: &ArticleInput<'_>) -> SchemaNode {
    let mut node = SchemaNode::new("Article")
        .text("headline", input.headline)
        .text("description", input.description)
        .text("url", input.url)
        .text("datePublished", input.date_published)
        .text("dateModified", input.date_modified)
        .opt_text("image", input.image)
        .opt_text("articleSection", input.section);
    if let Some(author) = input.author.filter(|a| !a.trim().is_empty()) {
        node = node.value("author", json!({ "@type": "Person", "name": author.trim() }));
    }
    if let Some(publisher) = input.publisher.filter(|p| !p.trim().is_empty()) {
        node = node.value(
            "publisher",
            json!({ "@type": "Organization", "name": publisher.trim() }),
        );
    }
    let keywords: Vec<&str> = input
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        node = node.value("keywords", Value::from(keywords.join(", ")));
    }
    node
}

/// `FAQPage` for the given entries, or `None` when there are none.
///
/// An empty `mainEntity` is invalid structured data, so it is never emitted.
pub fn faq_json_ld(faqs: &[FaqEntry]) -> Option<SchemaNode> {
    let questions: Vec<Value> = faqs
        .iter()
        .filter(|f| !f.question.trim().is_empty())
        .map(|f| {
            let mut question = Map::new();
            question.insert("@type".to_string(), Value::from("Question"));
            question.insert("name".to_string(), Value::from(f.question.trim()));
            question.insert("answerCount".to_string(), Value::from(1));
            let mut answer = Map::new();
            answer.insert("@type".to_string(), Value::from("Answer"));
            if !f.answer.trim().is_empty() {
                answer.insert("text".to_string(), Value::from(f.answer.trim()));
            }
            question.insert("acceptedAnswer".to_string(), Value::Object(answer));
            Value::Object(question)
        })
        .collect();

    if questions.is_empty() {
        return None;
    }

    Some(SchemaNode::new("FAQPage").value("mainEntity", Value::Array(questions)))
}

/// `BreadcrumbList` mirroring the visible trail
pub fn breadcrumb_json_ld(crumbs: &[Breadcrumb]) -> Option<SchemaNode> {
    if crumbs.is_empty() {
        return None;
    }
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": crumb.url,
            })
        })
        .collect();
    Some(SchemaNode::new("BreadcrumbList").value("itemListElement", Value::Array(items)))
}
