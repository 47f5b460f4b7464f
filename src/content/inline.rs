//! Inline markup carried by paragraphs, summaries and card bodies

use serde::{Deserialize, Serialize};

/// A small inline AST.
///
/// Authored as:
/// - a plain string, for text
/// - an array, for a fragment of mixed nodes
/// - `{ href, label?, children? }`, for a link
/// - `{ em: <inline> }`, for emphasis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inline {
    Text(String),
    Fragment(Vec<Inline>),
    Link(Link),
    Emphasis(Emphasis),
}

/// Hyperlink node. `children` win over `label`, `label` wins over the bare href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    pub em: Box<Inline>,
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    pub fn link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Inline::Link(Link {
            href: href.into(),
            label: Some(label.into()),
            children: Vec::new(),
        })
    }

    pub fn emphasis(inner: Inline) -> Self {
        Inline::Emphasis(Emphasis { em: Box::new(inner) })
    }

    /// Flatten to plain text, dropping link targets
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(s) => out.push_str(s),
            Inline::Fragment(nodes) => {
                for node in nodes {
                    node.push_plain_text(out);
                }
            }
            Inline::Link(link) => {
                if !link.children.is_empty() {
                    for child in &link.children {
                        child.push_plain_text(out);
                    }
                } else {
                    out.push_str(link.display_label());
                }
            }
            Inline::Emphasis(e) => e.em.push_plain_text(out),
        }
    }

    /// True when the node flattens to whitespace only
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

impl Link {
    /// Label used when the link has no children
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.href)
    }

    pub fn is_external(&self) -> bool {
        is_external_href(&self.href)
    }
}

/// True for hrefs with a scheme or a protocol-relative prefix
pub fn is_external_href(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

impl From<&str> for Inline {
    fn from(s: &str) -> Self {
        Inline::Text(s.to_string())
    }
}

impl From<String> for Inline {
    fn from(s: String) -> Self {
        Inline::Text(s)
    }
}
