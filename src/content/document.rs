//! A content document: metadata plus an ordered list of sections

use serde::{Deserialize, Serialize};

use super::section::RawSection;
use super::validate::{is_anchor_id, validate, ValidSections};
use super::{Inline, Meta};
use crate::config::SiteConfig;
use crate::error::{ContentError, DocumentErrors};

/// One content page, passed by value from the loader into rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub meta: Meta,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

/// A question/answer pair feeding FAQPage structured data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl Document {
    pub fn new(meta: Meta, sections: Vec<RawSection>) -> Self {
        Self { meta, sections }
    }

    /// Validate the slug and the sections.
    ///
    /// A slug that is not a single URL segment halts with
    /// [`ContentError::InvalidSlug`], as does an unknown section key with
    /// [`ContentError::UnknownVariant`]. Any other violation yields
    /// [`ContentError::Invalid`] with every error in the document.
    pub fn validate(&self) -> Result<ValidSections, ContentError> {
        if !is_anchor_id(&self.meta.slug) {
            return Err(ContentError::InvalidSlug {
                slug: self.meta.slug.clone(),
            });
        }
        validate(&self.sections).map_err(|errors| {
            if let Some(unknown) = errors.iter().find(|e| e.is_unknown_variant()) {
                let key = match &unknown.reason {
                    super::ValidationReason::UnknownVariant(key) => key.clone(),
                    _ => String::new(),
                };
                return ContentError::UnknownVariant {
                    slug: self.meta.slug.clone(),
                    section_id: unknown.section_id.clone(),
                    key,
                };
            }
            ContentError::Invalid(vec![DocumentErrors {
                slug: self.meta.slug.clone(),
                errors,
            }])
        })
    }

    /// Root-relative route built from the configured permalink pattern
    pub fn route_path(&self, config: &SiteConfig) -> String {
        let meta = &self.meta;
        let category = slug::slugify(&meta.category);
        let sub_category = meta
            .sub_category
            .as_deref()
            .map(slug::slugify)
            .unwrap_or_default();

        let expanded = config
            .permalink
            .replace(":sub_category", &sub_category)
            .replace(":category", &category)
            .replace(":slug", &meta.slug)
            .replace(":year", &meta.date.format("%Y").to_string())
            .replace(":month", &meta.date.format("%m").to_string());

        let segments: Vec<&str> = expanded.split('/').filter(|s| !s.is_empty()).collect();
        format!("/{}", segments.join("/"))
    }

    /// FAQ entries from every `faqs` section, in document order
    pub fn faq_entries(sections: &ValidSections) -> Vec<FaqEntry> {
        sections
            .iter()
            .filter_map(|s| s.faqs())
            .flatten()
            .map(|card| FaqEntry {
                question: card.title.clone(),
                answer: Inline::plain_text(&card.body),
            })
            .collect()
    }
}
