//! Per-page metadata

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// What sort of page a document is. Decides which schema node describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Article,
    Checklist,
    Landing,
    Service,
}

impl PageKind {
    /// Service and landing pages describe an offering, not an article
    pub fn is_service(&self) -> bool {
        matches!(self, PageKind::Service | PageKind::Landing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Article => "article",
            PageKind::Checklist => "checklist",
            PageKind::Landing => "landing",
            PageKind::Service => "service",
        }
    }
}

impl std::str::FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(PageKind::Article),
            "checklist" => Ok(PageKind::Checklist),
            "landing" => Ok(PageKind::Landing),
            "service" => Ok(PageKind::Service),
            other => Err(format!(
                "unknown page kind '{}' (expected article, checklist, landing or service)",
                other
            )),
        }
    }
}

/// Page metadata as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub title: String,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub meta_description: String,
    pub slug: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub updated: Option<NaiveDate>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    /// Asset reference; the asset itself belongs to the bundler
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub cover_alt: Option<String>,
    #[serde(default)]
    pub reading_time: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub kind: PageKind,
}

impl Meta {
    /// Minimal metadata for a page; everything optional left empty
    pub fn new(title: impl Into<String>, slug: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            seo_title: None,
            meta_description: String::new(),
            slug: slug.into(),
            date,
            updated: None,
            category: String::new(),
            sub_category: None,
            tags: Vec::new(),
            draft: false,
            cover: None,
            cover_alt: None,
            reading_time: None,
            author: None,
            kind: PageKind::Article,
        }
    }

    /// Title used in `<title>` and schema names
    pub fn head_title(&self) -> &str {
        self.seo_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.title)
    }

    /// Date of the last content change
    pub fn last_modified(&self) -> NaiveDate {
        self.updated.unwrap_or(self.date)
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_string(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{}'", raw)))
}

fn deserialize_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date_string(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{}'", raw))),
    }
}

/// Parse a date in the formats authors commonly use. Times are dropped.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
