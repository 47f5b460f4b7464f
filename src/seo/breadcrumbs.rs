//! Breadcrumb trails

use serde::Serialize;

use super::canonical::build_canonical;
use crate::config::SiteConfig;

/// One step in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

/// Split a root-relative path into its non-empty segments
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build `Home` followed by one crumb per segment.
///
/// The result always has `segments.len() + 1` entries. The last crumb takes
/// `current_title` when given; other names come from `breadcrumb_labels` or
/// a title-cased segment.
pub fn build_breadcrumbs(
    config: &SiteConfig,
    segments: &[&str],
    current_title: Option<&str>,
) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    crumbs.push(Breadcrumb {
        name: config.home_label.clone(),
        url: build_canonical(config, "/").to_string(),
    });

    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        path.push('/');
        path.push_str(segment);

        let is_last = i + 1 == segments.len();
        let name = match current_title.filter(|t| is_last && !t.trim().is_empty()) {
            Some(title) => title.to_string(),
            None => segment_label(config, segment),
        };

        crumbs.push(Breadcrumb {
            name,
            url: build_canonical(config, &path).to_string(),
        });
    }

    crumbs
}

/// Display name for a path segment
pub fn segment_label(config: &SiteConfig, segment: &str) -> String {
    if let Some(label) = config.breadcrumb_labels.get(segment) {
        return label.clone();
    }
    title_case(segment)
}

/// `content-marketing_tips` -> `Content Marketing Tips`
fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        };
        config
            .breadcrumb_labels
            .insert("seo".to_string(), "SEO".to_string());
        config
    }

    #[test]
    fn test_length_invariant() {
        let config = test_config();
        for segments in [
            vec![],
            vec!["blog"],
            vec!["blog", "example-post"],
            vec!["guides", "seo", "audit", "step-one"],
        ] {
            let crumbs = build_breadcrumbs(&config, &segments, Some("Title"));
            assert_eq!(crumbs.len(), segments.len() + 1);
            assert_eq!(crumbs[0].name, "Home");
            assert_eq!(crumbs[0].url, "https://example.com/");
        }
    }

    #[test]
    fn test_example_post_trail() {
        let config = test_config();
        let crumbs = build_breadcrumbs(
            &config,
            &path_segments("/blog/example-post"),
            Some("Example Post"),
        );
        assert_eq!(
            crumbs,
            vec![
                Breadcrumb {
                    name: "Home".to_string(),
                    url: "https://example.com/".to_string()
                },
                Breadcrumb {
                    name: "Blog".to_string(),
                    url: "https://example.com/blog".to_string()
                },
                Breadcrumb {
                    name: "Example Post".to_string(),
                    url: "https://example.com/blog/example-post".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_labels_and_fallback_names() {
        let config = test_config();
        let crumbs = build_breadcrumbs(&config, &["seo", "link_building-basics"], None);
        assert_eq!(crumbs[1].name, "SEO");
        assert_eq!(crumbs[2].name, "Link Building Basics");
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(path_segments("/blog//post/?q=1"), vec!["blog", "post"]);
        assert!(path_segments("/").is_empty());
    }
}
