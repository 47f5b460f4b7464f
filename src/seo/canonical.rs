//! Canonical URL construction

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::fmt;

use crate::config::SiteConfig;

/// Characters escaped in a canonical path. `%` is left alone so an already
/// encoded path passes through unchanged.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// An absolute canonical URL plus its site-relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CanonicalUrl {
    url: String,
    path: String,
}

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Path relative to the site base, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<CanonicalUrl> for String {
    fn from(c: CanonicalUrl) -> Self {
        c.url
    }
}

/// Site base without a trailing slash, e.g. `https://example.com/docs`
pub fn base_url(config: &SiteConfig) -> &str {
    config.url.trim_end_matches('/')
}

/// Build the canonical URL for a root-relative path.
///
/// Idempotent: feeding back either the resulting URL or its `path()`
/// yields the same URL.
///
/// # Examples
/// ```ignore
/// build_canonical(&config, "/blog/my-post/") // -> "https://example.com/blog/my-post"
/// ```
pub fn build_canonical(config: &SiteConfig, path: &str) -> CanonicalUrl {
    let base = base_url(config);
    let path = path.trim();

    let path = site_relative(base, path);
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut normalized = String::from("/");
    normalized.push_str(&segments.join("/"));
    if config.pretty_urls.trailing_slash && !segments.is_empty() {
        normalized.push('/');
    }

    let encoded = utf8_percent_encode(&normalized, PATH_ESCAPE).to_string();

    CanonicalUrl {
        url: format!("{}{}", base, encoded),
        path: encoded,
    }
}

/// Reduce an absolute URL to its path under `base`.
///
/// A URL under the configured base loses the base. Any other absolute URL
/// (another scheme, another host, protocol-relative) keeps only its path,
/// minus the base path when it sits under it. Relative input is returned as is.
fn site_relative<'a>(base: &str, input: &'a str) -> &'a str {
    if let Some(rest) = strip_segment_prefix(input, base) {
        return rest;
    }
    let Some(after_authority) = strip_authority(input) else {
        return input;
    };
    let path = match after_authority.find(['/', '?', '#']) {
        Some(idx) => &after_authority[idx..],
        None => "",
    };
    let base_path = strip_authority(base).unwrap_or(base);
    let base_path = base_path.trim_end_matches('/');
    if base_path.starts_with('/') {
        if let Some(rest) = strip_segment_prefix(path, base_path) {
            return rest;
        }
    }
    path
}

/// `prefix` stripped from `s` only when it ends on a path boundary
fn strip_segment_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
        Some(rest)
    } else {
        None
    }
}

/// Text after `scheme://host[:port]` or `//host`, if the input is absolute
fn strip_authority(input: &str) -> Option<&str> {
    let rest = if let Some(rest) = input.strip_prefix("//") {
        rest
    } else {
        let idx = input.find("://")?;
        let scheme = &input[..idx];
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return None;
        }
        &input[idx + 3..]
    };
    Some(match rest.find(['/', '?', '#']) {
        Some(idx) => &rest[idx..],
        None => "",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_prefixes_base_domain() {
        let config = test_config();
        assert_eq!(
            build_canonical(&config, "/blog/example-post").as_str(),
            "https://example.com/blog/example-post"
        );
        assert_eq!(build_canonical(&config, "/").as_str(), "https://example.com/");
        assert_eq!(build_canonical(&config, "").as_str(), "https://example.com/");
    }

    #[test]
    fn test_normalizes_slashes_query_and_fragment() {
        let config = test_config();
        let c = build_canonical(&config, "blog//example-post/?utm=1#faq");
        assert_eq!(c.as_str(), "https://example.com/blog/example-post");
        assert_eq!(c.path(), "/blog/example-post");
    }

    #[test]
    fn test_idempotent() {
        let config = test_config();
        for path in [
            "/blog/example-post",
            "/blog/example-post/",
            "/",
            "/guides/a b/",
            "/already%20encoded",
            "https://example.com/blog/x",
        ] {
            let once = build_canonical(&config, path);
            assert_eq!(build_canonical(&config, once.path()), once, "path {}", path);
            assert_eq!(build_canonical(&config, once.as_str()), once, "url {}", path);
        }
    }

    #[test]
    fn test_no_double_prefix() {
        let config = test_config();
        let url = build_canonical(&config, "https://example.com/about");
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_foreign_absolute_url_keeps_only_path() {
        let config = test_config();
        for input in [
            "http://example.com/blog/x",
            "https://www.example.com/blog/x?ref=1",
            "//cdn.example.com/blog/x",
        ] {
            assert_eq!(
                build_canonical(&config, input).as_str(),
                "https://example.com/blog/x",
                "input {}",
                input
            );
        }
        assert_eq!(
            build_canonical(&config, "http://example.com").as_str(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_base_path_strip_respects_segments() {
        let config = SiteConfig {
            url: "https://example.com/docs".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(
            build_canonical(&config, "https://example.com/docsify/intro").as_str(),
            "https://example.com/docs/docsify/intro"
        );
        assert_eq!(
            build_canonical(&config, "http://example.com/docs/intro").as_str(),
            "https://example.com/docs/intro"
        );
        assert_eq!(
            build_canonical(&config, "https://example.com/docs?x=1").as_str(),
            "https://example.com/docs/"
        );
    }

    #[test]
    fn test_trailing_slash_mode() {
        let mut config = test_config();
        config.pretty_urls.trailing_slash = true;
        assert_eq!(
            build_canonical(&config, "/blog/post").as_str(),
            "https://example.com/blog/post/"
        );
        assert_eq!(build_canonical(&config, "/").as_str(), "https://example.com/");
    }

    #[test]
    fn test_base_path() {
        let config = SiteConfig {
            url: "https://example.com/docs".to_string(),
            ..SiteConfig::default()
        };
        let c = build_canonical(&config, "/intro");
        assert_eq!(c.as_str(), "https://example.com/docs/intro");
        assert_eq!(build_canonical(&config, c.as_str()), c);
    }

    #[test]
    fn test_encodes_spaces() {
        let config = test_config();
        assert_eq!(
            build_canonical(&config, "/guides/a b").as_str(),
            "https://example.com/guides/a%20b"
        );
    }
}
