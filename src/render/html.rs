//! HTML back end

use super::backend::{Backend, CardStyle};
use crate::content::{is_external_href, SectionKind};

/// Emits semantic HTML fragments with `pw-*` class hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

impl Backend for HtmlBackend {
    fn text(&self, text: &str) -> String {
        html_escape(text)
    }

    fn link(&self, href: &str, inner: &str, external: bool) -> String {
        if external {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                html_escape(href),
                inner
            )
        } else {
            format!(r#"<a href="{}">{}</a>"#, html_escape(href), inner)
        }
    }

    fn emphasis(&self, inner: &str) -> String {
        format!("<em>{}</em>", inner)
    }

    fn heading(&self, id: &str, title: &str) -> String {
        format!(
            r##"<h2 class="pw-heading"><a class="pw-anchor" href="#{}">{}</a></h2>"##,
            html_escape(id),
            html_escape(title)
        )
    }

    fn lead(&self, inner: &str) -> String {
        format!(r#"<p class="pw-summary">{}</p>"#, inner)
    }

    fn paragraph(&self, inner: &str) -> String {
        format!("<p>{}</p>", inner)
    }

    fn checklist(&self, title: Option<&str>, items: &[String]) -> String {
        let mut html = String::from(r#"<div class="pw-checklist">"#);
        if let Some(title) = title {
            html.push_str(&format!("<h3>{}</h3>", html_escape(title)));
        }
        html.push_str("<ul>");
        for item in items {
            html.push_str(&format!(
                r#"<li><span class="pw-check" aria-hidden="true">&#10003;</span> {}</li>"#,
                html_escape(item)
            ));
        }
        html.push_str("</ul></div>");
        html
    }

    fn cards(&self, style: CardStyle, cards: &[(String, String)]) -> String {
        let class = style.class();
        let mut html = format!(r#"<div class="pw-{}">"#, class);
        for (i, (title, body)) in cards.iter().enumerate() {
            match style {
                CardStyle::Accordion | CardStyle::Faq => html.push_str(&format!(
                    r#"<details class="pw-{}-item"><summary>{}</summary><div>{}</div></details>"#,
                    class,
                    html_escape(title),
                    body
                )),
                CardStyle::Play => html.push_str(&format!(
                    r#"<article class="pw-play"><span class="pw-play-number">{}</span><h3>{}</h3><p>{}</p></article>"#,
                    i + 1,
                    html_escape(title),
                    body
                )),
            }
        }
        html.push_str("</div>");
        html
    }

    fn table(&self, headers: &[String], rows: &[Vec<String>]) -> String {
        let mut html = String::from(r#"<div class="pw-table"><table><thead><tr>"#);
        for header in headers {
            html.push_str(&format!(r#"<th scope="col">{}</th>"#, html_escape(header)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            // Cells bind to headers by position
            for idx in 0..headers.len() {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                html.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
        html
    }

    fn link_list(&self, links: &[(String, String)]) -> String {
        let mut html = String::from(r#"<ul class="pw-references">"#);
        for (label, href) in links {
            let external = is_external_href(href);
            html.push_str(&format!(
                "<li>{}</li>",
                self.link(href, &html_escape(label), external)
            ));
        }
        html.push_str("</ul>");
        html
    }

    fn section(&self, id: &str, kind: SectionKind, inner: &str) -> String {
        format!(
            r#"<section id="{}" class="pw-section pw-{}">{}</section>"#,
            html_escape(id),
            kind.as_str(),
            inner
        )
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_external_link_opens_new_tab() {
        let html = HtmlBackend.link("https://example.org", "Example", true);
        assert!(html.contains(r#"target="_blank""#));
        let html = HtmlBackend.link("/about", "About", false);
        assert_eq!(html, r#"<a href="/about">About</a>"#);
    }

    #[test]
    fn test_table_cells_follow_header_positions() {
        let headers = vec!["Plan".to_string(), "Price".to_string(), "Seats".to_string()];
        let rows = vec![vec![
            "Enterprise tier with SSO".to_string(),
            "$1".to_string(),
            "∞".to_string(),
        ]];
        let html = HtmlBackend.table(&headers, &rows);
        assert_eq!(html.matches("<th ").count(), 3);
        assert_eq!(html.matches("<td>").count(), 3);
        let plan = html.find("Enterprise").unwrap();
        let price = html.find("$1").unwrap();
        assert!(plan < price);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }
}
