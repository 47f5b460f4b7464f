//! Plain-text back end for terminals and previews

use super::backend::{Backend, CardStyle};
use crate::content::SectionKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextBackend;

impl Backend for TextBackend {
    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn link(&self, href: &str, inner: &str, _external: bool) -> String {
        if inner == href {
            format!("<{}>", href)
        } else {
            format!("{} <{}>", inner, href)
        }
    }

    fn emphasis(&self, inner: &str) -> String {
        format!("*{}*", inner)
    }

    fn heading(&self, id: &str, title: &str) -> String {
        let underline = "=".repeat(title.chars().count().max(1));
        format!("{}  [#{}]\n{}\n", title, id, underline)
    }

    fn lead(&self, inner: &str) -> String {
        format!("{}\n", inner)
    }

    fn paragraph(&self, inner: &str) -> String {
        format!("{}\n", inner)
    }

    fn checklist(&self, title: Option<&str>, items: &[String]) -> String {
        let mut out = String::new();
        if let Some(title) = title {
            out.push_str(title);
            out.push('\n');
        }
        for item in items {
            out.push_str(&format!("  [x] {}\n", item));
        }
        out
    }

    fn cards(&self, style: CardStyle, cards: &[(String, String)]) -> String {
        let mut out = String::new();
        for (i, (title, body)) in cards.iter().enumerate() {
            let marker = match style {
                CardStyle::Accordion => "> ".to_string(),
                CardStyle::Faq => "Q: ".to_string(),
                CardStyle::Play => format!("{}. ", i + 1),
            };
            out.push_str(&format!("{}{}\n", marker, title));
            let indent = if style == CardStyle::Faq { "A: " } else { "   " };
            out.push_str(&format!("{}{}\n", indent, body));
        }
        out
    }

    fn table(&self, headers: &[String], rows: &[Vec<String>]) -> String {
        let columns = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (idx, width) in widths.iter_mut().enumerate() {
                *width = (*width).max(cell(row, idx).chars().count());
            }
        }

        let format_row = |values: Vec<&str>| -> String {
            let padded: Vec<String> = values
                .iter()
                .zip(&widths)
                .map(|(v, w)| pad(v, *w))
                .collect();
            format!("| {} |\n", padded.join(" | "))
        };

        let mut out = format_row(headers.iter().map(String::as_str).collect());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format!("|-{}-|\n", rule.join("-|-")));
        for row in rows {
            out.push_str(&format_row((0..columns).map(|idx| cell(row, idx)).collect()));
        }
        out
    }

    fn link_list(&self, links: &[(String, String)]) -> String {
        links
            .iter()
            .map(|(label, href)| format!("  - {} <{}>\n", label, href))
            .collect()
    }

    fn section(&self, _id: &str, _kind: SectionKind, inner: &str) -> String {
        format!("{}\n", inner.trim_end())
    }
}

/// Cell at a header position; short rows read as empty
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Right-pad to a display width counted in chars
fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_columns_align() {
        let headers = vec!["Plan".to_string(), "Price".to_string()];
        let rows = vec![
            vec!["Basic".to_string(), "$9".to_string()],
            vec!["Enterprise plus".to_string(), "Contact sales".to_string()],
        ];
        let out = TextBackend.table(&headers, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", lines);
        let sep = lines[0].find(" | ").unwrap();
        assert_eq!(lines[2].find(" | ").unwrap(), sep);
        assert_eq!(lines[3].find(" | ").unwrap(), sep);
    }

    #[test]
    fn test_link_shows_target() {
        assert_eq!(TextBackend.link("/a", "A", false), "A </a>");
        assert_eq!(TextBackend.link("/a", "/a", false), "</a>");
    }

    #[test]
    fn test_faq_cards() {
        let cards = vec![("Why?".to_string(), "Because.".to_string())];
        assert_eq!(
            TextBackend.cards(CardStyle::Faq, &cards),
            "Q: Why?\nA: Because.\n"
        );
    }
}
