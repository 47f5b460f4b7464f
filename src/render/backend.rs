//! Output back ends
//!
//! The renderer decides *what* to emit for each section; a back end decides
//! how each primitive looks in a given output format.

use crate::content::SectionKind;

/// Visual treatment for title + body card lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    /// Collapsible perspectives
    Accordion,
    /// Question/answer pairs
    Faq,
    /// Numbered tactic cards
    Play,
}

impl CardStyle {
    pub fn class(&self) -> &'static str {
        match self {
            CardStyle::Accordion => "accordion",
            CardStyle::Faq => "faq",
            CardStyle::Play => "plays",
        }
    }
}

/// Output primitives. Inputs marked `inner` are already rendered by the
/// same back end; everything else is raw text the back end must escape.
pub trait Backend {
    fn text(&self, text: &str) -> String;
    fn link(&self, href: &str, inner: &str, external: bool) -> String;
    fn emphasis(&self, inner: &str) -> String;

    fn heading(&self, id: &str, title: &str) -> String;
    fn lead(&self, inner: &str) -> String;
    fn paragraph(&self, inner: &str) -> String;

    fn checklist(&self, title: Option<&str>, items: &[String]) -> String;
    /// `cards` holds (raw title, rendered body) pairs
    fn cards(&self, style: CardStyle, cards: &[(String, String)]) -> String;
    fn table(&self, headers: &[String], rows: &[Vec<String>]) -> String;
    /// `links` holds (raw label, href) pairs
    fn link_list(&self, links: &[(String, String)]) -> String;

    /// Wrap one section's rendered parts
    fn section(&self, id: &str, kind: SectionKind, inner: &str) -> String;
}
