//! Section renderer
//!
//! Maps each validated [`Section`] to a [`RenderedBlock`] through a
//! [`Backend`]. Dispatch is an exhaustive `match` over [`Block`], so a new
//! block variant does not compile until it has a render rule here.

mod backend;
mod html;
mod text;

pub use backend::{Backend, CardStyle};
pub use html::{html_escape, strip_html, HtmlBackend};
pub use text::TextBackend;

use serde::Serialize;

use crate::content::{Block, Inline, Section, SectionKind, ValidSections};

/// Output of rendering one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub id: String,
    pub title: String,
    pub kind: SectionKind,
    pub markup: String,
}

/// Renders sections with a chosen back end
#[derive(Debug, Clone, Default)]
pub struct Renderer<B: Backend> {
    backend: B,
}

impl Renderer<HtmlBackend> {
    pub fn html() -> Self {
        Self::new(HtmlBackend)
    }
}

impl Renderer<TextBackend> {
    pub fn text() -> Self {
        Self::new(TextBackend)
    }
}

impl<B: Backend> Renderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Render every section, in input order
    pub fn render_all(&self, sections: &ValidSections) -> Vec<RenderedBlock> {
        sections.iter().map(|s| self.render(s)).collect()
    }

    /// Render a single section
    pub fn render(&self, section: &Section) -> RenderedBlock {
        let b = &self.backend;
        let mut parts = String::new();

        parts.push_str(&b.heading(&section.id, &section.title));
        if let Some(summary) = &section.summary {
            parts.push_str(&b.lead(&self.inline(summary)));
        }
        for paragraph in &section.paragraphs {
            parts.push_str(&b.paragraph(&self.inline(paragraph)));
        }
        if let Some(block) = &section.block {
            parts.push_str(&self.block(block));
        }

        let kind = section.kind();
        RenderedBlock {
            id: section.id.clone(),
            title: section.title.clone(),
            kind,
            markup: b.section(&section.id, kind, &parts),
        }
    }

    fn block(&self, block: &Block) -> String {
        let b = &self.backend;
        match block {
            Block::Checklist(checklist) => {
                b.checklist(checklist.title.as_deref(), &checklist.items)
            }
            Block::Perspectives(cards) => b.cards(
                CardStyle::Accordion,
                &cards
                    .iter()
                    .map(|c| (c.title.clone(), self.inline(&c.body)))
                    .collect::<Vec<_>>(),
            ),
            Block::ComparisonTable(table) => b.table(&table.headers, &table.rows),
            Block::Plays(plays) => b.cards(
                CardStyle::Play,
                &plays
                    .iter()
                    .map(|p| (p.title.clone(), self.inline(&p.detail)))
                    .collect::<Vec<_>>(),
            ),
            Block::References(refs) => b.link_list(
                &refs
                    .iter()
                    .map(|r| (r.label.clone(), r.href.clone()))
                    .collect::<Vec<_>>(),
            ),
            Block::Faqs(cards) => b.cards(
                CardStyle::Faq,
                &cards
                    .iter()
                    .map(|c| (c.title.clone(), self.inline(&c.body)))
                    .collect::<Vec<_>>(),
            ),
        }
    }

    /// Render an inline node tree
    pub fn inline(&self, node: &Inline) -> String {
        let b = &self.backend;
        match node {
            Inline::Text(text) => b.text(text),
            Inline::Fragment(nodes) => nodes.iter().map(|n| self.inline(n)).collect(),
            Inline::Link(link) => {
                let inner = if link.children.is_empty() {
                    b.text(link.display_label())
                } else {
                    link.children.iter().map(|n| self.inline(n)).collect()
                };
                b.link(&link.href, &inner, link.is_external())
            }
            Inline::Emphasis(e) => b.emphasis(&self.inline(&e.em)),
        }
    }
}

/// Join rendered blocks into one body string
pub fn join_blocks(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.markup.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
