//! # Markdown host side
//!
//! The engine never parses markdown. This module plays the editor's part:
//!
//! - **`tokens`**: pulldown-cmark events mapped to labelled token nodes
//! - **`wikilinks`**: `[[target]]` discovery feeding a cross-reference index
//! - **`cursor`**: byte cursor used by the wikilink scanner

pub mod cursor;
pub mod tokens;
pub mod wikilinks;

use std::borrow::Cow;

use livelinks_engine::{RawToken, Span, SyntaxSource};
use xi_rope::Rope;

pub use wikilinks::WikiLinkIndex;

/// Document text plus its token nodes, tokenized once on load.
pub struct MarkdownDocument {
    rope: Rope,
    tokens: Vec<RawToken>,
}

impl MarkdownDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
            tokens: tokens::tokenize(text),
        }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn text(&self) -> String {
        self.rope.slice_to_cow(0..self.len()).into_owned()
    }

    /// The whole document as the single visible range.
    pub fn everything(&self) -> [Span; 1] {
        [Span::new(0, self.len())]
    }
}

impl SyntaxSource for MarkdownDocument {
    fn tokens(&self, range: Span) -> Vec<RawToken> {
        self.tokens
            .iter()
            .filter(|token| token.span.overlaps(range))
            .cloned()
            .collect()
    }

    fn slice(&self, span: Span) -> Cow<'_, str> {
        let end = span.end.min(self.len());
        let start = span.start.min(end);
        self.rope.slice_to_cow(start..end)
    }
}
