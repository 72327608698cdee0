use crate::link::{IdGenerator, Link};
use crate::span::Span;

use super::token::Token;
use super::url::UrlShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Link text seen, waiting for its url.
    Open(Span),
}

/// Merges link text and url tokens into closed [`Link`]s.
///
/// Rules, per token in document order:
/// - a url token that is not an absolute url is ignored in every state
/// - `Idle` + url emits an unnamed link for that token alone
/// - `Idle` + link text opens a link
/// - `Open` + link text extends it (text split by escapes or nested markup)
/// - `Open` + url closes it with the url as destination
///
/// A token labelled both link and url counts as url while idle and as link
/// text while open.
///
/// Whatever is still open when input ends is dropped by [`finish`](Self::finish).
pub struct LinkAssembler<'a> {
    shape: &'a UrlShape,
    ids: &'a mut dyn IdGenerator,
    state: State,
}

impl<'a> LinkAssembler<'a> {
    pub fn new(shape: &'a UrlShape, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            shape,
            ids,
            state: State::Idle,
        }
    }

    /// Feeds one token; returns the link it closes, if any.
    pub fn push(&mut self, token: &Token) -> Option<Link> {
        if token.is_url() && !self.shape.is_absolute(&token.text) {
            return None;
        }

        match self.state {
            State::Idle if token.is_url() => Some(Link::external(
                self.ids.next_id(),
                token.span,
                token.text.clone(),
                true,
            )),
            State::Idle if token.is_link() => {
                self.state = State::Open(token.span);
                None
            }
            State::Open(open) if token.is_link() => {
                self.state = State::Open(Span::new(open.start, token.span.end));
                None
            }
            State::Open(open) if token.is_url() => {
                self.state = State::Idle;
                let span = Span::new(open.start, token.span.end);
                Some(Link::external(self.ids.next_id(), span, token.text.clone(), false))
            }
            _ => None,
        }
    }

    /// Ends input. Returns the span of an open link that was discarded.
    pub fn finish(self) -> Option<Span> {
        match self.state {
            State::Idle => None,
            State::Open(span) => Some(span),
        }
    }
}

/// Runs a whole token sequence through a fresh assembler.
pub fn assemble(tokens: &[Token], shape: &UrlShape, ids: &mut dyn IdGenerator) -> Vec<Link> {
    let mut assembler = LinkAssembler::new(shape, ids);
    let links: Vec<Link> = tokens.iter().filter_map(|token| assembler.push(token)).collect();
    if let Some(dropped) = assembler.finish() {
        log::debug!("dropping unclosed link text at {}..{}", dropped.start, dropped.end);
    }
    links
}
