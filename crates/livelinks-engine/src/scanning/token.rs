use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::span::Span;

use super::labels::Labels;

/// A token node as the host's syntax tree reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub span: Span,
    /// Space separated label string, if the node carries one.
    pub class: Option<String>,
}

impl RawToken {
    pub fn new(start: usize, end: usize, class: &str) -> Self {
        Self {
            span: Span::new(start, end),
            class: Some(class.to_string()),
        }
    }

    /// A structural node without a token class.
    pub fn unclassed(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            class: None,
        }
    }
}

/// Read access to the host's tokenized document.
pub trait SyntaxSource {
    /// Token nodes intersecting `range`, in document order.
    fn tokens(&self, range: Span) -> Vec<RawToken>;

    /// Document text covered by `span`.
    fn slice(&self, span: Span) -> Cow<'_, str>;
}

/// A classified token that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub labels: BTreeSet<String>,
    pub span: Span,
    pub text: String,
}

impl Token {
    /// Classifies a raw token, dropping unlabelled and formatting tokens.
    pub fn classify(raw: &RawToken, source: &dyn SyntaxSource) -> Option<Token> {
        let class = raw.class.as_deref()?;
        if class.contains(Labels::FORMATTING) {
            return None;
        }

        let labels: BTreeSet<String> = class.split_whitespace().map(str::to_string).collect();
        if labels.is_empty() {
            return None;
        }

        Some(Token {
            labels,
            span: raw.span,
            text: source.slice(raw.span).into_owned(),
        })
    }

    pub fn has(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_url(&self) -> bool {
        self.has(Labels::URL)
    }

    pub fn is_link(&self) -> bool {
        self.has(Labels::LINK)
    }
}

/// Classifies every token over the visible ranges.
///
/// Ranges are walked in ascending order and tokens within a range by
/// ascending start, giving one linear sequence in document order. A token
/// reaching into an earlier range is only seen once.
pub fn scan(source: &dyn SyntaxSource, visible: &[Span]) -> Vec<Token> {
    let mut ranges = visible.to_vec();
    ranges.sort_by_key(|range| range.start);

    let mut out: Vec<Token> = Vec::new();
    for range in ranges {
        let mut raw = source.tokens(range);
        raw.sort_by_key(|token| token.span.start);
        for token in raw.iter().filter_map(|token| Token::classify(token, source)) {
            if let Some(last) = out.last()
                && token.span.start < last.span.end
            {
                continue;
            }
            out.push(token);
        }
    }
    out
}
