use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::span::Span;

/// Identifier of a [`Link`] within one scan pass.
///
/// Identifiers are not stable across passes: the next pass hands out fresh
/// ones even for the same link text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a link is resolved when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkKind {
    /// A reference to another note, taken from the cross-reference index.
    Internal,
    /// A url found in the token stream.
    External,
}

/// A logical link: one decorated interval plus where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: LinkId,
    /// Position in the document. `None` for links synthesized from rendered
    /// elements whose offset is unknown.
    pub span: Option<Span>,
    pub kind: LinkKind,
    pub destination: Option<String>,
    /// Bare url with no separate display text.
    pub unnamed: bool,
}

impl Link {
    pub fn internal(id: LinkId, span: Span, destination: impl Into<String>) -> Self {
        Self {
            id,
            span: Some(span),
            kind: LinkKind::Internal,
            destination: Some(destination.into()),
            unnamed: false,
        }
    }

    pub fn external(id: LinkId, span: Span, destination: impl Into<String>, unnamed: bool) -> Self {
        Self {
            id,
            span: Some(span),
            kind: LinkKind::External,
            destination: Some(destination.into()),
            unnamed,
        }
    }

    /// A link with no document position, built for an element rendered by
    /// some other subsystem.
    pub fn placeholder(id: LinkId, kind: LinkKind, destination: Option<String>) -> Self {
        Self {
            id,
            span: None,
            kind,
            destination,
            unnamed: false,
        }
    }

    /// Start offset, used as the decoration sort key.
    pub fn start(&self) -> Option<usize> {
        self.span.map(|span| span.start)
    }

    /// True if `offset` falls within the closed interval of this link.
    /// Placeholders never match.
    pub fn touches(&self, offset: usize) -> bool {
        self.span.is_some_and(|span| span.contains_inclusive(offset))
    }

    /// Named external links show their destination as a hover label.
    pub fn shows_label(&self) -> bool {
        self.kind == LinkKind::External && !self.unnamed
    }
}

/// Source of fresh link identifiers for a pass.
pub trait IdGenerator {
    fn next_id(&mut self) -> LinkId;
}

/// Random identifiers; the default for live views.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> LinkId {
        LinkId(Uuid::new_v4().simple().to_string())
    }
}

/// Predictable `link-1`, `link-2`, ... identifiers for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> LinkId {
        self.issued += 1;
        LinkId(format!("link-{}", self.issued))
    }
}
