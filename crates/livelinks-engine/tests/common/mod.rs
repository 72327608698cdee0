#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use livelinks_engine::decoration::Attr;
use livelinks_engine::{
    Affordance, CrossRefIndex, DocumentId, EditorFocus, IndexError, Link, LinkElement, Navigator,
    PointerAffordancePort, RawToken, Reference, RenderedDocument, Span, SyntaxSource,
};

/// Source text plus the tokens a live-preview syntax tree would report.
pub struct Doc {
    pub text: String,
    tokens: Vec<RawToken>,
}

impl Doc {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: Vec::new(),
        }
    }

    /// Tags the first occurrence of `needle` at or after `from`.
    pub fn tag(mut self, needle: &str, from: usize, class: &str) -> Self {
        let start = from
            + self.text[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle:?} not in document"));
        self.tokens.push(RawToken::new(start, start + needle.len(), class));
        self
    }

    pub fn whole(&self) -> [Span; 1] {
        [Span::new(0, self.text.len())]
    }
}

impl SyntaxSource for Doc {
    fn tokens(&self, range: Span) -> Vec<RawToken> {
        self.tokens
            .iter()
            .filter(|t| t.span.overlaps(range))
            .cloned()
            .collect()
    }

    fn slice(&self, span: Span) -> Cow<'_, str> {
        Cow::Borrowed(&self.text[span.start..span.end])
    }
}

#[derive(Default)]
pub struct Index(HashMap<DocumentId, Vec<Reference>>);

impl Index {
    pub fn with(mut self, document: &str, destination: &str, start: usize, end: usize) -> Self {
        self.0.entry(document.into()).or_default().push(Reference {
            destination: destination.to_string(),
            start,
            end,
        });
        self
    }
}

impl CrossRefIndex for Index {
    fn references(&self, document: &DocumentId) -> Result<Vec<Reference>, IndexError> {
        self.0
            .get(document)
            .cloned()
            .ok_or_else(|| IndexError::NotIndexed(document.clone()))
    }
}

#[derive(Default)]
pub struct Host {
    pub text: String,
    pub opened: Vec<String>,
    pub visited: Vec<String>,
    pub affordance: Option<Affordance>,
}

impl Navigator for Host {
    fn navigate_internal(&mut self, destination: &str) {
        self.opened.push(destination.to_string());
    }

    fn navigate_external(&mut self, destination: &str) {
        self.visited.push(destination.to_string());
    }
}

impl PointerAffordancePort for Host {
    fn set_affordance(&mut self, affordance: Affordance) {
        self.affordance = Some(affordance);
    }
}

impl EditorFocus for Host {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn place_cursor(&mut self, _offset: usize) {}

    fn blur(&mut self) {}
}

/// A rendered mark that counts how often handlers were attached.
#[derive(Default)]
pub struct Mark {
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub handlers: Vec<Link>,
}

impl Mark {
    pub fn from_attributes(attrs: Vec<(&'static str, String)>) -> Self {
        Self {
            attrs: attrs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            ..Self::default()
        }
    }

    pub fn foreign(href: &str, internal: bool) -> Self {
        let mut mark = Self::default();
        mark.attrs.insert(Attr::HREF.to_string(), href.to_string());
        if internal {
            mark.classes.push(Attr::INTERNAL_CLASS.to_string());
        }
        mark
    }

    pub fn link(&self) -> &Link {
        &self.handlers[0]
    }
}

impl LinkElement for Mark {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    fn attach(&mut self, link: Link) {
        self.handlers.push(link);
    }
}

#[derive(Default)]
pub struct Page {
    pub marks: Vec<Mark>,
}

impl RenderedDocument for Page {
    fn for_each_link_element(&mut self, visit: &mut dyn FnMut(&mut dyn LinkElement)) {
        for mark in &mut self.marks {
            visit(mark);
        }
    }
}
