//! Test doubles for the host ports.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::crossref::{CrossRefIndex, DocumentId, IndexError, Reference};
use crate::focus::EditorFocus;
use crate::interaction::{
    Affordance, LinkElement, Navigator, PointerAffordancePort, RenderedDocument,
};
use crate::link::Link;
use crate::scanning::{RawToken, SyntaxSource};
use crate::span::Span;
use crate::view::ModeSwitchButton;

/// A document with a hand-written token list.
pub struct TokenList {
    text: String,
    tokens: Vec<RawToken>,
}

impl TokenList {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: Vec::new(),
        }
    }

    pub fn token(mut self, start: usize, end: usize, class: &str) -> Self {
        self.tokens.push(RawToken::new(start, end, class));
        self
    }

    pub fn unclassed(mut self, start: usize, end: usize) -> Self {
        self.tokens.push(RawToken::unclassed(start, end));
        self
    }

    /// `{before}[{label}]({url}){after}` tokenized the way live preview does.
    pub fn markdown_link(before: &str, label: &str, url: &str, after: &str) -> Self {
        let text = format!("{before}[{label}]({url}){after}");
        let open = before.len();
        let label_start = open + 1;
        let label_end = label_start + label.len();
        let url_start = label_end + 2;
        let url_end = url_start + url.len();
        Self::new(&text)
            .token(open, label_start, "formatting formatting-link link")
            .token(label_start, label_end, "link")
            .token(label_end, label_end + 1, "formatting formatting-link link")
            .token(url_start - 1, url_start, "formatting formatting-link-string string url")
            .token(url_start, url_end, "string url")
            .token(url_end, url_end + 1, "formatting formatting-link-string string url")
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}

impl SyntaxSource for TokenList {
    fn tokens(&self, range: Span) -> Vec<RawToken> {
        self.tokens
            .iter()
            .filter(|token| token.span.overlaps(range))
            .cloned()
            .collect()
    }

    fn slice(&self, span: Span) -> Cow<'_, str> {
        Cow::Borrowed(&self.text[span.start..span.end])
    }
}

#[derive(Default)]
pub struct FakeIndex {
    references: HashMap<DocumentId, Vec<Reference>>,
    fail: bool,
}

impl FakeIndex {
    pub fn with(mut self, document: &str, destination: &str, start: usize, end: usize) -> Self {
        self.references
            .entry(DocumentId::from(document))
            .or_default()
            .push(Reference {
                destination: destination.to_string(),
                start,
                end,
            });
        self
    }

    pub fn failing() -> Self {
        Self {
            references: HashMap::new(),
            fail: true,
        }
    }
}

impl CrossRefIndex for FakeIndex {
    fn references(&self, document: &DocumentId) -> Result<Vec<Reference>, IndexError> {
        if self.fail {
            return Err(IndexError::Lookup("index unavailable".to_string()));
        }
        self.references
            .get(document)
            .cloned()
            .ok_or_else(|| IndexError::NotIndexed(document.clone()))
    }
}

/// Records everything the engine asks of the editor.
#[derive(Default)]
pub struct FakeHost {
    pub text: String,
    pub internal: Vec<String>,
    pub external: Vec<String>,
    pub affordances: Vec<Affordance>,
    pub cursor: Option<usize>,
    pub blurred: usize,
}

impl FakeHost {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

impl Navigator for FakeHost {
    fn navigate_internal(&mut self, destination: &str) {
        self.internal.push(destination.to_string());
    }

    fn navigate_external(&mut self, destination: &str) {
        self.external.push(destination.to_string());
    }
}

impl PointerAffordancePort for FakeHost {
    fn set_affordance(&mut self, affordance: Affordance) {
        self.affordances.push(affordance);
    }
}

impl EditorFocus for FakeHost {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn place_cursor(&mut self, offset: usize) {
        self.cursor = Some(offset);
    }

    fn blur(&mut self) {
        self.blurred += 1;
    }
}

#[derive(Default)]
pub struct FakeButton {
    pub hidden: Vec<bool>,
}

impl ModeSwitchButton for FakeButton {
    fn set_hidden(&mut self, hidden: bool) {
        self.hidden.push(hidden);
    }
}

#[derive(Default)]
pub struct FakeElement {
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    /// Every link attached; binding must leave exactly one.
    pub attached: Vec<Link>,
}

impl FakeElement {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_uid(uid: &str) -> Self {
        let mut element = Self::default();
        element.attrs.insert(crate::decoration::Attr::UID.to_string(), uid.to_string());
        element
    }

    pub fn with_href(href: &str) -> Self {
        let mut element = Self::default();
        element.attrs.insert(crate::decoration::Attr::HREF.to_string(), href.to_string());
        element
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }
}

impl LinkElement for FakeElement {
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
        self.attached.push(link);
    }
}

pub struct FakeRendered {
    pub elements: Vec<FakeElement>,
}

impl FakeRendered {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self { elements }
    }
}

impl RenderedDocument for FakeRendered {
    fn for_each_link_element(&mut self, visit: &mut dyn FnMut(&mut dyn LinkElement)) {
        for element in &mut self.elements {
            visit(element);
        }
    }
}
