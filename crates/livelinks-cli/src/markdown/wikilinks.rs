//! Wikilink discovery and the cross-reference index built from it.
//!
//! Code is a raw zone: inline code, fenced and indented blocks yield
//! nothing. Zones come from the same pulldown-cmark walk the tokenizer
//! uses. A wikilink never crosses a line break.

use std::collections::HashMap;
use std::ops::Range;

use livelinks_engine::{CrossRefIndex, DocumentId, IndexError, Reference, Span};
use pulldown_cmark::{Event, Options, Parser, Tag};

use super::cursor::Cursor;

pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
}

/// A `[[target]]` or `[[target|alias]]` occurrence. The alias is display
/// text only and is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiRef {
    /// Including the brackets.
    pub full: Span,
    pub target: String,
}

pub fn find_wikilinks(text: &str) -> Vec<WikiRef> {
    let code = code_ranges(text);
    let mut zones = code.iter().peekable();
    let mut cur = Cursor::new(text, 0);
    let mut out = Vec::new();

    while !cur.eof() {
        let pos = cur.pos();
        while zones.next_if(|zone| zone.end <= pos).is_some() {}
        if let Some(zone) = zones.peek()
            && zone.contains(&pos)
        {
            cur.bump_n(zone.end - pos);
            continue;
        }

        let saved = cur.clone();
        if let Some(link) = try_wikilink(&mut cur) {
            if zones.peek().is_none_or(|zone| zone.start >= link.full.end) {
                out.push(link);
                continue;
            }
            cur = saved;
        }
        cur.bump();
    }
    out
}

/// Ranges of inline code and code blocks, in document order.
fn code_ranges(text: &str) -> Vec<Range<usize>> {
    Parser::new_ext(text, Options::empty())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) | Event::Code(_) => Some(range),
            _ => None,
        })
        .collect()
}

fn try_wikilink(cur: &mut Cursor<'_>) -> Option<WikiRef> {
    if !cur.at(WikiLink::OPEN) {
        return None;
    }
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());

    let target_start = cur.pos();
    let found = cur.skip_to(|c| c.peek() == Some(WikiLink::ALIAS) || c.at(WikiLink::CLOSE));
    let target_end = cur.pos();

    let mut closed = found && cur.at(WikiLink::CLOSE);
    if found && cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        closed = cur.skip_to(|c| c.at(WikiLink::CLOSE));
    }

    let target = cur.text_between(target_start, target_end).trim().to_string();
    if !closed || target.is_empty() {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(WikiRef {
        full: Span::new(start, cur.pos()),
        target,
    })
}

/// Wikilink references per document.
#[derive(Debug, Default)]
pub struct WikiLinkIndex {
    documents: HashMap<DocumentId, Vec<Reference>>,
}

impl WikiLinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `text` under `document`, replacing any previous entry.
    pub fn insert(&mut self, document: DocumentId, text: &str) {
        let references = find_wikilinks(text)
            .into_iter()
            .map(|link| Reference {
                destination: link.target,
                start: link.full.start,
                end: link.full.end,
            })
            .collect::<Vec<_>>();
        log::debug!("indexed {} wikilinks in {document}", references.len());
        self.documents.insert(document, references);
    }
}

impl CrossRefIndex for WikiLinkIndex {
    fn references(&self, document: &DocumentId) -> Result<Vec<Reference>, IndexError> {
        self.documents
            .get(document)
            .cloned()
            .ok_or_else(|| IndexError::NotIndexed(document.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn plain_and_aliased_links() {
        let links = find_wikilinks("See [[Todo]] and [[Notes/Plan|the plan]].");

        assert_eq!(
            links,
            vec![
                WikiRef {
                    full: Span::new(4, 12),
                    target: "Todo".to_string(),
                },
                WikiRef {
                    full: Span::new(17, 40),
                    target: "Notes/Plan".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case::code_span("`[[not a link]]`")]
    #[case::unclosed("[[unclosed link")]
    #[case::line_break("[[split\nlink]]")]
    #[case::empty_target("[[]] and [[ |alias]]")]
    #[case::fenced_block("```\n[[inside fence]]\n```")]
    #[case::tilde_fence("~~~\n[[inside tilde fence]]\n~~~\n")]
    #[case::long_fence("````\n[[x]]\n````\n")]
    #[case::indented_block("para\n\n    [[indented code]]\n")]
    #[case::closing_inside_code("[[a `b]]` c")]
    fn no_links(#[case] text: &str) {
        assert!(find_wikilinks(text).is_empty());
    }

    #[test]
    fn unclosed_tick_does_not_hide_later_links() {
        let links = find_wikilinks("a ` tick then [[Todo]]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "Todo");
    }

    #[test]
    fn links_after_a_code_block_are_found() {
        let links = find_wikilinks("~~~\n[[skip]]\n~~~\n\nSee [[Todo]]\n");
        assert_eq!(
            links,
            vec![WikiRef {
                full: Span::new(22, 30),
                target: "Todo".to_string(),
            }]
        );
    }

    #[test]
    fn index_serves_inserted_documents_only() {
        let mut index = WikiLinkIndex::new();
        index.insert(DocumentId::from("note.md"), "Read [[Todo]] first.");

        let refs = index.references(&DocumentId::from("note.md")).unwrap();
        assert_eq!(
            refs,
            vec![Reference {
                destination: "Todo".to_string(),
                start: 5,
                end: 13,
            }]
        );
        assert!(matches!(
            index.references(&DocumentId::from("other.md")),
            Err(IndexError::NotIndexed(_))
        ));
    }
}
