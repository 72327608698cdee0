//! Maps pulldown-cmark events onto the labelled token nodes a live-preview
//! editor reports.
//!
//! | source | label |
//! |---|---|
//! | `[`, `]`, `(`, `)` of an inline link | `formatting formatting-link ...` |
//! | link text | `link` |
//! | inline link destination | `string url` |
//! | autolink `<...>` body, bare `scheme://` text | `url` |
//!
//! Code blocks, inline code and reference style links produce no tokens.

use std::ops::Range;
use std::sync::OnceLock;

use livelinks_engine::RawToken;
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;

const OPEN_BRACKET: &str = "formatting formatting-link link";
const OPEN_PAREN: &str = "formatting formatting-link-string string url";
const LINK_TEXT: &str = "link";
const DESTINATION: &str = "string url";
const BARE_URL: &str = "url";

/// A link whose closing event has not been seen yet.
struct OpenLink {
    link_type: LinkType,
    range: Range<usize>,
    label: Vec<Range<usize>>,
    /// End of the last label event; the closing `]` is at or after it.
    label_end: usize,
}

pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut open: Option<OpenLink> = None;
    let mut run: Option<Range<usize>> = None;
    let mut in_code_block = false;

    for (event, range) in Parser::new_ext(text, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                flush_run(text, &mut run, &mut tokens);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Start(Tag::Link { link_type, .. }) => {
                flush_run(text, &mut run, &mut tokens);
                open = Some(OpenLink {
                    link_type,
                    label: Vec::new(),
                    label_end: range.start + 1,
                    range,
                });
            }
            Event::End(TagEnd::Link) => {
                if let Some(link) = open.take() {
                    close_link(text, link, &mut tokens);
                }
            }
            Event::Text(_) if in_code_block => {}
            Event::Text(_) | Event::Code(_) if open.is_some() => {
                if let Some(link) = open.as_mut() {
                    link.label_end = range.end;
                    if matches!(event, Event::Text(_)) {
                        link.label.push(range);
                    }
                }
            }
            Event::Text(_) => match run.as_mut() {
                Some(current) if current.end == range.start => current.end = range.end,
                _ => {
                    flush_run(text, &mut run, &mut tokens);
                    run = Some(range);
                }
            },
            _ => flush_run(text, &mut run, &mut tokens),
        }
    }
    flush_run(text, &mut run, &mut tokens);

    tokens.sort_by_key(|token| token.span.start);
    tokens
}

fn close_link(text: &str, link: OpenLink, tokens: &mut Vec<RawToken>) {
    let OpenLink {
        link_type,
        range,
        label,
        label_end,
    } = link;

    match link_type {
        LinkType::Autolink => {
            tokens.push(RawToken::new(range.start + 1, range.end - 1, BARE_URL));
        }
        LinkType::Inline => {
            let Some(close) = text[label_end..range.end].find("](").map(|i| label_end + i) else {
                return;
            };
            if !text[..range.end].ends_with(')') {
                return;
            }
            let dest_area = close + 2..range.end - 1;
            tokens.push(RawToken::new(range.start, range.start + 1, OPEN_BRACKET));
            for text in label {
                tokens.push(RawToken::new(text.start, text.end, LINK_TEXT));
            }
            tokens.push(RawToken::new(close, close + 1, OPEN_BRACKET));
            tokens.push(RawToken::new(dest_area.start - 1, dest_area.start, OPEN_PAREN));
            if let Some(dest) = destination_span(text, dest_area) {
                tokens.push(RawToken::new(dest.start, dest.end, DESTINATION));
            }
            tokens.push(RawToken::new(range.end - 1, range.end, OPEN_PAREN));
        }
        // Reference style links carry their url in a definition elsewhere;
        // label tokens alone would stay open and swallow a later url.
        _ => {}
    }
}

/// The raw destination inside `(...)`, without an optional title.
fn destination_span(text: &str, area: Range<usize>) -> Option<Range<usize>> {
    let inner = &text[area.clone()];
    let lead = inner.len() - inner.trim_start().len();
    let start = area.start + lead;
    let rest = &text[start..area.end];

    let (start, len) = if let Some(bracketed) = rest.strip_prefix('<') {
        (start + 1, bracketed.find('>')?)
    } else {
        (start, rest.find(char::is_whitespace).unwrap_or(rest.len()))
    };
    (len > 0).then_some(start..start + len)
}

fn flush_run(text: &str, run: &mut Option<Range<usize>>, tokens: &mut Vec<RawToken>) {
    if let Some(range) = run.take() {
        for url in bare_urls(&text[range.clone()]) {
            tokens.push(RawToken::new(range.start + url.start, range.start + url.end, BARE_URL));
        }
    }
}

/// `scheme://...` runs in plain text, minus trailing punctuation.
pub fn bare_urls(text: &str) -> Vec<Range<usize>> {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let url_regex = URL_REGEX.get_or_init(|| {
        Regex::new(r"[A-Za-z][A-Za-z0-9+.-]*://[^\s<>\[\]]+").expect("Invalid URL regex")
    });

    let mut out = Vec::new();
    for url_match in url_regex.find_iter(text) {
        let start = url_match.start();
        let trimmed = url_match
            .as_str()
            .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', ']', '}']);
        if !trimmed.is_empty() {
            out.push(start..start + trimmed.len());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn labelled(text: &str) -> Vec<(&str, &str)> {
        tokenize(text)
            .iter()
            .map(|t| {
                (
                    &text[t.span.start..t.span.end],
                    t.class.as_deref().unwrap_or_default(),
                )
            })
            .map(|(slice, class)| (slice, class_name(class)))
            .collect()
    }

    fn class_name(class: &str) -> &'static str {
        match class {
            OPEN_BRACKET => "OPEN_BRACKET",
            OPEN_PAREN => "OPEN_PAREN",
            LINK_TEXT => "LINK_TEXT",
            DESTINATION => "DESTINATION",
            BARE_URL => "BARE_URL",
            _ => "other",
        }
    }

    #[test]
    fn inline_link() {
        assert_eq!(
            labelled("Visit [OpenAI](https://openai.com) today."),
            vec![
                ("[", "OPEN_BRACKET"),
                ("OpenAI", "LINK_TEXT"),
                ("]", "OPEN_BRACKET"),
                ("(", "OPEN_PAREN"),
                ("https://openai.com", "DESTINATION"),
                (")", "OPEN_PAREN"),
            ]
        );
    }

    #[test]
    fn inline_link_with_title() {
        let tokens = labelled(r#"[a](https://x.y "Title")"#);
        assert!(tokens.contains(&("https://x.y", "DESTINATION")));
    }

    #[test]
    fn emphasised_label() {
        let tokens = labelled("[**bold**](https://x.y)");
        assert!(tokens.contains(&("bold", "LINK_TEXT")));
        assert!(tokens.contains(&("]", "OPEN_BRACKET")));
        assert!(tokens.contains(&("https://x.y", "DESTINATION")));
    }

    #[test]
    fn autolink_body_is_a_url() {
        assert_eq!(
            labelled("Go <https://example.com> now"),
            vec![("https://example.com", "BARE_URL")]
        );
    }

    #[test]
    fn bare_url_in_text() {
        assert_eq!(
            labelled("See https://example.com now"),
            vec![("https://example.com", "BARE_URL")]
        );
    }

    #[test]
    fn code_produces_nothing() {
        assert!(tokenize("`https://a.example`\n\n```\nhttps://b.example\n```\n").is_empty());
    }

    #[test]
    fn reference_link_leaves_no_open_label() {
        let text = "[docs][ref] then https://later.example\n\n[ref]: https://docs.example\n";
        assert_eq!(labelled(text), vec![("https://later.example", "BARE_URL")]);
    }

    #[rstest]
    #[case("https://example.com.", "https://example.com")]
    #[case("(see https://example.com/a)", "https://example.com/a")]
    #[case("ftp://files.example/x?y=1,", "ftp://files.example/x?y=1")]
    #[case("https://example.com/path_(x", "https://example.com/path_(x")]
    fn trailing_punctuation_is_not_part_of_a_bare_url(#[case] text: &str, #[case] url: &str) {
        let found: Vec<&str> = bare_urls(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(found, vec![url]);
    }

    #[test]
    fn no_scheme_no_url() {
        assert!(bare_urls("www.example.com and example.com").is_empty());
    }
}
