//! Turns a pass snapshot into marks, HTML and a plain table.

use std::collections::BTreeMap;
use std::fmt::Write;

use livelinks_engine::{Link, LinkElement, LinkKind, PassSnapshot, RenderedDocument, Span};

/// Class every decoration mark carries.
pub const MARK_CLASS: &str = "live-link";

/// One rendered `<span>` over a decorated interval.
#[derive(Debug)]
pub struct Mark {
    pub span: Span,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    link: Option<Link>,
}

impl Mark {
    /// The link bound to this mark, once the engine attached one.
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
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
        self.link = Some(link);
    }
}

/// Every mark of one render, in document order.
#[derive(Debug, Default)]
pub struct RenderedMarks {
    pub marks: Vec<Mark>,
}

impl RenderedMarks {
    pub fn from_snapshot(snapshot: &PassSnapshot) -> Self {
        let marks = snapshot
            .decorations
            .iter()
            .map(|decoration| Mark {
                span: decoration.span,
                attrs: decoration
                    .attributes()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
                classes: vec![MARK_CLASS.to_string()],
                link: None,
            })
            .collect();
        Self { marks }
    }

    /// The bound link whose mark covers `offset`.
    pub fn link_at(&self, snapshot: &PassSnapshot, offset: usize) -> Option<&Link> {
        let decoration = snapshot.decorations.at(offset)?;
        self.marks
            .iter()
            .find(|mark| mark.span == decoration.span)
            .and_then(Mark::link)
    }
}

impl RenderedDocument for RenderedMarks {
    fn for_each_link_element(&mut self, visit: &mut dyn FnMut(&mut dyn LinkElement)) {
        for mark in &mut self.marks {
            visit(mark);
        }
    }
}

/// The document as escaped HTML with one `<span>` per mark.
pub fn render_html(text: &str, rendered: &RenderedMarks) -> String {
    let mut out = String::from("<pre class=\"livelinks\">");
    let mut pos = 0;
    for mark in &rendered.marks {
        out.push_str(&html_escape::encode_text(&text[pos..mark.span.start]));
        out.push_str("<span class=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&mark.classes.join(" ")));
        out.push('"');
        for (name, value) in &mark.attrs {
            let _ = write!(
                out,
                " {name}=\"{}\"",
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        out.push('>');
        out.push_str(&html_escape::encode_text(&text[mark.span.start..mark.span.end]));
        out.push_str("</span>");
        pos = mark.span.end;
    }
    out.push_str(&html_escape::encode_text(&text[pos..]));
    out.push_str("</pre>");
    out
}

/// One line per decorated link.
pub fn render_table(text: &str, snapshot: &PassSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:<8} {:<9} {}", "SPAN", "KIND", "LABEL", "DESTINATION");
    for decoration in snapshot.decorations.iter() {
        let Some(link) = snapshot.registry.get(&decoration.link) else {
            continue;
        };
        let kind = match link.kind {
            LinkKind::Internal => "internal",
            LinkKind::External if link.unnamed => "bare",
            LinkKind::External => "named",
        };
        let label = decoration
            .label
            .as_ref()
            .map_or("-".to_string(), |label| label.position.to_string());
        let span = format!("{}..{}", decoration.span.start, decoration.span.end);
        let _ = writeln!(
            out,
            "{span:<12} {kind:<8} {label:<9} {}  {:?}",
            link.destination.as_deref().unwrap_or("-"),
            &text[decoration.span.start..decoration.span.end],
        );
    }
    out
}
