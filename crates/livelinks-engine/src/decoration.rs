use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::link::{Link, LinkId};
use crate::registry::LinkRegistry;
use crate::span::Span;

/// Attribute and class names shared with the rendering layer.
pub struct Attr;

impl Attr {
    /// Binds a rendered mark to its link identifier.
    pub const UID: &'static str = "data-link-uid";
    /// Set on elements once their pointer handlers are attached.
    pub const DONE: &'static str = "data-link-done";
    /// Raw destination on links rendered by other subsystems.
    pub const HREF: &'static str = "data-href";
    pub const LABEL: &'static str = "aria-label";
    pub const LABEL_POSITION: &'static str = "aria-label-position";
    /// Class marking an externally rendered link as internal.
    pub const INTERNAL_CLASS: &'static str = "internal-link";
}

/// Where the hover label of a named external link is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl LabelPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelPosition::Top => "top",
            LabelPosition::Bottom => "bottom",
            LabelPosition::Left => "left",
            LabelPosition::Right => "right",
        }
    }
}

impl fmt::Display for LabelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown label position: {0}")]
pub struct ParseLabelPositionError(String);

impl FromStr for LabelPosition {
    type Err = ParseLabelPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(LabelPosition::Top),
            "bottom" => Ok(LabelPosition::Bottom),
            "left" => Ok(LabelPosition::Left),
            "right" => Ok(LabelPosition::Right),
            _ => Err(ParseLabelPositionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverLabel {
    pub text: String,
    pub position: LabelPosition,
}

/// One decorated interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub span: Span,
    pub link: LinkId,
    pub label: Option<HoverLabel>,
}

impl Decoration {
    /// Attribute pairs the rendering layer puts on the mark element.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![(Attr::UID, self.link.to_string())];
        if let Some(label) = &self.label {
            attrs.push((Attr::LABEL, label.text.clone()));
            attrs.push((Attr::LABEL_POSITION, label.position.to_string()));
        }
        attrs
    }
}

/// Decorations in strictly increasing, non-overlapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecorationSet {
    marks: Vec<Decoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.marks.iter()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The mark covering `offset`, if any.
    pub fn at(&self, offset: usize) -> Option<&Decoration> {
        let idx = self.marks.partition_point(|mark| mark.span.end <= offset);
        self.marks
            .get(idx)
            .filter(|mark| mark.span.start <= offset)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecorationError {
    #[error(
        "Link {next} at {}..{} overlaps link {previous} at {}..{}",
        .next_span.start, .next_span.end, .previous_span.start, .previous_span.end
    )]
    Overlap {
        previous: LinkId,
        previous_span: Span,
        next: LinkId,
        next_span: Span,
    },
}

/// Appends marks in order, refusing any mark that starts before the end of
/// the previous one.
#[derive(Debug, Default)]
pub struct DecorationBuilder {
    marks: Vec<Decoration>,
    label_position: LabelPosition,
}

impl DecorationBuilder {
    pub fn new(label_position: LabelPosition) -> Self {
        Self {
            marks: Vec::new(),
            label_position,
        }
    }

    pub fn add(&mut self, link: &Link) -> Result<(), DecorationError> {
        let Some(span) = link.span else {
            return Ok(());
        };

        if let Some(prev) = self.marks.last()
            && span.start < prev.span.end
        {
            return Err(DecorationError::Overlap {
                previous: prev.link.clone(),
                previous_span: prev.span,
                next: link.id.clone(),
                next_span: span,
            });
        }

        let label = match (&link.destination, link.shows_label()) {
            (Some(destination), true) => Some(HoverLabel {
                text: destination.clone(),
                position: self.label_position,
            }),
            _ => None,
        };
        self.marks.push(Decoration {
            span,
            link: link.id.clone(),
            label,
        });
        Ok(())
    }

    pub fn finish(self) -> DecorationSet {
        DecorationSet { marks: self.marks }
    }
}

/// Builds the decoration set for a fully populated registry.
pub fn build_decorations(
    registry: &LinkRegistry,
    label_position: LabelPosition,
) -> Result<DecorationSet, DecorationError> {
    let mut builder = DecorationBuilder::new(label_position);
    for link in registry.sorted_by_start() {
        if let Err(e) = builder.add(link) {
            log::error!("{e}");
            return Err(e);
        }
    }
    Ok(builder.finish())
}
