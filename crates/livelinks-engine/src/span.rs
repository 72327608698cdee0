use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the document.
///
/// Links, tokens and decorations all store spans rather than copied
/// positions so that every stage agrees on the same half-open convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `offset` lies in the closed interval `[start, end]`.
    ///
    /// A caret sitting directly after the last byte still touches the span.
    #[must_use]
    pub fn contains_inclusive(self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Returns true if the two half-open spans share at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One range of the active selection, as reported by the host.
///
/// `from` and `to` are kept as given; a collapsed range is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// A zero-width selection at `at`.
    pub const fn caret(at: usize) -> Self {
        Self { from: at, to: at }
    }

    /// Returns `true` if the selection is empty (zero-width).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_inclusive_accepts_both_ends() {
        let span = Span::new(10, 20);
        assert!(span.contains_inclusive(10));
        assert!(span.contains_inclusive(15));
        assert!(span.contains_inclusive(20));
        assert!(!span.contains_inclusive(9));
        assert!(!span.contains_inclusive(21));
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        assert!(!Span::new(0, 5).overlaps(Span::new(5, 9)));
        assert!(Span::new(0, 6).overlaps(Span::new(5, 9)));
        assert!(Span::new(3, 4).overlaps(Span::new(0, 9)));
    }

    #[test]
    fn len_saturates_on_inverted_span() {
        let span = Span::new(7, 3);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn caret_is_empty_selection() {
        assert!(SelectionRange::caret(4).is_empty());
        assert!(!SelectionRange::new(4, 6).is_empty());
    }
}
