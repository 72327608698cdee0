use std::borrow::Cow;

/// Caret and focus control over the host editor.
pub trait EditorFocus {
    /// Full document text.
    fn text(&self) -> Cow<'_, str>;
    /// Collapses the selection to `offset` without scrolling.
    fn place_cursor(&mut self, offset: usize);
    fn blur(&mut self);
}

/// Start offset of the first empty line, if the document has one.
pub fn first_empty_line(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split('\n') {
        if line.is_empty() || line == "\r" {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}

/// Moves the caret out of rendered markup and blurs the editor.
///
/// An empty line is the one place where the caret does not expand any
/// markup. Without one the caret stays where it is.
pub fn park_caret<F: EditorFocus + ?Sized>(focus: &mut F) {
    let target = first_empty_line(&focus.text());
    if let Some(offset) = target {
        focus.place_cursor(offset);
    }
    focus.blur();
}
