/// Byte cursor over a slice of the document, reporting absolute offsets.
#[derive(Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    /// Document offset of `text[0]`.
    base: usize,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, base: usize) -> Self {
        Self { text, base, i: 0 }
    }

    /// Absolute offset of the next byte.
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.text.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.i).copied()
    }

    pub fn at(&self, pat: &[u8]) -> bool {
        self.text.as_bytes()[self.i.min(self.text.len())..].starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.text.len());
    }

    /// Advances until `stop` matches or a newline is reached.
    ///
    /// Returns false if the line ended first; the cursor is then on the
    /// newline (or at the end).
    pub fn skip_to(&mut self, stop: impl Fn(&Self) -> bool) -> bool {
        while !self.eof() {
            if stop(self) {
                return true;
            }
            if self.peek() == Some(b'\n') {
                return false;
            }
            self.bump();
        }
        false
    }

    /// Text between two absolute offsets previously reported by [`pos`](Self::pos).
    pub fn text_between(&self, start: usize, end: usize) -> &'a str {
        &self.text[start - self.base..end - self.base]
    }
}
