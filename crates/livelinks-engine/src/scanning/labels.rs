/// Token labels the scanner understands, owned in one place.
///
/// Hosts report a space separated class string per token; these are the
/// words the scanner and assembler look for in it.
pub struct Labels;

impl Labels {
    /// Link display text.
    pub const LINK: &'static str = "link";
    /// A link destination or a bare url.
    pub const URL: &'static str = "url";
    /// Punctuation and syntax markers. Matched as a substring of the class
    /// string, so `formatting-link` counts too.
    pub const FORMATTING: &'static str = "formatting";
}
