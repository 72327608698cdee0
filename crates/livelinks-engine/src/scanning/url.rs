use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Schemes recognised when no configuration says otherwise.
pub const DEFAULT_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Error)]
pub enum UrlShapeError {
    #[error("at least one url scheme is required")]
    NoSchemes,
    #[error("invalid url scheme pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Decides whether a url token's text is an absolute url: one of the
/// recognised schemes followed by `://`, at the very start of the text.
#[derive(Debug, Clone)]
pub struct UrlShape {
    pattern: Regex,
}

impl UrlShape {
    pub fn new<S: AsRef<str>>(schemes: &[S]) -> Result<Self, UrlShapeError> {
        let alternatives: Vec<String> = schemes
            .iter()
            .map(|scheme| scheme.as_ref().trim())
            .filter(|scheme| !scheme.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Err(UrlShapeError::NoSchemes);
        }

        let pattern = Regex::new(&format!("^(?:{})://", alternatives.join("|")))?;
        Ok(Self { pattern })
    }

    pub fn is_absolute(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for UrlShape {
    fn default() -> Self {
        static DEFAULT_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = DEFAULT_PATTERN
            .get_or_init(|| Regex::new(r"^(?:http|https)://").expect("Invalid default url regex"));
        Self {
            pattern: pattern.clone(),
        }
    }
}
