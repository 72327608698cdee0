use std::fmt;

use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::link::{IdGenerator, Link};
use crate::span::Span;

/// Identity of a document inside the notes folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(RelativePathBuf);

impl DocumentId {
    pub fn new(path: impl AsRef<RelativePath>) -> Self {
        Self(path.as_ref().to_relative_path_buf())
    }

    pub fn as_path(&self) -> &RelativePath {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self(RelativePathBuf::from(path))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A precomputed internal reference: where it sits and what it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub destination: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Document not indexed: {0}")]
    NotIndexed(DocumentId),
    #[error("Index lookup failed: {0}")]
    Lookup(String),
}

/// The host's table of internal links per document.
pub trait CrossRefIndex {
    fn references(&self, document: &DocumentId) -> Result<Vec<Reference>, IndexError>;
}

/// Converts the indexed references of `document` into `Internal` links.
///
/// Lookup failures mean "no internal links" for this pass and are never
/// propagated.
pub fn import_references(
    index: &dyn CrossRefIndex,
    document: &DocumentId,
    ids: &mut dyn IdGenerator,
) -> Vec<Link> {
    let references = match index.references(document) {
        Ok(references) => references,
        Err(e) => {
            log::debug!("no cross references for {document}: {e}");
            return Vec::new();
        }
    };

    references
        .into_iter()
        .filter_map(|reference| {
            if reference.start >= reference.end {
                log::warn!(
                    "skipping empty reference to {} at {}..{} in {document}",
                    reference.destination,
                    reference.start,
                    reference.end
                );
                return None;
            }
            let span = Span::new(reference.start, reference.end);
            Some(Link::internal(ids.next_id(), span, reference.destination))
        })
        .collect()
}
