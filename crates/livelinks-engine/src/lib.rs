/*!
 * # livelinks engine
 *
 * Recognises link-like regions of a rendered markdown document, turns them
 * into decorated intervals, and decides per pointer event whether a click on
 * a link navigates or just places the cursor.
 *
 * ## Pass pipeline
 *
 * One pass runs synchronously for a view in live mode:
 *
 * 1. **`crossref`** imports precomputed internal references as `Internal` links
 * 2. **`scanning`** classifies the host's tokens over the visible ranges and
 *    the assembler merges link text and url tokens into `External` links
 * 3. **`registry`** collects both sources, keyed by a per-pass identifier
 * 4. **`decoration`** sorts the links and emits non-overlapping marks
 *
 * The registry and decoration set are frozen into a [`PassSnapshot`] that the
 * **`interaction`** tracker resolves rendered elements against.
 *
 * ## Host ports
 *
 * The engine never parses markdown and never touches a real UI. Everything it
 * needs from the host comes through traits: [`SyntaxSource`],
 * [`CrossRefIndex`], [`RenderedDocument`], [`Navigator`],
 * [`PointerAffordancePort`], [`EditorFocus`] and [`ModeSwitchButton`].
 * [`LinkView`] ties them together for one editor view.
 */

pub mod crossref;
pub mod decoration;
pub mod error;
pub mod focus;
pub mod interaction;
pub mod link;
pub mod registry;
pub mod scanning;
pub mod span;
pub mod view;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use crossref::{CrossRefIndex, DocumentId, IndexError, Reference};
pub use decoration::{Decoration, DecorationError, DecorationSet, LabelPosition};
pub use error::EngineError;
pub use focus::{EditorFocus, park_caret};
pub use interaction::{
    Affordance, ClickOutcome, InteractionTracker, LinkElement, Navigator,
    PointerAffordancePort, RenderedDocument,
};
pub use link::{IdGenerator, Link, LinkId, LinkKind, SequentialIds, UuidIds};
pub use registry::LinkRegistry;
pub use scanning::{RawToken, SyntaxSource, Token, UrlShape};
pub use span::{SelectionRange, Span};
pub use view::{
    EngineOptions, LinkView, ModeSwitchButton, PassInput, PassSnapshot, ViewState, ViewUpdate,
};
