//! # Token Scanning
//!
//! Turns the host's syntax tree into links, one pass at a time.
//!
//! ## Modules
//!
//! - **`labels`**: the label vocabulary (`link`, `url`, `formatting`)
//! - **`token`**: `SyntaxSource` port, `Token` classification and `scan()`
//! - **`url`**: `UrlShape`, the absolute-url test applied to url tokens
//! - **`assembler`**: `LinkAssembler`, the state machine merging link text
//!   and url tokens into closed links
//!
//! ## Lossy Policy
//!
//! Link text that is never followed by a valid url produces no link at all:
//! interrupted markup gets no decoration rather than a guessed one.

pub mod assembler;
pub mod labels;
pub mod token;
pub mod url;

pub use assembler::LinkAssembler;
pub use labels::Labels;
pub use token::{RawToken, SyntaxSource, Token, scan};
pub use url::UrlShape;
