use thiserror::Error;

use crate::decoration::DecorationError;
use crate::scanning::url::UrlShapeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Decoration pass failed: {0}")]
    Decoration(#[from] DecorationError),
    #[error("Invalid link options: {0}")]
    Options(#[from] UrlShapeError),
}
