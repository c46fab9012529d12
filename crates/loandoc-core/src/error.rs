//! Error types for the loandoc-core library.

use thiserror::Error;

use crate::extract::vocabulary::Field;

/// Main error type for the loandoc library.
#[derive(Error, Debug)]
pub enum LoanDocError {
    /// Extraction setup error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON (configuration or serialized source document).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while building an extractor from a vocabulary.
///
/// Extraction over a document never fails; these only surface when a
/// keyword table or value pattern supplied by configuration is unusable.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A label or value pattern did not compile.
    #[error("invalid pattern for {field}: {reason}")]
    InvalidPattern { field: Field, reason: String },

    /// A field was given an empty keyword list.
    #[error("no keywords configured for {0}")]
    EmptyKeywords(Field),
}

/// Result type for the loandoc library.
pub type Result<T> = std::result::Result<T, LoanDocError>;
