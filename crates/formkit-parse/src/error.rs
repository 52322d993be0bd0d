//! Error types for the PDF backend layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`FormError`].

use formkit_core::FormError;
use thiserror::Error;

/// Error type for PDF backend operations.
///
/// Wraps backend-specific errors and provides conversion to [`FormError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] FormError),
}

impl From<BackendError> for FormError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => FormError::ParseError(msg),
            BackendError::Io(e) => FormError::IoError(e.to_string()),
            BackendError::Core(e) => e,
        }
    }
}
