//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// The caller broke the input contract (missing or malformed token sequence).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by an OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The image payload was empty.
    #[error("image is empty")]
    EmptyImage,

    /// The image exceeds the accepted upload size.
    #[error("image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },

    /// The OCR service could not be reached or refused the request.
    #[error("OCR request failed: {0}")]
    Request(String),

    /// The OCR service answered with something that is not a token list.
    #[error("invalid OCR response: {0}")]
    InvalidResponse(String),
}

/// Errors related to receipt extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No transaction could be built from the receipt.
    #[error("no transactions found on receipt")]
    NoTransactions,

    /// A configured pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
