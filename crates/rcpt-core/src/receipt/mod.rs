//! Receipt field extraction module.

mod assembler;
mod parser;
pub mod rules;

pub use assembler::assemble;
pub use parser::ReceiptParser;

use crate::error::ExtractionError;
use crate::models::receipt::ParsedReceipt;
use crate::models::token::Token;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for receipt extractors.
pub trait ReceiptExtractor {
    /// Extract receipt data from an OCR token sequence.
    fn extract_from_tokens(&self, tokens: &[Token]) -> ParsedReceipt;

    /// Extract receipt data from plain text, one token per non-blank line.
    fn extract_from_lines(&self, text: &str) -> ParsedReceipt;
}
