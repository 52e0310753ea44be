//! Core library for turning receipt OCR output into transactions.
//!
//! This crate provides:
//! - Token classification (prices, quantity markers, noise)
//! - Receipt field extraction (date, merchant, line items, total)
//! - Transaction assembly with optional category prediction
//! - OCR collaborator interface and JSON response decoding

pub mod category;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod receipt;

pub use category::{CategoryPredictor, KeywordCategoryPredictor};
pub use error::{ExtractionError, OcrError, RcptError, Result};
pub use models::config::{ParserConfig, RcptConfig};
pub use models::receipt::{Category, LineItem, ParsedReceipt, TransactionRecord};
pub use models::token::{Token, TokenLabel};
pub use ocr::{tokens_from_json, OcrProvider};
pub use pipeline::{ReceiptPipeline, ReceiptPipelineBuilder};
pub use receipt::rules::TokenClassifier;
pub use receipt::{ReceiptExtractor, ReceiptParser};
