//! Receipt parser combining the token rules into one pass.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ParserConfig;
use crate::models::receipt::ParsedReceipt;
use crate::models::token::Token;

use super::assembler::assemble;
use super::rules::{
    dates::extract_receipt_date,
    line_items::{LineItemExtractor, LineItems},
    merchant::MerchantExtractor,
    prices::price_positions,
    totals::extract_total,
    TokenClassifier,
};
use super::{ReceiptExtractor, Result};

/// Rule-based receipt parser.
///
/// Parsing never fails: ambiguous or missing fields are reported as
/// warnings on the [`ParsedReceipt`].
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    classifier: TokenClassifier,
    config: ParserConfig,
}

impl ReceiptParser {
    /// Create a parser with the standard tables and default settings.
    pub fn new() -> Self {
        Self {
            classifier: TokenClassifier::new(),
            config: ParserConfig::default(),
        }
    }

    /// Create a parser from configuration. Fails only on invalid extra
    /// noise patterns.
    pub fn from_config(config: ParserConfig) -> Result<Self> {
        let classifier = TokenClassifier::from_config(&config)?;
        Ok(Self { classifier, config })
    }

    /// Swap the token classifier, e.g. for a different receipt format.
    pub fn with_classifier(mut self, classifier: TokenClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &TokenClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an ordered list of OCR text fragments.
    pub fn parse<S: AsRef<str>>(&self, texts: &[S]) -> ParsedReceipt {
        let tokens = Token::sequence(texts.iter().map(|t| t.as_ref()));
        self.parse_tokens(&tokens)
    }

    /// Parse a token sequence.
    pub fn parse_tokens(&self, tokens: &[Token]) -> ParsedReceipt {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing receipt from {} tokens", tokens.len());

        let date = extract_receipt_date(tokens);
        if date.is_none() {
            warnings.push("Could not extract receipt date".to_string());
        }

        let merchant = match MerchantExtractor::from_config(&self.config).extract(tokens) {
            Some(name) => name,
            None => {
                warnings.push("Could not extract merchant name".to_string());
                self.config.unknown_merchant.clone()
            }
        };

        let positions = price_positions(tokens, &self.classifier);
        debug!("Found {} price tokens at {:?}", positions.len(), positions);
        if positions.is_empty() {
            warnings.push("No price tokens found".to_string());
        }

        let LineItems {
            items,
            used_fallback,
        } = LineItemExtractor::new(&self.classifier, &self.config).extract(tokens, &positions);

        if used_fallback {
            warnings.push("No itemized lines found, used largest price".to_string());
        } else if items.is_empty() && !positions.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        let total = extract_total(tokens);
        let transactions = assemble(date, &merchant, &items, self.config.default_category);

        debug!(
            "Extracted {} line items for {:?} in {:?}",
            items.len(),
            merchant,
            start.elapsed()
        );

        ParsedReceipt {
            date,
            merchant,
            total,
            line_items: items,
            transactions,
            used_fallback,
            warnings,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract_from_tokens(&self, tokens: &[Token]) -> ParsedReceipt {
        self.parse_tokens(tokens)
    }

    fn extract_from_lines(&self, text: &str) -> ParsedReceipt {
        let texts: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        self.parse(&texts)
    }
}
