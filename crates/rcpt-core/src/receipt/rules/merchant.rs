//! Merchant name extraction from the receipt header.

use tracing::trace;

use crate::models::config::ParserConfig;
use crate::models::token::Token;

use super::patterns::MERCHANT_SKIP;

/// Collects the first plausible name tokens at the top of a receipt.
#[derive(Debug, Clone)]
pub struct MerchantExtractor {
    window: usize,
    max_parts: usize,
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self::from_config(&ParserConfig::default())
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            window: config.merchant_window,
            max_parts: config.merchant_max_parts,
        }
    }

    /// Merchant name, or `None` when no leading token qualifies.
    pub fn extract(&self, tokens: &[Token]) -> Option<String> {
        let parts: Vec<&str> = tokens
            .iter()
            .take(self.window)
            .map(|t| t.text.as_str())
            .filter(|text| is_name_part(text))
            .take(self.max_parts)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_name_part(text: &str) -> bool {
    let upper = text.to_uppercase();
    if MERCHANT_SKIP.iter().any(|p| p.is_match(&upper)) {
        trace!("Skipping header token {:?}", text);
        return false;
    }

    text.trim().chars().count() >= 2
}

/// Merchant name with default settings, `unknown` when none is found.
pub fn extract_merchant(tokens: &[Token], unknown: &str) -> String {
    MerchantExtractor::new()
        .extract(tokens)
        .unwrap_or_else(|| unknown.to_string())
}
