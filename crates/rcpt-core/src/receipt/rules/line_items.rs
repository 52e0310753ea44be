//! Line-item extraction.
//!
//! Each price is paired with the quantity marker found in a short window of
//! tokens before it; the tokens between marker and price form the item
//! description. Receipts without recoverable quantity markers fall back to a
//! single item built from the largest price.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::models::config::ParserConfig;
use crate::models::receipt::LineItem;
use crate::models::token::Token;

use super::classifier::{parse_amount, TokenClassifier};
use super::prices::price_positions;

/// Items recovered from one token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItems {
    pub items: Vec<LineItem>,
    /// True when `items` holds the single largest-price fallback item.
    pub used_fallback: bool,
}

/// Pairs prices with quantity markers and descriptions.
pub struct LineItemExtractor<'a> {
    classifier: &'a TokenClassifier,
    config: &'a ParserConfig,
}

impl<'a> LineItemExtractor<'a> {
    pub fn new(classifier: &'a TokenClassifier, config: &'a ParserConfig) -> Self {
        Self { classifier, config }
    }

    /// Run the structured pass, then the fallback pass if nothing was found.
    pub fn extract(&self, tokens: &[Token], price_positions: &[usize]) -> LineItems {
        let items: Vec<LineItem> = price_positions
            .iter()
            .filter_map(|&p| self.structured_item(tokens, p))
            .collect();

        if !items.is_empty() || price_positions.is_empty() {
            return LineItems {
                items,
                used_fallback: false,
            };
        }

        match self.fallback_item(tokens, price_positions) {
            Some(item) => LineItems {
                items: vec![item],
                used_fallback: true,
            },
            None => LineItems::default(),
        }
    }

    fn structured_item(&self, tokens: &[Token], p: usize) -> Option<LineItem> {
        let amount = positive_amount(&tokens[p].text)?;

        let start = p.saturating_sub(self.config.quantity_window);
        let Some(q) = (start..p).find(|&j| self.classifier.is_quantity_marker(&tokens[j].text))
        else {
            trace!("No quantity marker before price at {}", p);
            return None;
        };

        let description = tokens[q + 1..p]
            .iter()
            .map(|t| t.text.as_str())
            .filter(|text| !self.classifier.is_noise(text))
            .collect::<Vec<_>>()
            .join(" ");

        if description.is_empty() {
            trace!("Empty description between {} and {}", q, p);
            return None;
        }

        debug!("Line item {:?} {} (quantity at {}, price at {})", description, amount, q, p);

        Some(LineItem {
            description,
            amount,
            quantity: tokens[q].text.parse().ok(),
            price_position: tokens[p].position,
        })
    }

    fn fallback_item(&self, tokens: &[Token], price_positions: &[usize]) -> Option<LineItem> {
        let mut largest: Option<(usize, Decimal)> = None;
        for &p in price_positions {
            if let Some(amount) = positive_amount(&tokens[p].text) {
                if largest.map_or(true, |(_, best)| amount > best) {
                    largest = Some((p, amount));
                }
            }
        }
        let (p, amount) = largest?;

        let start = p.saturating_sub(self.config.fallback_window);
        let words: Vec<&str> = tokens[start..p]
            .iter()
            .map(|t| t.text.as_str())
            .filter(|text| self.is_description_word(text))
            .collect();

        let keep_from = words.len().saturating_sub(self.config.fallback_max_words);
        let mut description = words[keep_from..].join(" ");
        if description.is_empty() {
            description = self.config.fallback_description.clone();
        }

        debug!("Fallback item {:?} {} (price at {})", description, amount, p);

        Some(LineItem {
            description,
            amount,
            quantity: None,
            price_position: tokens[p].position,
        })
    }

    /// Words usable in a fallback description: alphabetic, longer than one
    /// character, not noise.
    fn is_description_word(&self, text: &str) -> bool {
        text.chars().count() > 1
            && text.chars().all(char::is_alphabetic)
            && !self.classifier.is_noise(text)
    }
}

/// Extract line items with the standard classifier and default settings.
pub fn extract_line_items(tokens: &[Token]) -> LineItems {
    let classifier = TokenClassifier::standard();
    let config = ParserConfig::default();
    let positions = price_positions(tokens, classifier);
    LineItemExtractor::new(classifier, &config).extract(tokens, &positions)
}

fn positive_amount(text: &str) -> Option<Decimal> {
    parse_amount(text).filter(|amount| *amount > Decimal::ZERO)
}
