//! Token classification: prices, quantity markers and boilerplate noise.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ExtractionError;
use crate::models::config::ParserConfig;
use crate::models::token::{Token, TokenLabel};

use super::patterns::{PRICE_BARE, PRICE_WITH_CURRENCY, STANDARD_NOISE};

lazy_static! {
    static ref STANDARD: TokenClassifier = TokenClassifier::new();
}

/// Ordered set of boilerplate regexes.
#[derive(Debug, Clone)]
pub struct NoiseCatalogue {
    patterns: Vec<Regex>,
}

impl NoiseCatalogue {
    /// The built-in catalogue.
    pub fn standard() -> Self {
        Self {
            patterns: STANDARD_NOISE.clone(),
        }
    }

    /// Append extra patterns. They are matched against upper-cased text.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
            self.patterns.push(regex);
        }
        Ok(self)
    }

    pub fn is_match(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.patterns.iter().any(|p| p.is_match(&upper))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for NoiseCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stateless predicate table for single tokens.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    noise: NoiseCatalogue,
    min_price: Decimal,
    max_price: Decimal,
    quantity_markers: Vec<String>,
}

impl TokenClassifier {
    /// Classifier with the standard catalogue and default limits.
    pub fn new() -> Self {
        let defaults = ParserConfig::default();
        Self {
            noise: NoiseCatalogue::standard(),
            min_price: Decimal::from(defaults.min_price),
            max_price: Decimal::from(defaults.max_price),
            quantity_markers: defaults.quantity_markers,
        }
    }

    /// Shared instance of [`TokenClassifier::new`].
    pub fn standard() -> &'static TokenClassifier {
        &STANDARD
    }

    /// Build a classifier from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ExtractionError> {
        let noise = NoiseCatalogue::standard().with_patterns(&config.extra_noise_patterns)?;
        Ok(Self {
            noise,
            min_price: Decimal::from(config.min_price),
            max_price: Decimal::from(config.max_price),
            quantity_markers: config.quantity_markers.clone(),
        })
    }

    /// Replace the noise catalogue.
    pub fn with_noise(mut self, noise: NoiseCatalogue) -> Self {
        self.noise = noise;
        self
    }

    /// True for `$12.50`-style amounts, or bare numerals of three or more
    /// integer digits whose value lies in the configured price range.
    pub fn is_price(&self, text: &str) -> bool {
        if PRICE_WITH_CURRENCY.is_match(text) {
            return true;
        }

        if PRICE_BARE.is_match(text) {
            return decimal_from_numeral(text)
                .map(|value| value >= self.min_price && value <= self.max_price)
                .unwrap_or(false);
        }

        false
    }

    pub fn is_noise(&self, text: &str) -> bool {
        self.noise.is_match(text)
    }

    pub fn is_quantity_marker(&self, text: &str) -> bool {
        self.quantity_markers.iter().any(|m| m == text)
    }

    /// Derive a token's label. Price wins over quantity marker, which wins
    /// over noise.
    pub fn label(&self, token: &Token) -> TokenLabel {
        let text = token.text.as_str();
        if self.is_price(text) {
            TokenLabel::Price
        } else if self.is_quantity_marker(text) {
            TokenLabel::QuantityMarker
        } else if self.is_noise(text) {
            TokenLabel::Noise
        } else {
            TokenLabel::Plain
        }
    }
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard price test.
pub fn is_price(text: &str) -> bool {
    STANDARD.is_price(text)
}

/// Standard noise test.
pub fn is_noise(text: &str) -> bool {
    STANDARD.is_noise(text)
}

/// Parse a price token into an amount with two fractional digits.
///
/// A single leading `$` is dropped. Bare numerals of three or more characters
/// without a decimal point are whole currency units (`7200` is `7200.00`).
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let amount_text = text.strip_prefix('$').unwrap_or(text);

    let amount = if !amount_text.contains('.') && amount_text.len() >= 3 {
        Decimal::from_str(&format!("{}.00", amount_text)).ok()?
    } else {
        decimal_from_numeral(amount_text)?
    };

    to_cents(amount)
}

/// Parse a plain numeral, tolerating a trailing decimal point (`123.`).
pub(crate) fn decimal_from_numeral(text: &str) -> Option<Decimal> {
    let text = text.strip_suffix('.').unwrap_or(text);
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text).ok()
}

/// Round to two fractional digits and fix the scale at two.
///
/// `None` when the value is too large to carry cents.
pub(crate) fn to_cents(amount: Decimal) -> Option<Decimal> {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    (cents.scale() == 2).then_some(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_currency_prices() {
        assert!(is_price("$14.98"));
        assert!(is_price("$1.99"));
        assert!(is_price("12.50"));
        assert!(is_price("$0.00"));
        assert!(!is_price("$12.5"));
        assert!(!is_price("12,50"));
        assert!(!is_price("Coffee"));
    }

    #[test]
    fn test_bare_prices_respect_range() {
        assert!(is_price("7200"));
        assert!(is_price("750.00"));
        assert!(is_price("10000"));
        assert!(is_price("123."));
        assert!(!is_price("10001"));
        assert!(!is_price("000"));
        assert!(!is_price("99"));
        assert!(!is_price("1"));
    }

    #[test]
    fn test_noise_catalogue() {
        for text in [
            "VISA", "BATCH", "#:01A2A", "SUBTOTAL:", "TAX:", "TOTAL:", "TIP:", "11/20/2019",
            "11:05", "AM", "3483", "CHICAGO,", "IL", "APPROVED", "gst", "Discount", "9876543210",
            "info@cafe", "cafe.com", "Gmail",
        ] {
            assert!(is_noise(text), "{text} should be noise");
        }

        for text in ["Coffee", "Tacos", "Shrimp", "Especial", "Salad", "1", "$14.98"] {
            assert!(!is_noise(text), "{text} should not be noise");
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$3.50"), Some(dec("3.50")));
        assert_eq!(parse_amount("750.00"), Some(dec("750.00")));
        assert_eq!(parse_amount("7200"), Some(dec("7200.00")));
        assert_eq!(parse_amount("123."), Some(dec("123.00")));
        assert_eq!(parse_amount("1234.567"), Some(dec("1234.57")));
        assert_eq!(parse_amount("TIP:"), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_parse_amount_scale_is_two() {
        for text in ["$3.50", "7200", "123.", "1234.567", "$0.99"] {
            let amount = parse_amount(text).unwrap();
            assert_eq!(amount.scale(), 2, "{text}");
        }
        assert_eq!(parse_amount("7200").unwrap().to_string(), "7200.00");
    }

    #[test]
    fn test_parse_amount_rejects_values_without_cents() {
        // Too many digits for a Decimal to keep the fractional part.
        assert!(is_price("$9999999999999999999999999999.00"));
        assert_eq!(parse_amount("$9999999999999999999999999999.00"), None);

        let amount = parse_amount("$12345678901234567890.00").unwrap();
        assert_eq!(amount.scale(), 2);
        assert_eq!(amount.to_string(), "12345678901234567890.00");
    }

    #[test]
    fn test_labels() {
        let classifier = TokenClassifier::new();
        let tokens = Token::sequence(["1", "VISA", "Coffee", "$3.50", "7"]);
        let labels: Vec<TokenLabel> = tokens.iter().map(|t| classifier.label(t)).collect();

        assert_eq!(
            labels,
            vec![
                TokenLabel::QuantityMarker,
                TokenLabel::Noise,
                TokenLabel::Plain,
                TokenLabel::Price,
                TokenLabel::Plain,
            ]
        );
    }

    #[test]
    fn test_from_config_extends_catalogue() {
        let config = ParserConfig {
            extra_noise_patterns: vec!["^LOYALTY".to_string()],
            max_price: 500,
            ..ParserConfig::default()
        };
        let classifier = TokenClassifier::from_config(&config).unwrap();

        assert!(classifier.is_noise("Loyalty"));
        assert!(classifier.is_noise("VISA"));
        assert!(!classifier.is_price("750"));
        assert!(classifier.is_price("$750.00"));
    }

    #[test]
    fn test_from_config_rejects_bad_pattern() {
        let config = ParserConfig {
            extra_noise_patterns: vec!["(".to_string()],
            ..ParserConfig::default()
        };
        let err = TokenClassifier::from_config(&config).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPattern { .. }));
    }
}
