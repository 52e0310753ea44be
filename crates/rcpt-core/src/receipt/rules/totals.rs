//! Printed receipt total.

use rust_decimal::Decimal;

use crate::models::token::Token;

use super::classifier::{decimal_from_numeral, parse_amount, to_cents};
use super::patterns::TOTAL_INLINE;

/// Total printed on the receipt.
///
/// Prefers a `TOTAL:` label token followed by an amount token, then a
/// `TOTAL` label anywhere in the joined token text.
pub fn extract_total(tokens: &[Token]) -> Option<Decimal> {
    for pair in tokens.windows(2) {
        if pair[0].text.to_uppercase() == "TOTAL:" {
            if let Some(amount) = parse_amount(&pair[1].text).filter(|a| !a.is_zero()) {
                return Some(amount);
            }
        }
    }

    let full_text = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    TOTAL_INLINE
        .captures(&full_text)
        .and_then(|caps| decimal_from_numeral(&caps[1]))
        .and_then(to_cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_labeled_total() {
        let tokens = Token::sequence([
            "SUBTOTAL:", "$29.47", "TAX:", "$1.92", "TOTAL:", "$31.39", "TIP:", "TOTAL:",
        ]);
        assert_eq!(extract_total(&tokens), Some(dec("31.39")));
    }

    #[test]
    fn test_inline_total() {
        let tokens = Token::sequence(["Grand", "Total", "450"]);
        assert_eq!(extract_total(&tokens), Some(dec("450.00")));
    }

    #[test]
    fn test_no_total() {
        let tokens = Token::sequence(["1", "Coffee", "$3.50"]);
        assert_eq!(extract_total(&tokens), None);
        assert_eq!(extract_total(&[]), None);
    }
}
