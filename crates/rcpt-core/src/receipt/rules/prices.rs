//! Price-position index.

use crate::models::token::Token;

use super::classifier::TokenClassifier;

/// Positions of all price-like tokens, in sequence order.
pub fn price_positions(tokens: &[Token], classifier: &TokenClassifier) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| classifier.is_price(&token.text))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_in_order() {
        let tokens = Token::sequence([
            "1", "Tacos", "$14.98", "1", "Salad", "$12.50", "TOTAL:", "$27.48",
        ]);
        let positions = price_positions(&tokens, TokenClassifier::standard());
        assert_eq!(positions, vec![2, 5, 7]);
    }

    #[test]
    fn test_no_prices() {
        let tokens = Token::sequence(["THANK", "YOU"]);
        assert!(price_positions(&tokens, TokenClassifier::standard()).is_empty());
        assert!(price_positions(&[], TokenClassifier::standard()).is_empty());
    }
}
