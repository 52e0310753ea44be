//! OCR token model.

use serde::{Deserialize, Serialize};

/// One OCR-recovered text fragment and its position in the sequence.
///
/// Position is the only ordering key. Every positional heuristic in the
/// parser assumes `tokens[i].position == i`, so sequences are built with
/// [`Token::sequence`] and never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Raw text as recognized.
    pub text: String,

    /// Zero-based index in the OCR output.
    pub position: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Build a token sequence from ordered texts, numbering them from zero.
    pub fn sequence<I, S>(texts: I) -> Vec<Token>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| Token::new(text, position))
            .collect()
    }
}

/// Label derived from a token's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLabel {
    /// Monetary amount.
    Price,
    /// Leading item count such as "1".
    QuantityMarker,
    /// Receipt boilerplate (codes, totals labels, contact info).
    Noise,
    /// Anything else.
    Plain,
}

impl TokenLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenLabel::Price => "price",
            TokenLabel::QuantityMarker => "quantity_marker",
            TokenLabel::Noise => "noise",
            TokenLabel::Plain => "plain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_positions() {
        let tokens = Token::sequence(["1", "Coffee", "$3.50"]);

        assert_eq!(tokens.len(), 3);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
        }
        assert_eq!(tokens[1].text, "Coffee");
    }

    #[test]
    fn test_label_names_match_serialized_form() {
        for label in [
            TokenLabel::Price,
            TokenLabel::QuantityMarker,
            TokenLabel::Noise,
            TokenLabel::Plain,
        ] {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }

    #[test]
    fn test_empty_sequence() {
        let tokens = Token::sequence(Vec::<String>::new());
        assert!(tokens.is_empty());
    }
}
