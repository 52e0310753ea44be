//! Rule-based extractors for receipt token streams.

pub mod classifier;
pub mod dates;
pub mod line_items;
pub mod merchant;
pub mod patterns;
pub mod prices;
pub mod totals;

pub use classifier::{
    is_noise, is_price, parse_amount, NoiseCatalogue, TokenClassifier,
};
pub use dates::{extract_receipt_date, DateExtractor};
pub use line_items::{extract_line_items, LineItemExtractor, LineItems};
pub use merchant::{extract_merchant, MerchantExtractor};
pub use prices::price_positions;
pub use totals::extract_total;

/// Trait for single-token field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from a token's text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
