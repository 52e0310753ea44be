//! Receipt and transaction data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Merchant name used when no plausible name is found.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// A purchased item recovered from the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description (never empty).
    pub description: String,

    /// Price with exactly two fractional digits, always positive.
    pub amount: Decimal,

    /// Quantity marker value. `None` for the fallback item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Position of the price token this item was built from.
    pub price_position: usize,
}

/// Transaction category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Income,
    /// Receipt parser default.
    #[default]
    Food,
    Transport,
    Utilities,
    Entertainment,
    Health,
    Education,
    Clothing,
    Housing,
    Savings,
    Investment,
    Miscellaneous,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 12] = [
        Category::Income,
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Clothing,
        Category::Housing,
        Category::Savings,
        Category::Investment,
        Category::Miscellaneous,
    ];

    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Education => "education",
            Category::Clothing => "clothing",
            Category::Housing => "housing",
            Category::Savings => "savings",
            Category::Investment => "investment",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transaction per line item, sharing the receipt's date and merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub category: Category,

    /// Receipt date, absent when none was recognized.
    pub date: Option<NaiveDate>,

    /// `"{merchant} - {item description}"`.
    pub description: String,

    pub amount: Decimal,
}

impl TransactionRecord {
    /// Receipt date, or `default` when the receipt had none.
    pub fn date_or(&self, default: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(default)
    }
}

/// Everything the parser recovers from one token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub date: Option<NaiveDate>,

    pub merchant: String,

    /// Printed receipt total, informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    pub line_items: Vec<LineItem>,

    pub transactions: Vec<TransactionRecord>,

    /// True when the items came from the largest-price fallback.
    pub used_fallback: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ParsedReceipt {
    /// Receipt with no date, unknown merchant and no items.
    pub fn empty() -> Self {
        Self {
            date: None,
            merchant: UNKNOWN_MERCHANT.to_string(),
            total: None,
            line_items: Vec::new(),
            transactions: Vec::new(),
            used_fallback: false,
            warnings: Vec::new(),
        }
    }

    /// Sum of all transaction amounts.
    pub fn items_total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

impl Default for ParsedReceipt {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str("food"), Some(Category::Food));
        assert_eq!(Category::from_str("  Clothing\n"), Some(Category::Clothing));
        assert_eq!(Category::from_str("MISCELLANEOUS"), Some(Category::Miscellaneous));
        assert_eq!(Category::from_str("groceries"), None);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");

        let parsed: Category = serde_json::from_str("\"investment\"").unwrap();
        assert_eq!(parsed, Category::Investment);
    }

    #[test]
    fn test_date_or() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut record = TransactionRecord {
            category: Category::Food,
            date: None,
            description: "Cafe - Coffee".to_string(),
            amount: Decimal::from_str("3.50").unwrap(),
        };
        assert_eq!(record.date_or(today), today);

        let receipt_date = NaiveDate::from_ymd_opt(2019, 11, 20).unwrap();
        record.date = Some(receipt_date);
        assert_eq!(record.date_or(today), receipt_date);
    }

    #[test]
    fn test_amount_serializes_with_two_decimals() {
        let item = LineItem {
            description: "Coffee".to_string(),
            amount: Decimal::from_str("3.50").unwrap(),
            quantity: Some(1),
            price_position: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["amount"], "3.50");
    }
}
