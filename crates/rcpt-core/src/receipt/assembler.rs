//! Transaction assembly.

use chrono::NaiveDate;

use crate::models::receipt::{Category, LineItem, TransactionRecord};

/// One transaction per line item, in item order.
pub fn assemble(
    date: Option<NaiveDate>,
    merchant: &str,
    items: &[LineItem],
    category: Category,
) -> Vec<TransactionRecord> {
    items
        .iter()
        .map(|item| TransactionRecord {
            category,
            date,
            description: format!("{} - {}", merchant, item.description),
            amount: item.amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn item(description: &str, amount: &str, position: usize) -> LineItem {
        LineItem {
            description: description.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            quantity: Some(1),
            price_position: position,
        }
    }

    #[test]
    fn test_one_record_per_item() {
        let date = NaiveDate::from_ymd_opt(2019, 11, 20);
        let items = vec![item("Coffee", "3.50", 2), item("Coffee", "3.50", 5)];

        let records = assemble(date, "HARBOR LANE CAFE", &items, Category::Food);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            TransactionRecord {
                category: Category::Food,
                date,
                description: "HARBOR LANE CAFE - Coffee".to_string(),
                amount: Decimal::from_str("3.50").unwrap(),
            }
        );
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_empty_items() {
        assert!(assemble(None, "Unknown Merchant", &[], Category::Food).is_empty());
    }
}
