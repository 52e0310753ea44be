//! Transaction category prediction.
//!
//! The parser labels everything with its configured default category.
//! A [`CategoryPredictor`] refines records afterwards; remote classifiers
//! implement the trait outside this crate.

use tracing::debug;

use crate::models::config::{CategoryConfig, CategoryRule};
use crate::models::receipt::{Category, TransactionRecord};

/// Predicts a category from a transaction description.
pub trait CategoryPredictor {
    /// `None` when the predictor has no answer.
    fn predict(&self, description: &str) -> Option<Category>;
}

/// Case-insensitive keyword rules, first matching rule wins.
#[derive(Debug, Clone)]
pub struct KeywordCategoryPredictor {
    rules: Vec<CategoryRule>,
}

impl KeywordCategoryPredictor {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                category: rule.category,
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(config.rules.clone())
    }
}

impl Default for KeywordCategoryPredictor {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}

impl CategoryPredictor for KeywordCategoryPredictor {
    fn predict(&self, description: &str) -> Option<Category> {
        let description = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| description.contains(k.as_str())))
            .map(|rule| rule.category)
    }
}

/// Re-label records with the predictor's answer, or `fallback` when it has none.
pub fn categorize(
    records: &mut [TransactionRecord],
    predictor: &dyn CategoryPredictor,
    fallback: Category,
) {
    for record in records.iter_mut() {
        let category = predictor.predict(&record.description).unwrap_or(fallback);
        debug!("Category {} for {:?}", category, record.description);
        record.category = category;
    }
}
