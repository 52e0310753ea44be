//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::receipt::{Category, UNKNOWN_MERCHANT};

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Token heuristics.
    pub parser: ParserConfig,

    /// Keyword rules for local category prediction.
    pub categories: CategoryConfig,

    /// Image intake limits and post-processing.
    pub pipeline: PipelineConfig,
}

/// Heuristic constants used by the receipt parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Tokens scanned backwards from a price for a quantity marker.
    pub quantity_window: usize,

    /// Exact token texts accepted as quantity markers.
    pub quantity_markers: Vec<String>,

    /// Tokens scanned backwards from the largest price in the fallback pass.
    pub fallback_window: usize,

    /// Words kept from the end of the fallback window.
    pub fallback_max_words: usize,

    /// Description used when the fallback window has no usable words.
    pub fallback_description: String,

    /// Leading tokens considered for the merchant name.
    pub merchant_window: usize,

    /// Maximum tokens joined into the merchant name.
    pub merchant_max_parts: usize,

    /// Merchant name when nothing plausible is found.
    pub unknown_merchant: String,

    /// Smallest bare numeral accepted as a price.
    pub min_price: u32,

    /// Largest bare numeral accepted as a price.
    pub max_price: u32,

    /// Category assigned to every parsed transaction.
    pub default_category: Category,

    /// Regexes appended to the standard noise catalogue (matched upper-case).
    pub extra_noise_patterns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            quantity_window: 6,
            quantity_markers: ["1", "2", "3", "4", "5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_window: 10,
            fallback_max_words: 3,
            fallback_description: "Purchase".to_string(),
            merchant_window: 11,
            merchant_max_parts: 3,
            unknown_merchant: UNKNOWN_MERCHANT.to_string(),
            min_price: 1,
            max_price: 10_000,
            default_category: Category::Food,
            extra_noise_patterns: Vec::new(),
        }
    }
}

/// A keyword rule for local categorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category assigned on match.
    pub category: Category,

    /// Case-insensitive substrings of the transaction description.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Local category prediction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Rules checked in order, first match wins.
    pub rules: Vec<CategoryRule>,

    /// Category used when no rule matches.
    pub fallback: Category,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    Category::Food,
                    &[
                        "cafe", "coffee", "restaurant", "pizza", "burger", "taco", "salad",
                        "chicken", "grocery", "bakery", "beverage",
                    ],
                ),
                CategoryRule::new(
                    Category::Transport,
                    &["uber", "lyft", "taxi", "fuel", "gas station", "parking", "metro"],
                ),
                CategoryRule::new(
                    Category::Health,
                    &["pharmacy", "clinic", "hospital", "dental", "medical"],
                ),
                CategoryRule::new(
                    Category::Clothing,
                    &["apparel", "shoes", "shirt", "jeans", "fashion"],
                ),
                CategoryRule::new(
                    Category::Entertainment,
                    &["cinema", "movie", "theater", "concert", "tickets"],
                ),
                CategoryRule::new(
                    Category::Utilities,
                    &["electric", "water bill", "internet", "mobile recharge"],
                ),
                CategoryRule::new(
                    Category::Education,
                    &["books", "tuition", "course", "stationery"],
                ),
            ],
            fallback: Category::Miscellaneous,
        }
    }
}

/// Image intake configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Largest accepted image upload in bytes.
    pub max_image_bytes: usize,

    /// Run category prediction after parsing.
    pub categorize: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
            categorize: false,
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Default location of the configuration file under `config_root`.
    pub fn path_in(config_root: &std::path::Path) -> PathBuf {
        config_root.join("rcpt").join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parser_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.quantity_window, 6);
        assert_eq!(config.quantity_markers, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(config.fallback_window, 10);
        assert_eq!(config.merchant_window, 11);
        assert_eq!(config.unknown_merchant, "Unknown Merchant");
        assert_eq!(config.default_category, Category::Food);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "parser": { "quantity_window": 4 } }"#;
        let config: RcptConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.parser.quantity_window, 4);
        assert_eq!(config.parser.fallback_window, 10);
        assert_eq!(config.pipeline.max_image_bytes, 5 * 1024 * 1024);
        assert!(!config.categories.rules.is_empty());
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let dir = std::env::temp_dir().join(format!("rcpt-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let mut config = RcptConfig::default();
        config.parser.extra_noise_patterns = vec!["LOYALTY".to_string()];
        config.pipeline.categorize = true;
        config.save(&path).unwrap();

        let loaded = RcptConfig::from_file(&path).unwrap();
        assert_eq!(loaded.parser, config.parser);
        assert_eq!(loaded.pipeline, config.pipeline);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_path_in() {
        let path = RcptConfig::path_in(std::path::Path::new("/home/user/.config"));
        assert_eq!(path, PathBuf::from("/home/user/.config/rcpt/config.json"));
    }
}
