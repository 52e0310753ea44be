//! Common regex patterns for receipt token extraction.
//!
//! Patterns are matched against a single OCR token, not a whole document, so
//! most of them are anchored.

use lazy_static::lazy_static;
use regex::Regex;

/// Boilerplate catalogue, matched against the upper-cased token text.
///
/// Unanchored entries match anywhere in the token.
pub const NOISE_PATTERNS: &[&str] = &[
    // Card terminal codes
    r"^#:",
    r"BATCH",
    r"APPR",
    r"TRACE",
    r"VISA",
    r"\d{4}$",
    r"SALE",
    // Time of day
    r"AM$",
    r"PM$",
    // Summary labels
    r"SUBTOTAL:",
    r"TAX:",
    r"TOTAL:",
    r"TIP:",
    // Date and time fragments
    r"^\d{1,2}/\d{1,2}/\d{4}$",
    r"^\d{1,2}:\d{2}$",
    // Address fragments
    r"^CHICAGO",
    r"^IL$",
    r"BLVD$",
    r"GREEN$",
    r"0AKS$",
    // Footer
    r"APPROVED",
    r"THANK",
    r"CUSTOMER",
    r"COPY",
    // Invoice and tax jargon
    r"INVOICE",
    r"GST",
    r"SGST",
    r"PVT",
    r"LTD",
    r"PHONE",
    r"EMAIL",
    r"PLOT",
    r"DISCOUNT",
    r"TAXABLE",
    r"CASH",
    r"RUPEES",
    r"HUNDRED",
    r"ONLY",
    // Phone and invoice numbers
    r"^\d{5,}$",
    // Email parts
    r"@",
    r"\.COM$",
    r"GMAIL",
];

/// Header markers that never form part of a merchant name, matched at the
/// start of the upper-cased token.
pub const MERCHANT_SKIP_PATTERNS: &[&str] = &[
    r"^\d+$",
    r"^[A-Z]{1,2}$",
    r"^SALE",
    r"^BATCH",
    r"^APPR",
    r"^TRACE",
    r"^VISA",
];

lazy_static! {
    // Prices
    pub static ref PRICE_WITH_CURRENCY: Regex = Regex::new(
        r"^\$?\d+\.\d{2}$"
    ).unwrap();

    pub static ref PRICE_BARE: Regex = Regex::new(
        r"^\d{3,}\.?\d*$"
    ).unwrap();

    // Dates
    pub static ref DATE_MDY_SLASH: Regex = Regex::new(
        r"(\d{1,2})/(\d{1,2})/(\d{4})"
    ).unwrap();

    pub static ref DATE_MDY_DASH: Regex = Regex::new(
        r"(\d{1,2})-(\d{1,2})-(\d{4})"
    ).unwrap();

    pub static ref DATE_YMD_SLASH: Regex = Regex::new(
        r"(\d{4})/(\d{1,2})/(\d{1,2})"
    ).unwrap();

    // Totals in running text
    pub static ref TOTAL_INLINE: Regex = Regex::new(
        r"(?i)TOTAL[:\s]*\$?(\d+\.?\d*)"
    ).unwrap();

    pub static ref STANDARD_NOISE: Vec<Regex> = NOISE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

    pub static ref MERCHANT_SKIP: Vec<Regex> = MERCHANT_SKIP_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile() {
        assert_eq!(STANDARD_NOISE.len(), NOISE_PATTERNS.len());
        assert_eq!(MERCHANT_SKIP.len(), MERCHANT_SKIP_PATTERNS.len());
    }

    #[test]
    fn test_price_patterns() {
        assert!(PRICE_WITH_CURRENCY.is_match("$14.98"));
        assert!(PRICE_WITH_CURRENCY.is_match("12.50"));
        assert!(!PRICE_WITH_CURRENCY.is_match("12.5"));
        assert!(!PRICE_WITH_CURRENCY.is_match("$12"));

        assert!(PRICE_BARE.is_match("7200"));
        assert!(PRICE_BARE.is_match("750.00"));
        assert!(PRICE_BARE.is_match("123."));
        assert!(!PRICE_BARE.is_match("99"));
    }
}
