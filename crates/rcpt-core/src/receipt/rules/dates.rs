//! Receipt date extraction.

use chrono::NaiveDate;
use regex::Regex;

use crate::models::token::Token;

use super::patterns::{DATE_MDY_DASH, DATE_MDY_SLASH, DATE_YMD_SLASH};
use super::FieldExtractor;

/// Field order of a date pattern's capture groups.
#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    MonthDayYear,
    YearMonthDay,
}

/// Date field extractor for a single token.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Patterns in priority order.
    fn patterns() -> [(&'static Regex, FieldOrder); 3] {
        [
            (&*DATE_MDY_SLASH, FieldOrder::MonthDayYear),
            (&*DATE_MDY_DASH, FieldOrder::MonthDayYear),
            (&*DATE_YMD_SLASH, FieldOrder::YearMonthDay),
        ]
    }

    fn to_date(caps: &regex::Captures<'_>, order: FieldOrder) -> Option<NaiveDate> {
        let (year, month, day) = match order {
            FieldOrder::MonthDayYear => (&caps[3], &caps[1], &caps[2]),
            FieldOrder::YearMonthDay => (&caps[1], &caps[2], &caps[3]),
        };
        let year: i32 = year.parse().ok()?;
        if year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    /// Only the first match of each pattern is considered; an impossible
    /// calendar date falls through to the next pattern.
    fn extract(&self, text: &str) -> Option<NaiveDate> {
        Self::patterns().into_iter().find_map(|(pattern, order)| {
            pattern
                .captures(text)
                .and_then(|caps| Self::to_date(&caps, order))
        })
    }

    fn extract_all(&self, text: &str) -> Vec<NaiveDate> {
        let mut results = Vec::new();
        for (pattern, order) in Self::patterns() {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = Self::to_date(&caps, order) {
                    if !results.contains(&date) {
                        results.push(date);
                    }
                }
            }
        }
        results
    }
}

/// First recognizable date in token order. Later tokens are not inspected.
pub fn extract_receipt_date(tokens: &[Token]) -> Option<NaiveDate> {
    let extractor = DateExtractor::new();
    tokens.iter().find_map(|token| extractor.extract(&token.text))
}
