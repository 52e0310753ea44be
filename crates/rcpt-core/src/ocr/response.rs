//! Decoding of OCR service responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RcptError, Result};

/// One recognized text region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OcrFragment {
    /// Bare text.
    Text(String),
    /// Text with region metadata (bounding box and the like), which is ignored.
    Region {
        text: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, Value>,
    },
}

impl OcrFragment {
    pub fn text(&self) -> &str {
        match self {
            OcrFragment::Text(text) => text,
            OcrFragment::Region { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            OcrFragment::Text(text) => text,
            OcrFragment::Region { text, .. } => text,
        }
    }
}

/// Keys under which wrapped responses carry the fragment list.
const WRAPPER_KEYS: &[&str] = &["extracted_text", "tokens", "text"];

/// Decode an OCR response into ordered text fragments.
///
/// Accepts an array of strings, an array of `{"text": ...}` objects, or an
/// object wrapping such an array under `extracted_text` or `tokens`.
pub fn tokens_from_json(json: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(json)?;
    tokens_from_value(value)
}

/// Decode an already parsed OCR response.
pub fn tokens_from_value(value: Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Err(RcptError::InvalidArgument(
            "token sequence is null".to_string(),
        )),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                if item.is_null() {
                    return Err(RcptError::InvalidArgument(format!("fragment {} is null", i)));
                }
                serde_json::from_value::<OcrFragment>(item)
                    .map(OcrFragment::into_text)
                    .map_err(|_| {
                        RcptError::InvalidArgument(format!("fragment {} has no text", i))
                    })
            })
            .collect(),
        Value::Object(mut obj) => {
            for key in WRAPPER_KEYS {
                if let Some(inner) = obj.remove(*key) {
                    if inner.is_array() {
                        return tokens_from_value(inner);
                    }
                }
            }
            Err(RcptError::InvalidArgument(
                "object does not contain a fragment list".to_string(),
            ))
        }
        other => Err(RcptError::InvalidArgument(format!(
            "expected an array of text fragments, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_array() {
        let tokens = tokens_from_json(r#"["1", "Coffee", "$3.50"]"#).unwrap();
        assert_eq!(tokens, vec!["1", "Coffee", "$3.50"]);
    }

    #[test]
    fn test_region_array() {
        let json = r#"[
            {"text": "HARBOR", "bounding_box": {"x1": 10, "y1": 4, "x2": 80, "y2": 20}},
            {"text": "LANE", "bounding_box": {"x1": 90, "y1": 4, "x2": 140, "y2": 20}}
        ]"#;
        let tokens = tokens_from_json(json).unwrap();
        assert_eq!(tokens, vec!["HARBOR", "LANE"]);
    }

    #[test]
    fn test_wrapped_response() {
        let json = r#"{"success": true, "extracted_text": [{"text": "CAFE"}], "status_code": 200}"#;
        assert_eq!(tokens_from_json(json).unwrap(), vec!["CAFE"]);
    }

    #[test]
    fn test_empty_array() {
        assert!(tokens_from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_null_is_invalid_argument() {
        let err = tokens_from_json("null").unwrap_err();
        assert!(matches!(err, RcptError::InvalidArgument(_)));

        let err = tokens_from_json(r#"["a", null]"#).unwrap_err();
        assert!(matches!(err, RcptError::InvalidArgument(ref msg) if msg.contains("fragment 1")));
    }

    #[test]
    fn test_wrong_shapes() {
        assert!(matches!(
            tokens_from_json("42").unwrap_err(),
            RcptError::InvalidArgument(_)
        ));
        assert!(matches!(
            tokens_from_json(r#"[{"bounding_box": {}}]"#).unwrap_err(),
            RcptError::InvalidArgument(_)
        ));
        assert!(matches!(
            tokens_from_json(r#"{"error": "quota"}"#).unwrap_err(),
            RcptError::InvalidArgument(_)
        ));
        assert!(matches!(tokens_from_json("{").unwrap_err(), RcptError::Json(_)));
    }

    #[test]
    fn test_fragment_text() {
        let fragment: OcrFragment = serde_json::from_str(r#"{"text": "LANE", "score": 0.9}"#).unwrap();
        assert_eq!(fragment.text(), "LANE");
    }
}
