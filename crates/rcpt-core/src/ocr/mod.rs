//! OCR collaborator interface.
//!
//! Text recognition itself happens outside this crate. An [`OcrProvider`]
//! turns image bytes into ordered text fragments; [`tokens_from_json`]
//! decodes a response already fetched from an OCR service.

mod response;

pub use response::{tokens_from_json, tokens_from_value, OcrFragment};

use crate::error::OcrError;

/// Anything that can turn an image into ordered text fragments.
pub trait OcrProvider {
    /// Recognize text regions in reading order, one fragment per region.
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError>;
}

impl<F> OcrProvider for F
where
    F: Fn(&[u8]) -> Result<Vec<String>, OcrError>,
{
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        self(image)
    }
}
