//! Image-to-transactions pipeline over injected collaborators.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::category::{categorize, CategoryPredictor, KeywordCategoryPredictor};
use crate::error::{ExtractionError, OcrError, RcptError, Result};
use crate::models::config::{PipelineConfig, RcptConfig};
use crate::models::receipt::{Category, ParsedReceipt};
use crate::ocr::OcrProvider;
use crate::receipt::ReceiptParser;

type BoxedOcr = Box<dyn OcrProvider + Send + Sync>;
type BoxedPredictor = Box<dyn CategoryPredictor + Send + Sync>;

/// OCR, parsing and optional categorization in one call.
pub struct ReceiptPipeline {
    parser: ReceiptParser,
    ocr: Option<BoxedOcr>,
    predictor: Option<BoxedPredictor>,
    fallback_category: Category,
    config: PipelineConfig,
}

/// Builder for ReceiptPipeline.
pub struct ReceiptPipelineBuilder {
    parser: ReceiptParser,
    ocr: Option<BoxedOcr>,
    predictor: Option<BoxedPredictor>,
    fallback_category: Category,
    config: PipelineConfig,
}

impl ReceiptPipelineBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            parser: ReceiptParser::new(),
            ocr: None,
            predictor: None,
            fallback_category: Category::Miscellaneous,
            config: PipelineConfig::default(),
        }
    }

    /// Set the receipt parser.
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Set the OCR collaborator.
    pub fn with_ocr(mut self, ocr: impl OcrProvider + Send + Sync + 'static) -> Self {
        self.ocr = Some(Box::new(ocr));
        self
    }

    /// Set the category predictor.
    pub fn with_predictor(
        mut self,
        predictor: impl CategoryPredictor + Send + Sync + 'static,
    ) -> Self {
        self.predictor = Some(Box::new(predictor));
        self
    }

    /// Category used when the predictor has no answer.
    pub fn with_fallback_category(mut self, category: Category) -> Self {
        self.fallback_category = category;
        self
    }

    /// Set configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Parser, limits and keyword predictor from a full configuration.
    pub fn from_config(config: &RcptConfig) -> Result<Self> {
        let parser = ReceiptParser::from_config(config.parser.clone())?;
        let mut builder = Self::new()
            .with_parser(parser)
            .with_config(config.pipeline.clone())
            .with_fallback_category(config.categories.fallback);

        if config.pipeline.categorize {
            builder = builder.with_predictor(KeywordCategoryPredictor::from_config(&config.categories));
        }

        Ok(builder)
    }

    /// Build the pipeline.
    pub fn build(self) -> ReceiptPipeline {
        ReceiptPipeline {
            parser: self.parser,
            ocr: self.ocr,
            predictor: self.predictor,
            fallback_category: self.fallback_category,
            config: self.config,
        }
    }
}

impl Default for ReceiptPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptPipeline {
    /// Create a new builder.
    pub fn builder() -> ReceiptPipelineBuilder {
        ReceiptPipelineBuilder::new()
    }

    pub fn parser(&self) -> &ReceiptParser {
        &self.parser
    }

    /// Recognize, parse and categorize a receipt image.
    pub fn process_image(&self, image: &[u8]) -> Result<ParsedReceipt> {
        let start = Instant::now();

        if image.is_empty() {
            return Err(OcrError::EmptyImage.into());
        }
        if image.len() > self.config.max_image_bytes {
            return Err(RcptError::InvalidArgument(
                OcrError::ImageTooLarge {
                    size: image.len(),
                    limit: self.config.max_image_bytes,
                }
                .to_string(),
            ));
        }

        let ocr = self
            .ocr
            .as_ref()
            .ok_or_else(|| RcptError::Config("no OCR provider configured".to_string()))?;

        info!("Running OCR on {} byte image", image.len());
        let texts = ocr.recognize(image)?;
        debug!("OCR returned {} fragments in {:?}", texts.len(), start.elapsed());

        self.process_tokens(&texts)
    }

    /// Parse and categorize already recognized text fragments.
    pub fn process_tokens<S: AsRef<str>>(&self, texts: &[S]) -> Result<ParsedReceipt> {
        let mut receipt = self.parser.parse(texts);

        if receipt.transactions.is_empty() {
            warn!("No transactions extracted from {} fragments", texts.len());
            return Err(ExtractionError::NoTransactions.into());
        }

        if let Some(predictor) = &self.predictor {
            categorize(
                &mut receipt.transactions,
                predictor.as_ref(),
                self.fallback_category,
            );
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CategoryRule;

    fn stub_ocr(texts: &'static [&'static str]) -> impl OcrProvider + Send + Sync + 'static {
        move |_: &[u8]| -> std::result::Result<Vec<String>, OcrError> {
            Ok(texts.iter().map(|t| t.to_string()).collect())
        }
    }

    #[test]
    fn test_process_image() {
        let pipeline = ReceiptPipeline::builder()
            .with_ocr(stub_ocr(&["CORNER", "CAFE", "1", "Coffee", "$3.50"]))
            .build();

        let receipt = pipeline.process_image(b"jpeg bytes").unwrap();
        assert_eq!(receipt.transactions.len(), 1);
        assert_eq!(receipt.transactions[0].category, Category::Food);
        assert_eq!(receipt.merchant, "CORNER CAFE Coffee");
        assert_eq!(receipt.line_items[0].description, "Coffee");
    }

    #[test]
    fn test_image_size_limit() {
        let pipeline = ReceiptPipeline::builder()
            .with_ocr(stub_ocr(&["1", "Coffee", "$3.50"]))
            .with_config(PipelineConfig {
                max_image_bytes: 4,
                ..PipelineConfig::default()
            })
            .build();

        let err = pipeline.process_image(b"12345").unwrap_err();
        assert!(matches!(err, RcptError::InvalidArgument(_)));
        assert!(pipeline.process_image(b"1234").is_ok());
    }

    #[test]
    fn test_empty_image() {
        let pipeline = ReceiptPipeline::builder()
            .with_ocr(stub_ocr(&[]))
            .build();
        let err = pipeline.process_image(&[]).unwrap_err();
        assert!(matches!(err, RcptError::Ocr(OcrError::EmptyImage)));
    }

    #[test]
    fn test_missing_ocr_provider() {
        let pipeline = ReceiptPipeline::builder().build();
        let err = pipeline.process_image(b"img").unwrap_err();
        assert!(matches!(err, RcptError::Config(_)));
    }

    #[test]
    fn test_ocr_failure_propagates() {
        let pipeline = ReceiptPipeline::builder()
            .with_ocr(|_: &[u8]| -> std::result::Result<Vec<String>, OcrError> {
                Err(OcrError::Request("status 502".to_string()))
            })
            .build();

        let err = pipeline.process_image(b"img").unwrap_err();
        assert!(matches!(err, RcptError::Ocr(OcrError::Request(_))));
    }

    #[test]
    fn test_no_transactions() {
        let pipeline = ReceiptPipeline::builder().build();
        let err = pipeline.process_tokens(&["THANK", "YOU"]).unwrap_err();
        assert!(matches!(
            err,
            RcptError::Extraction(ExtractionError::NoTransactions)
        ));
    }

    #[test]
    fn test_categorization() {
        let mut config = RcptConfig::default();
        config.pipeline.categorize = true;
        config.categories.rules = vec![CategoryRule::new(Category::Clothing, &["jacket"])];

        let pipeline = ReceiptPipelineBuilder::from_config(&config).unwrap().build();
        let receipt = pipeline
            .process_tokens(&[
                "OUTFITTERS", "1", "Leather", "Biker", "Jacket", "Black", "$59.00", "1", "Wool",
                "Hiking", "Socks", "$8.00",
            ])
            .unwrap();

        let categories: Vec<Category> = receipt.transactions.iter().map(|t| t.category).collect();
        assert_eq!(categories, vec![Category::Clothing, Category::Miscellaneous]);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = RcptConfig::default();
        config.parser.extra_noise_patterns = vec!["(".to_string()];
        assert!(ReceiptPipelineBuilder::from_config(&config).is_err());
    }
}
