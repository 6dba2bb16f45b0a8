//! Normalizer → extractor → classifier, wired once and shared read-only.

use std::{fmt, sync::Arc};

use crate::{
    domain::{CategoryLabel, CategorySet},
    errors::ModelError,
    model::{CategoryClassifier, FeatureExtractor, FeatureVector},
    normalizer::{NormalizedText, Normalizer},
};

/// The loaded categorization pipeline.
///
/// Cheap to clone; every component is immutable after construction, so a
/// single instance can be shared across threads without locking.
#[derive(Clone)]
pub struct Categorizer {
    normalizer: Normalizer,
    extractor: Arc<dyn FeatureExtractor>,
    classifier: Arc<dyn CategoryClassifier>,
}

impl Categorizer {
    /// Wires the components together, refusing extractor/classifier pairs that
    /// disagree on vector dimensionality.
    pub fn new(
        normalizer: Normalizer,
        extractor: Arc<dyn FeatureExtractor>,
        classifier: Arc<dyn CategoryClassifier>,
    ) -> Result<Self, ModelError> {
        if extractor.dimension() != classifier.dimension() {
            return Err(ModelError::Incompatible(format!(
                "extractor produces {} features but classifier expects {}",
                extractor.dimension(),
                classifier.dimension()
            )));
        }
        Ok(Self {
            normalizer,
            extractor,
            classifier,
        })
    }

    pub fn categories(&self) -> &CategorySet {
        self.classifier.categories()
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        self.normalizer.normalize(text)
    }

    pub fn extract(&self, text: &NormalizedText) -> FeatureVector {
        self.extractor.extract(text)
    }

    pub fn classify(&self, vector: &FeatureVector) -> CategoryLabel {
        self.classifier.classify(vector)
    }

    /// Per-label scores for already-normalized text, in model order.
    pub fn scores(&self, text: &NormalizedText) -> Vec<(&CategoryLabel, f64)> {
        self.classifier.scores(&self.extract(text))
    }

    /// Extracts features from already-normalized text and classifies them.
    pub fn categorize(&self, text: &NormalizedText) -> CategoryLabel {
        self.classify(&self.extract(text))
    }
}

impl fmt::Debug for Categorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Categorizer")
            .field("dimension", &self.extractor.dimension())
            .field("categories", &self.categories().to_string())
            .finish()
    }
}
