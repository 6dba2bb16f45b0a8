//! Frozen statistical model: feature extraction and category inference.

pub mod classifier;
pub mod extractor;
pub mod loader;

pub use classifier::LinearClassifier;
pub use extractor::{Norm, TfidfExtractor, TfidfOptions};
pub use loader::{load_categorizer, load_classifier, load_dictionary, load_extractor, ModelPaths};

use crate::{
    domain::{CategoryLabel, CategorySet},
    normalizer::NormalizedText,
};

/// Fixed-length numeric encoding of a normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: vec![0.0; dimension],
        }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.values
            .iter()
            .zip(weights)
            .map(|(value, weight)| value * weight)
            .sum()
    }
}

/// Read-only capability: normalized text to feature vector.
pub trait FeatureExtractor: Send + Sync {
    /// Vector length produced by [`FeatureExtractor::extract`]; constant for the
    /// lifetime of the extractor.
    fn dimension(&self) -> usize;

    fn extract(&self, text: &NormalizedText) -> FeatureVector;
}

/// Read-only capability: feature vector to one label of a closed set.
pub trait CategoryClassifier: Send + Sync {
    fn categories(&self) -> &CategorySet;

    fn dimension(&self) -> usize;

    /// Raw score per label, in model order.
    ///
    /// # Panics
    ///
    /// When `vector` does not have [`CategoryClassifier::dimension`] entries.
    fn scores(&self, vector: &FeatureVector) -> Vec<(&CategoryLabel, f64)>;

    /// Picks the label for `vector`.
    ///
    /// # Panics
    ///
    /// When `vector` does not have [`CategoryClassifier::dimension`] entries.
    fn classify(&self, vector: &FeatureVector) -> CategoryLabel;
}
