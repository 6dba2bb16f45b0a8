//! Linear one-vs-rest classifier over TF-IDF features.

use crate::{
    domain::{CategoryLabel, CategorySet},
    model::{CategoryClassifier, FeatureVector},
};

/// Scores every class as `coef · x + intercept` and keeps the highest.
///
/// Equal scores resolve to the class listed first in the artifact.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    categories: CategorySet,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    dimension: usize,
}

impl LinearClassifier {
    pub fn new(
        categories: CategorySet,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Result<Self, String> {
        if coef.len() != categories.len() {
            return Err(format!(
                "{} classes but {} coefficient rows",
                categories.len(),
                coef.len()
            ));
        }
        if intercept.len() != categories.len() {
            return Err(format!(
                "{} classes but {} intercepts",
                categories.len(),
                intercept.len()
            ));
        }
        let dimension = coef.first().map(Vec::len).unwrap_or(0);
        if dimension == 0 {
            return Err("coefficient rows are empty".into());
        }
        if let Some((row, _)) = coef
            .iter()
            .enumerate()
            .find(|(_, weights)| weights.len() != dimension)
        {
            return Err(format!(
                "coefficient row {row} does not have {dimension} weights"
            ));
        }
        let all_finite = coef.iter().flatten().chain(&intercept).all(|w| w.is_finite());
        if !all_finite {
            return Err("classifier weights must be finite".into());
        }
        Ok(Self {
            categories,
            coef,
            intercept,
            dimension,
        })
    }

    fn check_dimension(&self, vector: &FeatureVector) {
        assert_eq!(
            vector.dimension(),
            self.dimension,
            "feature vector has {} dimensions but the classifier was built for {}",
            vector.dimension(),
            self.dimension
        );
    }
}

impl CategoryClassifier for LinearClassifier {
    fn categories(&self) -> &CategorySet {
        &self.categories
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn scores(&self, vector: &FeatureVector) -> Vec<(&CategoryLabel, f64)> {
        self.check_dimension(vector);
        self.categories
            .iter()
            .zip(self.coef.iter().zip(&self.intercept))
            .map(|(label, (weights, bias))| (label, vector.dot(weights) + bias))
            .collect()
    }

    fn classify(&self, vector: &FeatureVector) -> CategoryLabel {
        let scores = self.scores(vector);
        let mut best = 0;
        for (index, (_, score)) in scores.iter().enumerate().skip(1) {
            if *score > scores[best].1 {
                best = index;
            }
        }
        scores[best].0.clone()
    }
}
