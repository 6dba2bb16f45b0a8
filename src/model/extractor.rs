//! TF-IDF feature extraction over a frozen vocabulary.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    model::{FeatureExtractor, FeatureVector},
    normalizer::NormalizedText,
};

/// Post-weighting normalization applied to every vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Tokenization and weighting settings fixed when the artifact was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfOptions {
    /// Inclusive range of n-gram lengths looked up in the vocabulary.
    pub ngram_range: (usize, usize),
    /// Tokens shorter than this (in characters) are dropped before n-gramming.
    pub min_token_len: usize,
    /// Use `1 + ln(tf)` instead of raw counts.
    pub sublinear_tf: bool,
    pub norm: Norm,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_token_len: 1,
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }
}

/// Applies frozen term weights; never recomputes them.
#[derive(Debug, Clone)]
pub struct TfidfExtractor {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    options: TfidfOptions,
}

impl TfidfExtractor {
    /// Validates that vocabulary indices are exactly `0..idf.len()` and that
    /// every weight is finite and non-negative.
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        options: TfidfOptions,
    ) -> Result<Self, String> {
        if idf.is_empty() {
            return Err("vocabulary is empty".into());
        }
        if vocabulary.len() != idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                vocabulary.len(),
                idf.len()
            ));
        }
        let mut seen = vec![false; idf.len()];
        for (term, &index) in &vocabulary {
            if term.is_empty() {
                return Err("vocabulary contains an empty term".into());
            }
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("vocabulary index {index} is used twice")),
                None => {
                    return Err(format!(
                        "term `{term}` has index {index}, outside 0..{}",
                        idf.len()
                    ))
                }
            }
        }
        if let Some(weight) = idf.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(format!("idf weight {weight} is not a finite non-negative number"));
        }
        let (min_n, max_n) = options.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram range ({min_n}, {max_n})"));
        }
        Ok(Self {
            vocabulary,
            idf,
            options,
        })
    }

    pub fn options(&self) -> &TfidfOptions {
        &self.options
    }

    /// Every vocabulary term, including n-grams.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    fn term_counts(&self, text: &NormalizedText) -> BTreeMap<usize, u32> {
        let tokens: Vec<&str> = text
            .tokens()
            .filter(|token| token.chars().count() >= self.options.min_token_len)
            .collect();
        let (min_n, max_n) = self.options.ngram_range;
        let mut counts = BTreeMap::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

impl FeatureExtractor for TfidfExtractor {
    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn extract(&self, text: &NormalizedText) -> FeatureVector {
        let mut values = vec![0.0; self.idf.len()];
        if text.is_empty() {
            return FeatureVector::from_values(values);
        }
        for (index, count) in self.term_counts(text) {
            let tf = if self.options.sublinear_tf {
                1.0 + f64::from(count).ln()
            } else {
                f64::from(count)
            };
            values[index] = tf * self.idf[index];
        }
        if self.options.norm == Norm::L2 {
            let length = values.iter().map(|v| v * v).sum::<f64>().sqrt();
            if length > 0.0 {
                values.iter_mut().for_each(|v| *v /= length);
            }
        }
        FeatureVector::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Normalizer;

    fn vocabulary(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect()
    }

    fn text(raw: &str) -> NormalizedText {
        Normalizer::without_correction().normalize(raw)
    }

    #[test]
    fn empty_text_maps_to_zero_vector() {
        let extractor = TfidfExtractor::new(
            vocabulary(&["food", "order"]),
            vec![1.0, 2.0],
            TfidfOptions::default(),
        )
        .unwrap();
        let vector = extractor.extract(&text(""));
        assert_eq!(vector.dimension(), 2);
        assert!(vector.is_zero());
    }

    #[test]
    fn unknown_terms_are_ignored() {
        let extractor = TfidfExtractor::new(
            vocabulary(&["food", "order"]),
            vec![1.0, 1.0],
            TfidfOptions::default(),
        )
        .unwrap();
        assert!(extractor.extract(&text("zomato biryani")).is_zero());
    }

    #[test]
    fn weights_counts_by_idf_and_normalizes() {
        let extractor = TfidfExtractor::new(
            vocabulary(&["food", "order"]),
            vec![3.0, 4.0],
            TfidfOptions::default(),
        )
        .unwrap();
        let vector = extractor.extract(&text("food order"));
        assert_eq!(vector.values(), &[0.6, 0.8]);
    }

    #[test]
    fn raw_weights_without_norm_and_with_sublinear_tf() {
        let options = TfidfOptions {
            norm: Norm::None,
            ..TfidfOptions::default()
        };
        let extractor =
            TfidfExtractor::new(vocabulary(&["food"]), vec![2.0], options).unwrap();
        assert_eq!(extractor.extract(&text("food food")).values(), &[4.0]);

        let sublinear = TfidfOptions {
            sublinear_tf: true,
            norm: Norm::None,
            ..TfidfOptions::default()
        };
        let extractor =
            TfidfExtractor::new(vocabulary(&["food"]), vec![2.0], sublinear).unwrap();
        let expected = (1.0 + 2f64.ln()) * 2.0;
        assert_eq!(extractor.extract(&text("food food")).values(), &[expected]);
    }

    #[test]
    fn bigrams_and_short_token_filter() {
        let options = TfidfOptions {
            ngram_range: (1, 2),
            min_token_len: 2,
            norm: Norm::None,
            ..TfidfOptions::default()
        };
        let extractor = TfidfExtractor::new(
            vocabulary(&["movie", "movie ticket", "ticket", "a"]),
            vec![1.0, 1.0, 1.0, 1.0],
            options,
        )
        .unwrap();
        let vector = extractor.extract(&text("a movie ticket"));
        assert_eq!(vector.values(), &[1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn extraction_is_bit_identical_across_calls() {
        let extractor = TfidfExtractor::new(
            vocabulary(&["uber", "cab", "ride", "taxi"]),
            vec![1.7, 2.3, 1.1, 2.9],
            TfidfOptions::default(),
        )
        .unwrap();
        let first = extractor.extract(&text("uber cab ride ride taxi"));
        for _ in 0..10 {
            let again = extractor.extract(&text("uber cab ride ride taxi"));
            let same = first
                .values()
                .iter()
                .zip(again.values())
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same);
        }
    }

    #[test]
    fn rejects_inconsistent_vocabulary() {
        let options = TfidfOptions::default();
        assert!(TfidfExtractor::new(vocabulary(&["a", "b"]), vec![1.0], options).is_err());
        let mut gaps = vocabulary(&["a"]);
        gaps.insert("b".into(), 5);
        assert!(TfidfExtractor::new(gaps, vec![1.0, 1.0], options).is_err());
        let mut dupes = vocabulary(&["a"]);
        dupes.insert("b".into(), 0);
        assert!(TfidfExtractor::new(dupes, vec![1.0, 1.0], options).is_err());
        assert!(
            TfidfExtractor::new(vocabulary(&["a"]), vec![f64::NAN], options).is_err()
        );
        let bad_range = TfidfOptions {
            ngram_range: (2, 1),
            ..options
        };
        assert!(TfidfExtractor::new(vocabulary(&["a"]), vec![1.0], bad_range).is_err());
    }
}
