//! Category labels and the closed set a classifier was built with.

use std::{collections::HashSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

const HINT_MAX_DISTANCE: usize = 3;

/// One category name from a closed, model-defined set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CategoryLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CategoryLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The fixed, ordered list of labels a model can produce.
///
/// Labels can only be obtained from a set, so holding a [`CategoryLabel`]
/// means it belongs to some loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    labels: Arc<[CategoryLabel]>,
}

impl CategorySet {
    /// Builds a set from names in model order. Names must be non-empty,
    /// free of surrounding whitespace, and unique.
    pub fn new<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err("category names must not be empty".into());
            }
            if name.trim() != name {
                return Err(format!("category `{name}` has surrounding whitespace"));
            }
            if !seen.insert(name.clone()) {
                return Err(format!("category `{name}` is listed twice"));
            }
            labels.push(CategoryLabel(name));
        }
        if labels.is_empty() {
            return Err("a model needs at least one category".into());
        }
        Ok(Self {
            labels: labels.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryLabel> {
        self.labels.iter()
    }

    /// Exact, case-sensitive membership.
    pub fn get(&self, name: &str) -> Option<&CategoryLabel> {
        self.labels.iter().find(|label| label.0 == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn label_at(&self, index: usize) -> Option<&CategoryLabel> {
        self.labels.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label.0 == name)
    }

    /// Nearest member by case-insensitive edit distance, for "did you mean" hints.
    pub fn closest(&self, name: &str) -> Option<&CategoryLabel> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.labels
            .iter()
            .map(|label| (levenshtein(&label.0.to_lowercase(), &needle), label))
            .filter(|(distance, _)| *distance <= HINT_MAX_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, label)| label)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.labels.iter().map(CategoryLabel::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> CategorySet {
        CategorySet::new(["Food", "Transport", "Bills"]).unwrap()
    }

    #[test]
    fn membership_is_exact() {
        let categories = set();
        assert!(categories.contains("Food"));
        assert!(!categories.contains("food"));
        assert!(!categories.contains("Fuel"));
        assert_eq!(categories.position("Bills"), Some(2));
    }

    #[test]
    fn rejects_duplicates_and_blank_names() {
        assert!(CategorySet::new(["Food", "Food"]).is_err());
        assert!(CategorySet::new(["Food", " "]).is_err());
        assert!(CategorySet::new([" Food"]).is_err());
        assert!(CategorySet::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn closest_suggests_near_misses_only() {
        let categories = set();
        assert_eq!(categories.closest("food").unwrap(), "Food");
        assert_eq!(categories.closest("Transprt").unwrap(), "Transport");
        assert!(categories.closest("Entertainment").is_none());
    }
}
