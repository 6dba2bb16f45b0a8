//! Dictionary-backed spelling correction.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use strsim::damerau_levenshtein;

/// Tokens shorter than this are never corrected.
pub const MIN_CORRECTABLE_LEN: usize = 3;
/// Tokens up to this length may move at most one edit.
const SHORT_TOKEN_LEN: usize = 4;

/// Read-only capability that proposes a replacement for a normalized token.
pub trait SpellCorrector: Send + Sync {
    /// Returns the best replacement for `token`, or `None` when the token is a
    /// known word or nothing is close enough.
    fn correct(&self, token: &str) -> Option<&str>;
}

/// Never corrects anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCorrector;

impl SpellCorrector for IdentityCorrector {
    fn correct(&self, _token: &str) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
struct DictionaryWord {
    word: String,
    frequency: u64,
}

/// Frozen word list with usage frequencies.
///
/// Candidates are ranked by Damerau-Levenshtein distance, then by higher
/// frequency, then lexicographically, so equal inputs always pick the same word.
#[derive(Debug, Clone)]
pub struct DictionaryCorrector {
    words: HashMap<String, u64>,
    by_len: BTreeMap<usize, Vec<DictionaryWord>>,
    max_distance: usize,
}

impl DictionaryCorrector {
    /// Builds a dictionary; every word must already be a single normalized
    /// token (`[a-z0-9]+`).
    pub fn new<I, S>(words: I, max_distance: usize) -> Result<Self, String>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut merged: HashMap<String, u64> = HashMap::new();
        for (word, frequency) in words {
            let word = word.into();
            if !is_normalized_token(&word) {
                return Err(format!(
                    "dictionary word `{word}` is not a lowercase alphanumeric token"
                ));
            }
            let slot = merged.entry(word).or_insert(0);
            *slot = (*slot).max(frequency);
        }
        Ok(Self::from_map(merged, max_distance))
    }

    /// Builds a dictionary from model terms, skipping anything that is not a
    /// single normalized token (n-grams, punctuation).
    pub fn from_terms<'a, I>(terms: I, max_distance: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words = terms
            .into_iter()
            .filter(|term| is_normalized_token(term))
            .map(|term| (term.to_string(), 1))
            .collect();
        Self::from_map(words, max_distance)
    }

    fn from_map(words: HashMap<String, u64>, max_distance: usize) -> Self {
        let mut by_len: BTreeMap<usize, Vec<DictionaryWord>> = BTreeMap::new();
        for (word, &frequency) in &words {
            by_len.entry(word.len()).or_default().push(DictionaryWord {
                word: word.clone(),
                frequency,
            });
        }
        for bucket in by_len.values_mut() {
            bucket.sort_by(|a, b| a.word.cmp(&b.word));
        }
        Self {
            words,
            by_len,
            max_distance,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    fn allowed_distance(&self, token_len: usize) -> usize {
        if token_len <= SHORT_TOKEN_LEN {
            self.max_distance.min(1)
        } else {
            self.max_distance
        }
    }
}

impl SpellCorrector for DictionaryCorrector {
    fn correct(&self, token: &str) -> Option<&str> {
        if token.len() < MIN_CORRECTABLE_LEN
            || token.bytes().any(|b| b.is_ascii_digit())
            || self.words.contains_key(token)
        {
            return None;
        }
        let allowed = self.allowed_distance(token.len());
        if allowed == 0 {
            return None;
        }

        let lower = token.len().saturating_sub(allowed);
        let upper = token.len() + allowed;
        let mut best: Option<(usize, &DictionaryWord)> = None;
        for bucket in self.by_len.range(lower..=upper).map(|(_, bucket)| bucket) {
            for candidate in bucket {
                let distance = damerau_levenshtein(token, &candidate.word);
                if distance == 0 || distance > allowed {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some((best_distance, best_word)) => {
                        rank(distance, candidate, best_distance, best_word) == Ordering::Less
                    }
                };
                if better {
                    best = Some((distance, candidate));
                }
            }
        }
        best.map(|(_, candidate)| candidate.word.as_str())
    }
}

fn rank(
    distance: usize,
    word: &DictionaryWord,
    other_distance: usize,
    other: &DictionaryWord,
) -> Ordering {
    distance
        .cmp(&other_distance)
        .then_with(|| other.frequency.cmp(&word.frequency))
        .then_with(|| word.word.cmp(&other.word))
}

/// `true` when `word` is non-empty and only contains `[a-z0-9]`.
pub fn is_normalized_token(word: &str) -> bool {
    !word.is_empty()
        && word
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> DictionaryCorrector {
        DictionaryCorrector::new(
            [
                ("food", 50),
                ("fuel", 20),
                ("order", 40),
                ("uber", 30),
                ("rent", 10),
                ("bill", 5),
                ("fill", 5),
            ],
            2,
        )
        .unwrap()
    }

    #[test]
    fn known_words_are_left_alone() {
        assert_eq!(dictionary().correct("food"), None);
    }

    #[test]
    fn corrects_nearby_misspellings() {
        let dict = dictionary();
        assert_eq!(dict.correct("foood"), Some("food"));
        assert_eq!(dict.correct("ordr"), Some("order"));
        assert_eq!(dict.correct("ubre"), Some("uber"));
    }

    #[test]
    fn short_tokens_and_numbers_are_never_corrected() {
        let dict = dictionary();
        assert_eq!(dict.correct("fo"), None);
        assert_eq!(dict.correct("f00d"), None);
    }

    #[test]
    fn short_tokens_move_at_most_one_edit() {
        assert_eq!(dictionary().correct("fxxd"), None);
    }

    #[test]
    fn ties_prefer_frequency_then_alphabetical_order() {
        let dict = dictionary();
        assert_eq!(dict.correct("fod"), Some("food"));
        // one edit from both "bill" and "fill", same frequency
        assert_eq!(dict.correct("xill"), Some("bill"));
    }

    #[test]
    fn unrelated_tokens_have_no_correction() {
        assert_eq!(dictionary().correct("zomato"), None);
    }

    #[test]
    fn rejects_words_that_are_not_normalized_tokens() {
        assert!(DictionaryCorrector::new([("Food", 1)], 2).is_err());
        assert!(DictionaryCorrector::new([("ice cream", 1)], 2).is_err());
    }

    #[test]
    fn from_terms_skips_ngrams() {
        let dict = DictionaryCorrector::from_terms(["swiggy", "food order", "food"], 2);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("swiggy"));
        assert!(!dict.contains("food order"));
    }
}
