//! Deterministic text cleanup feeding the categorization pipeline.

pub mod spelling;

use std::{fmt, sync::Arc};

pub use spelling::{DictionaryCorrector, IdentityCorrector, SpellCorrector};

/// Lowercase, punctuation-free text with single spaces between corrected tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cleans raw text and applies spelling correction token by token.
///
/// Holds only a shared, read-only corrector, so one instance can serve any
/// number of concurrent callers.
#[derive(Clone)]
pub struct Normalizer {
    corrector: Arc<dyn SpellCorrector>,
}

impl Normalizer {
    pub fn new(corrector: Arc<dyn SpellCorrector>) -> Self {
        Self { corrector }
    }

    pub fn without_correction() -> Self {
        Self::new(Arc::new(IdentityCorrector))
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        let cleaned = clean(text);
        let corrected: Vec<&str> = cleaned
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(|token| self.corrector.correct(token).unwrap_or(token))
            .collect();
        NormalizedText(corrected.join(" "))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::without_correction()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

/// Trims, case folds, maps everything outside `[a-z0-9]` to spaces and
/// collapses whitespace. No spelling correction.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.trim().chars().map(simple_fold) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// One-to-one lowercase mapping. Characters whose lowercase form expands to
/// several characters (such as U+0130) are left unchanged.
fn simple_fold(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}
