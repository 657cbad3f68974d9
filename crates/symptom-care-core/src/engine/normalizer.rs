//! Symptom text normalizer.
//!
//! Cleaning pipeline: trim → lower-case → strip punctuation to spaces →
//! collapse whitespace → per-token spelling correction against the model
//! lexicon (e.g. "feve" → "fever").

use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::debug;

/// Normalizer for raw symptom text. Pure; holds only its lexicon.
pub struct Normalizer {
    /// Known-good tokens spelling correction may snap to, in priority order.
    lexicon: Vec<String>,
    /// Minimum combined similarity for a correction to apply.
    threshold: f64,
}

impl Normalizer {
    /// Create a normalizer with no lexicon (cleanup only, no correction).
    pub fn new(threshold: f64) -> Self {
        Self {
            lexicon: Vec::new(),
            threshold,
        }
    }

    /// Create a normalizer that corrects tokens against `lexicon`.
    pub fn with_lexicon(lexicon: Vec<String>, threshold: f64) -> Self {
        Self { lexicon, threshold }
    }

    /// Normalize raw symptom text.
    ///
    /// Never fails: empty or punctuation-only input yields an empty string,
    /// which signals callers to skip inference.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean_text(raw);
        if self.lexicon.is_empty() || cleaned.is_empty() {
            return cleaned;
        }
        cleaned
            .split_whitespace()
            .map(|token| self.correct_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Correct a single token against the lexicon.
    ///
    /// Exact lexicon members pass through; otherwise the best-scoring lexicon
    /// term wins if it clears the threshold. Ties keep the earliest entry.
    fn correct_token(&self, token: &str) -> String {
        if self.lexicon.iter().any(|w| w == token) {
            return token.to_string();
        }

        let mut best: Option<(&str, f64)> = None;
        for word in &self.lexicon {
            let score = fuzzy_match(token, word);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((word, score));
            }
        }

        match best {
            Some((word, score)) if score >= self.threshold => {
                debug!(from = token, to = word, "spelling corrected");
                word.to_string()
            }
            _ => token.to_string(),
        }
    }
}

/// Lower-case, map non-alphanumeric characters to spaces, collapse runs of
/// whitespace.
fn clean_text(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Combined fuzzy similarity: Jaro-Winkler weighted higher for typo-heavy
/// prefixes, normalized Levenshtein for overall shape.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
