//! Ordered symptom collection.

use serde::{Deserialize, Serialize};

/// An ordered set of symptom phrases collected over one session.
///
/// Entries are trimmed and lower-cased on insertion. Duplicates
/// (case-insensitive) are rejected; insertion order is preserved for display.
/// Order has no effect on inference, which consumes the joined phrase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomSet {
    entries: Vec<String>,
}

impl SymptomSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom phrase.
    ///
    /// Returns `false` for blank input or a duplicate (case-insensitive).
    pub fn add(&mut self, raw: &str) -> bool {
        let entry = raw.trim().to_lowercase();
        if entry.is_empty() || self.entries.iter().any(|e| *e == entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove a symptom phrase (case-insensitive). Returns `true` if it was present.
    pub fn remove(&mut self, raw: &str) -> bool {
        let entry = raw.trim().to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| *e != entry);
        self.entries.len() != before
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Join entries into the comma-separated phrase handed to normalization.
    pub fn joined(&self) -> String {
        self.entries.join(", ")
    }
}
