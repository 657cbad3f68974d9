//! Medical knowledge resolver.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::models::{DiseaseEntry, MedicalInfoRecord};

/// Errors loading the knowledge table. Lookups themselves never fail.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("knowledge table unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("knowledge table malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static disease → guidance reference table, keyed by lower-cased condition
/// name. Loaded once at startup, read-only thereafter.
pub struct MedicalKnowledge {
    records: HashMap<String, MedicalInfoRecord>,
}

impl MedicalKnowledge {
    /// Load entries from a JSON array file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let data = fs::read_to_string(path)?;
        let entries: Vec<DiseaseEntry> = serde_json::from_str(&data)?;
        info!(entries = entries.len(), "medical knowledge table loaded");
        Ok(Self::from_entries(entries))
    }

    /// Build a table from in-memory entries. Later duplicates win.
    pub fn from_entries(entries: Vec<DiseaseEntry>) -> Self {
        let records = entries
            .into_iter()
            .map(|entry| (entry.disease.to_lowercase(), entry.info))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up guidance for a condition.
    ///
    /// Exact, case-normalized lookup first; on a miss, a substring scan over
    /// stored names (first hit in name order, for determinism). An unknown
    /// condition resolves to `None`, never an error.
    pub fn lookup(&self, disease: &str) -> Option<&MedicalInfoRecord> {
        let key = disease.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        if let Some(record) = self.records.get(&key) {
            return Some(record);
        }

        let mut partial: Vec<(&String, &MedicalInfoRecord)> = self
            .records
            .iter()
            .filter(|(name, _)| name.contains(&key))
            .collect();
        partial.sort_by(|a, b| a.0.cmp(b.0));
        partial.into_iter().next().map(|(_, record)| record)
    }
}
