//! Engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the recommendation engine.
///
/// All thresholds are observable knobs, not hidden cutoffs: low confidence
/// changes flags on the response, never whether a prediction is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the trained classifier artifact (JSON).
    pub model_path: PathBuf,
    /// Path to the medical knowledge table (JSON).
    pub knowledge_path: PathBuf,
    /// Predictions below this confidence are flagged low-confidence.
    pub min_confidence_threshold: f64,
    /// Predictions below this confidence carry a consult-a-professional
    /// disclaimer.
    pub disclaimer_threshold: f64,
    /// Maximum accepted symptom input length, in characters.
    pub max_input_length: usize,
    /// Maximum number of inputs per batch request.
    pub max_batch_size: usize,
    /// Minimum combined similarity for a misspelled token to snap to a
    /// lexicon term during normalization.
    pub spelling_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/disease_model.json"),
            knowledge_path: PathBuf::from("data/med.json"),
            min_confidence_threshold: 0.3,
            disclaimer_threshold: 0.6,
            max_input_length: 1000,
            max_batch_size: 10,
            spelling_threshold: 0.84,
        }
    }
}
