//! Prediction and diagnosis report models.

use serde::{Deserialize, Serialize};

use super::MedicalInfoRecord;

/// Sentinel condition label used when inference cannot run.
pub const UNKNOWN_DISEASE: &str = "Unknown";

/// Sentinel rendered for absent display fields.
pub const FIELD_FALLBACK: &str = "N/A";

/// A runner-up condition with its posterior probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativePrediction {
    pub disease: String,
    pub confidence: f64,
}

/// The classifier's output for one cleaned input. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseasePrediction {
    /// Highest-scoring condition label, or the "Unknown" sentinel.
    pub primary_disease: String,
    /// Posterior probability of the primary label, when the model scored one.
    pub confidence: Option<f64>,
    /// Runner-up conditions, highest confidence first.
    pub alternatives: Vec<AlternativePrediction>,
}

impl DiseasePrediction {
    /// Sentinel prediction used when the classifier cannot run.
    pub fn unknown() -> Self {
        Self {
            primary_disease: UNKNOWN_DISEASE.to_string(),
            confidence: None,
            alternatives: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.primary_disease == UNKNOWN_DISEASE
    }
}

/// Assembled diagnosis for one symptom set.
///
/// `medical_info` is `None` when the predicted condition has no reference
/// entry; presentation layers render each missing field as `"N/A"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisReport {
    pub prediction: DiseasePrediction,
    /// Normalized, spell-corrected join of the symptom set.
    pub cleaned_input: String,
    pub medical_info: Option<MedicalInfoRecord>,
}
