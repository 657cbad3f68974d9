//! Wire-format request and response types.

use serde::{Deserialize, Serialize};
use symptom_care_core::models::{MedicalInfoRecord, FIELD_FALLBACK};

/// `POST /predict_disease` and `POST /api/doctors` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomRequest {
    /// Comma-joined symptom phrase.
    #[serde(default)]
    pub symptom: String,
}

/// Echo of the original and cleaned input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputEcho {
    pub original: String,
    pub cleaned: String,
}

/// A runner-up prediction on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeBody {
    pub disease: String,
    pub confidence: f64,
}

/// Prediction block of the diagnosis response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionBody {
    pub primary_disease: String,
    /// Posterior probability; `null` when the model could not score.
    pub confidence: Option<f64>,
    pub confidence_level: String,
    /// True when the confidence falls below the engine's
    /// `min_confidence_threshold`, or when the model could not score at all.
    pub low_confidence: bool,
    pub alternative_predictions: Vec<AlternativeBody>,
}

/// Medical info block. Every field is always present, defaulting to "N/A" so
/// renderers can apply their sentinel fallback uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalInfoBody {
    pub treatment: String,
    pub medicinal_composition: String,
    pub precautionary_measures: String,
    pub ingredients_to_avoid: String,
    pub recommended_diet: String,
}

impl MedicalInfoBody {
    /// All-sentinel block for an unknown condition.
    pub fn absent() -> Self {
        Self {
            treatment: FIELD_FALLBACK.to_string(),
            medicinal_composition: FIELD_FALLBACK.to_string(),
            precautionary_measures: FIELD_FALLBACK.to_string(),
            ingredients_to_avoid: FIELD_FALLBACK.to_string(),
            recommended_diet: FIELD_FALLBACK.to_string(),
        }
    }
}

impl From<&MedicalInfoRecord> for MedicalInfoBody {
    fn from(record: &MedicalInfoRecord) -> Self {
        Self {
            treatment: or_fallback(&record.treatment),
            medicinal_composition: or_fallback(&record.medicinal_composition),
            precautionary_measures: or_fallback(&record.precautionary_measures),
            ingredients_to_avoid: or_fallback(&record.ingredients_to_avoid),
            recommended_diet: or_fallback(&record.recommended_diet),
        }
    }
}

fn or_fallback(value: &str) -> String {
    if value.trim().is_empty() {
        FIELD_FALLBACK.to_string()
    } else {
        value.to_string()
    }
}

/// `POST /predict_disease` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub success: bool,
    pub timestamp: String,
    pub input: InputEcho,
    pub prediction: PredictionBody,
    pub medical_info: MedicalInfoBody,
    /// Consult-a-professional notice for low-confidence predictions;
    /// serialized as `null` otherwise, never omitted.
    pub disclaimer: Option<String>,
}

/// `POST /predict_batch` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Per-input result of a batch prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItem {
    pub index: usize,
    pub success: bool,
    pub prediction: Option<String>,
    pub confidence: Option<f64>,
    pub error: Option<String>,
}

/// `POST /predict_batch` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchItem>,
    pub timestamp: String,
}

/// `GET /health` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model_loaded: bool,
}

/// Error body the web layer serializes for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub success: bool,
}
