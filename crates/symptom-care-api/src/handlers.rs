//! Endpoint handlers: pure functions over the engine.
//!
//! Each handler validates its request, runs the engine, and shapes the wire
//! response. Identical input against the same engine snapshot yields
//! identical output (timestamps aside).

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use symptom_care_core::models::Doctor;
use symptom_care_core::{DiagnosisReport, EngineError, ModelMetadata, RecommendationEngine};

use crate::contracts::{
    AlternativeBody, BatchItem, BatchRequest, BatchResponse, ErrorBody, HealthResponse, InputEcho,
    MedicalInfoBody, PredictResponse, PredictionBody, SymptomRequest,
};

/// Wording shared with the original endpoints.
const DISCLAIMER: &str = "Low confidence prediction. Please consult a healthcare professional.";

/// API-level errors, tagged with the status code the web layer should emit.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Internal => 500,
        }
    }

    /// Error body for the web layer to serialize.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            success: false,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::EmptyInput | EngineError::InputTooLong { .. } => {
                ApiError::BadRequest(error.to_string())
            }
            other => {
                warn!(error = %other, "engine failure surfaced to API");
                ApiError::Internal
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Human-readable confidence band.
pub fn confidence_level(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "High"
    } else if confidence >= 0.6 {
        "Medium"
    } else if confidence >= 0.4 {
        "Low"
    } else {
        "Very Low"
    }
}

/// Handle `POST /predict_disease`.
pub fn predict_disease(
    engine: &RecommendationEngine,
    request: &SymptomRequest,
) -> ApiResult<PredictResponse> {
    let symptom = request.symptom.trim();
    if symptom.is_empty() {
        return Err(ApiError::BadRequest("Symptom input is required".into()));
    }
    let report = engine.diagnose_phrase(symptom)?;
    Ok(build_predict_response(engine, symptom, report))
}

/// Handle `POST /api/doctors`.
///
/// The response is the (possibly empty) array of matching doctors in
/// directory order; an unresolved specialty also yields an empty array.
pub fn search_doctors(
    engine: &RecommendationEngine,
    directory: &[Doctor],
    request: &SymptomRequest,
) -> ApiResult<Vec<Doctor>> {
    let symptom = request.symptom.trim();
    if symptom.is_empty() {
        return Err(ApiError::BadRequest("Symptom input is required".into()));
    }
    let outcome = engine.find_doctors(symptom, directory)?;
    Ok(outcome.doctors)
}

/// Handle `POST /predict_batch`.
pub fn predict_batch(
    engine: &RecommendationEngine,
    request: &BatchRequest,
) -> ApiResult<BatchResponse> {
    let max = engine.config().max_batch_size;
    if request.symptoms.is_empty() || request.symptoms.len() > max {
        return Err(ApiError::BadRequest(format!(
            "Provide 1-{} symptom inputs",
            max
        )));
    }

    let results = request
        .symptoms
        .iter()
        .enumerate()
        .map(|(index, symptom)| match engine.diagnose_phrase(symptom) {
            Ok(report) => BatchItem {
                index,
                success: true,
                prediction: Some(report.prediction.primary_disease),
                confidence: report.prediction.confidence,
                error: None,
            },
            Err(error) => BatchItem {
                index,
                success: false,
                prediction: None,
                confidence: None,
                error: Some(error.to_string()),
            },
        })
        .collect();

    Ok(BatchResponse {
        success: true,
        results,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Handle `GET /health`.
pub fn health(engine: &RecommendationEngine) -> HealthResponse {
    let model_loaded = engine.is_model_loaded();
    HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        model_loaded,
    }
}

/// Handle `GET /model-info`.
pub fn model_info(engine: &RecommendationEngine) -> ApiResult<ModelMetadata> {
    engine
        .metadata()
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Model metadata not available".into()))
}

fn build_predict_response(
    engine: &RecommendationEngine,
    original: &str,
    report: DiagnosisReport,
) -> PredictResponse {
    let confidence = report.prediction.confidence;
    let level = confidence
        .map(confidence_level)
        .unwrap_or("Unknown")
        .to_string();
    let disclaimer = match confidence {
        Some(value) if value >= engine.config().disclaimer_threshold => None,
        // Low confidence or no score at all.
        _ => Some(DISCLAIMER.to_string()),
    };
    let low_confidence = match confidence {
        Some(value) => value < engine.config().min_confidence_threshold,
        None => true,
    };
    let medical_info = report
        .medical_info
        .as_ref()
        .map(MedicalInfoBody::from)
        .unwrap_or_else(MedicalInfoBody::absent);

    PredictResponse {
        success: true,
        timestamp: Utc::now().to_rfc3339(),
        input: InputEcho {
            original: original.to_string(),
            cleaned: report.cleaned_input,
        },
        prediction: PredictionBody {
            primary_disease: report.prediction.primary_disease,
            confidence,
            confidence_level: level,
            low_confidence,
            alternative_predictions: report
                .prediction
                .alternatives
                .into_iter()
                .map(|alternative| AlternativeBody {
                    disease: alternative.disease,
                    confidence: alternative.confidence,
                })
                .collect(),
        },
        medical_info,
        disclaimer,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use symptom_care_core::models::{DiseaseEntry, MedicalInfoRecord};
    use symptom_care_core::{
        DiseaseModel, EngineConfig, MedicalKnowledge, ModelArtifact, ModelMetadata,
        SpecialtyMatcher,
    };

    fn toy_engine(with_model: bool) -> RecommendationEngine {
        toy_engine_with_config(with_model, EngineConfig::default())
    }

    fn toy_engine_with_config(with_model: bool, config: EngineConfig) -> RecommendationEngine {
        let model = with_model.then(|| {
            let vocabulary: HashMap<String, usize> = [("fever", 0), ("nausea", 1)]
                .into_iter()
                .map(|(term, column)| (term.to_string(), column))
                .collect();
            DiseaseModel::from_artifact(ModelArtifact {
                metadata: ModelMetadata {
                    model_type: "MultinomialNB".into(),
                    vectorizer_type: "TfidfVectorizer".into(),
                    training_samples: 2,
                    version: "1.0".into(),
                },
                vocabulary,
                idf: vec![1.0; 2],
                classes: vec!["Flu".into(), "Gastroenteritis".into()],
                class_log_prior: vec![(0.5f64).ln(); 2],
                feature_log_prob: vec![vec![-1.0, -10.0], vec![-10.0, -1.0]],
            })
            .unwrap()
        });

        let knowledge = MedicalKnowledge::from_entries(vec![DiseaseEntry {
            disease: "Flu".into(),
            info: MedicalInfoRecord {
                treatment: "Rest and fluids".into(),
                medicinal_composition: "Paracetamol".into(),
                precautionary_measures: "Rest".into(),
                ingredients_to_avoid: "Alcohol".into(),
                recommended_diet: "Light foods".into(),
            },
        }]);

        RecommendationEngine::with_parts(config, model, knowledge, SpecialtyMatcher::new())
    }

    #[test]
    fn test_predict_disease_happy_path() {
        let engine = toy_engine(true);
        let request = SymptomRequest {
            symptom: "fever".into(),
        };

        let response = predict_disease(&engine, &request).unwrap();
        assert!(response.success);
        assert_eq!(response.prediction.primary_disease, "Flu");
        assert_eq!(response.input.original, "fever");
        assert_eq!(response.input.cleaned, "fever");
        assert_eq!(response.medical_info.treatment, "Rest and fluids");
        assert!(response.disclaimer.is_none());
        assert!(!response.prediction.low_confidence);
    }

    #[test]
    fn test_low_confidence_flag_follows_threshold() {
        // Symmetric evidence splits the posterior 0.5/0.5, which clears the
        // default 0.3 floor but not a stricter one.
        let request = SymptomRequest {
            symptom: "fever, nausea".into(),
        };

        let engine = toy_engine(true);
        let response = predict_disease(&engine, &request).unwrap();
        let confidence = response.prediction.confidence.unwrap();
        assert!((confidence - 0.5).abs() < 1e-9);
        assert!(!response.prediction.low_confidence);

        let strict = toy_engine_with_config(
            true,
            EngineConfig {
                min_confidence_threshold: 0.6,
                ..EngineConfig::default()
            },
        );
        let response = predict_disease(&strict, &request).unwrap();
        assert!(response.prediction.low_confidence);
    }

    #[test]
    fn test_predict_disease_rejects_blank() {
        let engine = toy_engine(true);
        let request = SymptomRequest {
            symptom: "   ".into(),
        };

        let error = predict_disease(&engine, &request).unwrap_err();
        assert_eq!(error.status_code(), 400);
        assert!(!error.body().success);
    }

    #[test]
    fn test_predict_disease_rejects_over_long() {
        let engine = toy_engine(true);
        let request = SymptomRequest {
            symptom: "a".repeat(engine.config().max_input_length + 1),
        };

        let error = predict_disease(&engine, &request).unwrap_err();
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_degraded_engine_serves_unknown_with_sentinels() {
        let engine = toy_engine(false);
        let request = SymptomRequest {
            symptom: "fever".into(),
        };

        let response = predict_disease(&engine, &request).unwrap();
        assert_eq!(response.prediction.primary_disease, "Unknown");
        assert_eq!(response.prediction.confidence_level, "Unknown");
        assert!(response.prediction.confidence.is_none());
        assert_eq!(response.medical_info.treatment, "N/A");
        assert!(response.disclaimer.is_some());
        assert!(response.prediction.low_confidence);
    }

    #[test]
    fn test_search_doctors_filters_and_preserves_order() {
        let engine = toy_engine(true);
        let directory = vec![
            Doctor::new("Dr. Heart", "Cardiologist"),
            Doctor::new("Dr. Skin", "Dermatologist"),
            Doctor::new("Dr. Valve", "Cardiologist"),
        ];
        let request = SymptomRequest {
            symptom: "chest pain".into(),
        };

        let doctors = search_doctors(&engine, &directory, &request).unwrap();
        let names: Vec<&str> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Heart", "Dr. Valve"]);
    }

    #[test]
    fn test_search_doctors_empty_result_is_ok() {
        let engine = toy_engine(true);
        let request = SymptomRequest {
            symptom: "xyz-nonexistent".into(),
        };

        let doctors = search_doctors(&engine, &[], &request).unwrap();
        assert!(doctors.is_empty());
    }

    #[test]
    fn test_search_doctors_rejects_blank() {
        let engine = toy_engine(true);
        let request = SymptomRequest { symptom: "".into() };
        let error = search_doctors(&engine, &[], &request).unwrap_err();
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_batch_limits_and_per_item_errors() {
        let engine = toy_engine(true);

        let empty = BatchRequest {
            symptoms: Vec::new(),
        };
        assert_eq!(predict_batch(&engine, &empty).unwrap_err().status_code(), 400);

        let too_many = BatchRequest {
            symptoms: vec!["fever".into(); engine.config().max_batch_size + 1],
        };
        assert_eq!(
            predict_batch(&engine, &too_many).unwrap_err().status_code(),
            400
        );

        let mixed = BatchRequest {
            symptoms: vec!["fever".into(), "   ".into()],
        };
        let response = predict_batch(&engine, &mixed).unwrap();
        assert!(response.success);
        assert_eq!(response.results.len(), 2);
        assert!(response.results[0].success);
        assert_eq!(response.results[0].prediction.as_deref(), Some("Flu"));
        assert!(!response.results[1].success);
        assert!(response.results[1].error.is_some());
    }

    #[test]
    fn test_health_reflects_model_state() {
        assert_eq!(health(&toy_engine(true)).status, "healthy");
        let degraded = health(&toy_engine(false));
        assert_eq!(degraded.status, "degraded");
        assert!(!degraded.model_loaded);
    }

    #[test]
    fn test_model_info_missing_is_404() {
        let engine = toy_engine(false);
        assert_eq!(model_info(&engine).unwrap_err().status_code(), 404);

        let loaded = toy_engine(true);
        assert_eq!(model_info(&loaded).unwrap().model_type, "MultinomialNB");
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(confidence_level(0.95), "High");
        assert_eq!(confidence_level(0.8), "High");
        assert_eq!(confidence_level(0.7), "Medium");
        assert_eq!(confidence_level(0.5), "Low");
        assert_eq!(confidence_level(0.1), "Very Low");
    }
}
