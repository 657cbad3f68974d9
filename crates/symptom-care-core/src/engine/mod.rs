//! The symptom-to-care recommendation engine.
//!
//! Pipeline:
//!
//! ```text
//! symptom text → Normalizer → Classifier → Knowledge lookup   (diagnosis)
//! symptom text → Specialty matcher → directory filter         (doctor search)
//! ```
//!
//! Everything the engine holds is read-only after construction, so a single
//! engine can be shared across concurrent requests without locking.

mod classifier;
mod knowledge;
mod normalizer;
mod specialty;

pub use classifier::*;
pub use knowledge::*;
pub use normalizer::*;
pub use specialty::*;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::models::{
    DiagnosisReport, DiseasePrediction, Doctor, DoctorSearchOutcome, SymptomSet,
};

/// Engine errors.
///
/// Inference-side failures degrade to sentinel values before the response
/// boundary; these variants cover input validation and startup loading. A
/// broken classifier artifact never surfaces here: the engine starts degraded
/// instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("symptom input is required")]
    EmptyInput,

    #[error("symptom input too long ({length} chars, max {max})")]
    InputTooLong { length: usize, max: usize },

    #[error("knowledge table error: {0}")]
    Knowledge(#[from] KnowledgeError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// The recommendation orchestrator: owns the normalizer, the (optional)
/// classifier, and the reference tables.
pub struct RecommendationEngine {
    config: EngineConfig,
    normalizer: Normalizer,
    model: Option<DiseaseModel>,
    knowledge: MedicalKnowledge,
    specialties: SpecialtyMatcher,
}

impl RecommendationEngine {
    /// Load the engine from the paths in `config`.
    ///
    /// A missing or unreadable classifier artifact is tolerated: the engine
    /// starts degraded and every diagnosis resolves to the "Unknown"
    /// sentinel. A broken knowledge table is a startup error.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let model = match DiseaseModel::load(&config.model_path) {
            Ok(model) => {
                info!(classes = model.class_count(), "classifier artifact loaded");
                Some(model)
            }
            Err(error) => {
                warn!(%error, "classifier artifact unavailable, diagnoses degrade to Unknown");
                None
            }
        };
        let knowledge = MedicalKnowledge::load(&config.knowledge_path)?;
        Ok(Self::with_parts(
            config,
            model,
            knowledge,
            SpecialtyMatcher::new(),
        ))
    }

    /// Assemble an engine from already-built parts (tests and embedders that
    /// manage their own loading).
    pub fn with_parts(
        config: EngineConfig,
        model: Option<DiseaseModel>,
        knowledge: MedicalKnowledge,
        specialties: SpecialtyMatcher,
    ) -> Self {
        let normalizer = match &model {
            Some(model) => {
                Normalizer::with_lexicon(model.unigram_lexicon(), config.spelling_threshold)
            }
            None => Normalizer::new(config.spelling_threshold),
        };
        Self {
            config,
            normalizer,
            model,
            knowledge,
            specialties,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Metadata of the loaded classifier artifact, if any.
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.model.as_ref().map(DiseaseModel::metadata)
    }

    /// Diagnose a collected symptom set.
    ///
    /// An empty set is rejected before the classifier is ever consulted.
    pub fn diagnose(&self, symptoms: &SymptomSet) -> EngineResult<DiagnosisReport> {
        if symptoms.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        self.diagnose_phrase(&symptoms.joined())
    }

    /// Diagnose a raw comma-joined symptom phrase (the wire entry point).
    pub fn diagnose_phrase(&self, raw: &str) -> EngineResult<DiagnosisReport> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let length = trimmed.chars().count();
        if length > self.config.max_input_length {
            return Err(EngineError::InputTooLong {
                length,
                max: self.config.max_input_length,
            });
        }
        Ok(self.run_diagnosis(trimmed))
    }

    /// Find doctors for a symptom phrase, filtering `directory` by the
    /// resolved specialty. Directory order is preserved; an empty match list
    /// and an unresolved specialty are both `Ok` outcomes.
    pub fn find_doctors(
        &self,
        symptom_text: &str,
        directory: &[Doctor],
    ) -> EngineResult<DoctorSearchOutcome> {
        let trimmed = symptom_text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let length = trimmed.chars().count();
        if length > self.config.max_input_length {
            return Err(EngineError::InputTooLong {
                length,
                max: self.config.max_input_length,
            });
        }

        match self.specialties.resolve(trimmed) {
            Some(specialty) => {
                let doctors: Vec<Doctor> = directory
                    .iter()
                    .filter(|doctor| doctor.specialty == specialty)
                    .cloned()
                    .collect();
                debug!(specialty, matches = doctors.len(), "doctor search complete");
                Ok(DoctorSearchOutcome {
                    specialty: Some(specialty.to_string()),
                    doctors,
                })
            }
            None => {
                debug!(input = trimmed, "no specialty resolved");
                Ok(DoctorSearchOutcome::unresolved())
            }
        }
    }

    /// Normalize, infer, and resolve guidance. Never fails: a missing model
    /// or empty cleaned input resolves to the sentinel prediction.
    fn run_diagnosis(&self, raw: &str) -> DiagnosisReport {
        let cleaned = self.normalizer.normalize(raw);
        if cleaned.is_empty() {
            debug!("cleaned input empty, skipping inference");
            return DiagnosisReport {
                prediction: DiseasePrediction::unknown(),
                cleaned_input: cleaned,
                medical_info: None,
            };
        }

        let prediction = match &self.model {
            Some(model) => model.predict(&cleaned),
            None => {
                warn!("classifier unavailable, returning Unknown");
                DiseasePrediction::unknown()
            }
        };

        let medical_info = if prediction.is_unknown() {
            None
        } else {
            self.knowledge.lookup(&prediction.primary_disease).cloned()
        };

        debug!(
            disease = %prediction.primary_disease,
            info_found = medical_info.is_some(),
            "diagnosis complete"
        );

        DiagnosisReport {
            prediction,
            cleaned_input: cleaned,
            medical_info,
        }
    }
}
