//! Symptom-Care Core Library
//!
//! Symptom-to-care recommendation engine: takes free-text symptom
//! descriptions and produces either a predicted condition with treatment and
//! diet guidance, or a specialty-filtered doctor list.
//!
//! # Architecture
//!
//! ```text
//!                        ┌──────────────┐
//!        symptom text ──▶│  Normalizer  │ (cleanup + spelling correction)
//!                        └──────┬───────┘
//!                 ┌─────────────┴─────────────┐
//!                 ▼                           ▼
//!         ┌──────────────┐           ┌─────────────────┐
//!         │  Classifier  │           │ Specialty match │
//!         └──────┬───────┘           └────────┬────────┘
//!                ▼                            ▼
//!       ┌────────────────┐           ┌─────────────────┐
//!       │ Knowledge table│           │ Directory filter│
//!       └────────┬───────┘           └────────┬────────┘
//!                ▼                            ▼
//!         DiagnosisReport            DoctorSearchOutcome
//! ```
//!
//! # Core Principle
//!
//! **Requests never fail outright.** Every inference-side failure degrades to
//! a defined sentinel ("Unknown" condition, "N/A" fields, empty doctor list)
//! before it reaches the response boundary.
//!
//! # Modules
//!
//! - [`config`]: engine thresholds and artifact paths
//! - [`models`]: domain types (SymptomSet, Doctor, DiagnosisReport, etc.)
//! - [`engine`]: normalizer, classifier, knowledge resolver, specialty
//!   matcher, and the orchestrator that composes them

pub mod config;
pub mod engine;
pub mod models;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{
    DiseaseModel, EngineError, EngineResult, KnowledgeError, MedicalKnowledge, ModelArtifact,
    ModelError, ModelMetadata, Normalizer, RecommendationEngine, SpecialtyMatcher,
};
pub use models::{
    DiagnosisReport, DiseasePrediction, Doctor, DoctorSearchOutcome, MedicalInfoRecord,
    SessionState, SymptomSession, SymptomSet, FIELD_FALLBACK, UNKNOWN_DISEASE,
};
