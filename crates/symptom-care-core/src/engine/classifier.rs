//! Disease inference model.
//!
//! Wraps a trained tf-idf + multinomial naive Bayes classifier exported as a
//! JSON artifact: vocabulary with idf weights, condition labels, class
//! log-priors, and per-class feature log-probabilities. The artifact is loaded
//! once at process start and is read-only thereafter; scoring is pure, so the
//! model is safe to share across concurrent requests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{AlternativePrediction, DiseasePrediction};

/// Number of runner-up predictions reported alongside the primary.
const MAX_ALTERNATIVES: usize = 2;

/// Classifier artifact errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model artifact unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact inconsistent: {0}")]
    Inconsistent(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Metadata recorded when the artifact was exported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub model_type: String,
    pub vectorizer_type: String,
    pub training_samples: usize,
    pub version: String,
}

/// Exported classifier parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    /// Term (unigram or space-joined bigram) → feature column.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column.
    pub idf: Vec<f64>,
    /// Condition labels; index order is the deterministic tie-break order.
    pub classes: Vec<String>,
    /// Log prior per class.
    pub class_log_prior: Vec<f64>,
    /// Log feature likelihood, indexed `[class][feature]`.
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// The loaded disease inference model.
pub struct DiseaseModel {
    artifact: ModelArtifact,
}

impl DiseaseModel {
    /// Load and validate an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let data = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&data)?;
        Self::from_artifact(artifact)
    }

    /// Validate an already-deserialized artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> ModelResult<Self> {
        let features = artifact.idf.len();

        if artifact.vocabulary.len() != features {
            return Err(ModelError::Inconsistent(format!(
                "vocabulary has {} terms but idf has {} entries",
                artifact.vocabulary.len(),
                features
            )));
        }
        if let Some(&column) = artifact.vocabulary.values().max() {
            if column >= features {
                return Err(ModelError::Inconsistent(format!(
                    "vocabulary column {} out of range ({} features)",
                    column, features
                )));
            }
        }
        if artifact.classes.is_empty() {
            return Err(ModelError::Inconsistent("no condition labels".into()));
        }
        if artifact.class_log_prior.len() != artifact.classes.len() {
            return Err(ModelError::Inconsistent(format!(
                "{} classes but {} log priors",
                artifact.classes.len(),
                artifact.class_log_prior.len()
            )));
        }
        if artifact.feature_log_prob.len() != artifact.classes.len() {
            return Err(ModelError::Inconsistent(format!(
                "{} classes but {} feature weight rows",
                artifact.classes.len(),
                artifact.feature_log_prob.len()
            )));
        }
        for (index, row) in artifact.feature_log_prob.iter().enumerate() {
            if row.len() != features {
                return Err(ModelError::Inconsistent(format!(
                    "class {} has {} feature weights, expected {}",
                    index,
                    row.len(),
                    features
                )));
            }
        }

        Ok(Self { artifact })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.artifact.metadata
    }

    pub fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    pub fn class_count(&self) -> usize {
        self.artifact.classes.len()
    }

    /// Unigram vocabulary terms in column order, for the normalizer's
    /// spelling lexicon.
    pub fn unigram_lexicon(&self) -> Vec<String> {
        let mut terms: Vec<(&String, usize)> = self
            .artifact
            .vocabulary
            .iter()
            .filter(|(term, _)| !term.contains(' '))
            .map(|(term, &column)| (term, column))
            .collect();
        terms.sort_by_key(|&(_, column)| column);
        terms.into_iter().map(|(term, _)| term.clone()).collect()
    }

    /// Predict the most likely condition for cleaned, non-empty symptom text.
    ///
    /// Deterministic for identical input; equal posteriors resolve to the
    /// earliest label in the artifact's class order.
    pub fn predict(&self, cleaned: &str) -> DiseasePrediction {
        let features = self.vectorize(cleaned);
        let classes = &self.artifact.classes;

        let scores: Vec<f64> = (0..classes.len())
            .map(|class| {
                let mut score = self.artifact.class_log_prior[class];
                for &(column, weight) in &features {
                    score += weight * self.artifact.feature_log_prob[class][column];
                }
                score
            })
            .collect();

        let posteriors = posteriors(&scores);

        let mut ranked: Vec<usize> = (0..classes.len()).collect();
        ranked.sort_by(|&a, &b| {
            posteriors[b]
                .partial_cmp(&posteriors[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let top = ranked[0];
        let alternatives = ranked[1..]
            .iter()
            .take(MAX_ALTERNATIVES)
            .map(|&index| AlternativePrediction {
                disease: classes[index].clone(),
                confidence: posteriors[index],
            })
            .collect();

        debug!(
            disease = %classes[top],
            confidence = posteriors[top],
            matched_features = features.len(),
            "classifier scored input"
        );

        DiseasePrediction {
            primary_disease: classes[top].clone(),
            confidence: Some(posteriors[top]),
            alternatives,
        }
    }

    /// Build the L2-normalized tf-idf vector for the input (1–2-grams),
    /// sorted by column so score accumulation is order-stable.
    fn vectorize(&self, cleaned: &str) -> Vec<(usize, f64)> {
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for token in &tokens {
            if let Some(&column) = self.artifact.vocabulary.get(*token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            if let Some(&column) = self.artifact.vocabulary.get(&bigram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.artifact.idf[column]))
            .collect();
        features.sort_by_key(|&(column, _)| column);

        let norm = features.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in features.iter_mut() {
                *value /= norm;
            }
        }
        features
    }
}

/// Convert joint log-likelihoods to posterior probabilities (log-sum-exp).
fn posteriors(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three-class toy artifact with hand-picked weights: "fever"/"headache"
    /// point at Flu, "nausea"/"vomiting" at Gastroenteritis, "chest"/"breath"
    /// at Heart Disease.
    fn toy_artifact() -> ModelArtifact {
        let vocabulary: HashMap<String, usize> = [
            ("fever", 0),
            ("headache", 1),
            ("nausea", 2),
            ("vomiting", 3),
            ("chest", 4),
            ("breath", 5),
            ("chest pain", 6),
        ]
        .into_iter()
        .map(|(term, column)| (term.to_string(), column))
        .collect();

        let strong = -1.0;
        let weak = -10.0;
        let feature_log_prob = vec![
            vec![strong, strong, weak, weak, weak, weak, weak],
            vec![weak, weak, strong, strong, weak, weak, weak],
            vec![weak, weak, weak, weak, strong, strong, strong],
        ];

        ModelArtifact {
            metadata: ModelMetadata {
                model_type: "MultinomialNB".into(),
                vectorizer_type: "TfidfVectorizer".into(),
                training_samples: 5,
                version: "1.0".into(),
            },
            vocabulary,
            idf: vec![1.0; 7],
            classes: vec![
                "Flu".into(),
                "Gastroenteritis".into(),
                "Heart Disease".into(),
            ],
            class_log_prior: vec![(1.0f64 / 3.0).ln(); 3],
            feature_log_prob,
        }
    }

    #[test]
    fn test_predict_dominant_class() {
        let model = DiseaseModel::from_artifact(toy_artifact()).unwrap();

        let prediction = model.predict("fever headache");
        assert_eq!(prediction.primary_disease, "Flu");
        assert!(prediction.confidence.unwrap() > 0.9);

        let prediction = model.predict("nausea vomiting");
        assert_eq!(prediction.primary_disease, "Gastroenteritis");
    }

    #[test]
    fn test_bigram_feature_counts() {
        let model = DiseaseModel::from_artifact(toy_artifact()).unwrap();

        // "chest pain" hits both the unigram "chest" and the bigram column.
        let prediction = model.predict("chest pain");
        assert_eq!(prediction.primary_disease, "Heart Disease");
    }

    #[test]
    fn test_alternatives_ranked_below_primary() {
        let model = DiseaseModel::from_artifact(toy_artifact()).unwrap();
        let prediction = model.predict("fever");

        assert_eq!(prediction.alternatives.len(), 2);
        let primary = prediction.confidence.unwrap();
        assert!(prediction.alternatives.iter().all(|a| a.confidence <= primary));
    }

    #[test]
    fn test_prediction_deterministic() {
        let model = DiseaseModel::from_artifact(toy_artifact()).unwrap();
        let first = model.predict("fever nausea chest");
        for _ in 0..10 {
            assert_eq!(model.predict("fever nausea chest"), first);
        }
    }

    #[test]
    fn test_tie_breaks_by_label_order() {
        let mut artifact = toy_artifact();
        // Identical weights for every class: pure tie on any input.
        artifact.feature_log_prob = vec![vec![-1.0; 7]; 3];

        let model = DiseaseModel::from_artifact(artifact).unwrap();
        let prediction = model.predict("fever chest");
        assert_eq!(prediction.primary_disease, "Flu");
    }

    #[test]
    fn test_no_matched_features_falls_back_to_priors() {
        let mut artifact = toy_artifact();
        artifact.class_log_prior = vec![0.5f64.ln(), 0.3f64.ln(), 0.2f64.ln()];

        let model = DiseaseModel::from_artifact(artifact).unwrap();
        let prediction = model.predict("completely unrelated words");
        assert_eq!(prediction.primary_disease, "Flu");
        assert!((prediction.confidence.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unigram_lexicon_excludes_bigrams() {
        let model = DiseaseModel::from_artifact(toy_artifact()).unwrap();
        let lexicon = model.unigram_lexicon();

        assert_eq!(
            lexicon,
            vec!["fever", "headache", "nausea", "vomiting", "chest", "breath"]
        );
    }

    #[test]
    fn test_inconsistent_artifact_rejected() {
        let mut artifact = toy_artifact();
        artifact.idf.pop();
        assert!(matches!(
            DiseaseModel::from_artifact(artifact),
            Err(ModelError::Inconsistent(_))
        ));

        let mut artifact = toy_artifact();
        artifact.class_log_prior.pop();
        assert!(matches!(
            DiseaseModel::from_artifact(artifact),
            Err(ModelError::Inconsistent(_))
        ));

        let mut artifact = toy_artifact();
        artifact.feature_log_prob[0].pop();
        assert!(matches!(
            DiseaseModel::from_artifact(artifact),
            Err(ModelError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_missing_artifact_file() {
        let result = DiseaseModel::load("/nonexistent/disease_model.json");
        assert!(matches!(result, Err(ModelError::Io(_))));
    }

    #[test]
    fn test_posteriors_sum_to_one() {
        let p = posteriors(&[-3.0, -1.0, -2.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[1] > p[2] && p[2] > p[0]);
    }
}
