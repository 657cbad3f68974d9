//! Symptom collection session state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SymptomSet;

/// State of a symptom collection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No symptoms collected yet.
    Empty,
    /// At least one symptom collected, still editable.
    Collecting,
    /// Collection confirmed; analysis may start.
    ReadyToAnalyze,
    /// Diagnosis in flight.
    Analyzing,
    /// Diagnosis produced.
    Result,
    /// Diagnosis failed; the symptom set is retained for retry.
    Failed,
}

/// Rejected session transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid session transition from {from:?}")]
pub struct TransitionError {
    pub from: SessionState,
}

/// A session-scoped symptom collection driving the orchestrator.
///
/// The session owns its [`SymptomSet`]; callers hold one session per user and
/// pass it into `diagnose`. Adding or removing symptoms moves between the
/// collection states based on cardinality; a failed analysis keeps the set so
/// the user can retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomSession {
    symptoms: SymptomSet,
    state: SessionState,
}

impl Default for SymptomSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self {
            symptoms: SymptomSet::new(),
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    /// Add a symptom. Not allowed while a diagnosis is in flight.
    pub fn add_symptom(&mut self, raw: &str) -> bool {
        if self.state == SessionState::Analyzing {
            return false;
        }
        let added = self.symptoms.add(raw);
        self.sync_collection_state();
        added
    }

    /// Remove a symptom. Not allowed while a diagnosis is in flight.
    pub fn remove_symptom(&mut self, raw: &str) -> bool {
        if self.state == SessionState::Analyzing {
            return false;
        }
        let removed = self.symptoms.remove(raw);
        self.sync_collection_state();
        removed
    }

    /// Confirm the collection: `Collecting -> ReadyToAnalyze`.
    pub fn mark_ready(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SessionState::Collecting => {
                self.state = SessionState::ReadyToAnalyze;
                Ok(())
            }
            SessionState::ReadyToAnalyze => Ok(()),
            from => Err(TransitionError { from }),
        }
    }

    /// Start a diagnosis: `ReadyToAnalyze -> Analyzing`.
    pub fn begin_analysis(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SessionState::ReadyToAnalyze => {
                self.state = SessionState::Analyzing;
                Ok(())
            }
            from => Err(TransitionError { from }),
        }
    }

    /// Record a successful diagnosis: `Analyzing -> Result`.
    pub fn complete(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SessionState::Analyzing => {
                self.state = SessionState::Result;
                Ok(())
            }
            from => Err(TransitionError { from }),
        }
    }

    /// Record a failed diagnosis: `Analyzing -> Failed`. The set is kept.
    pub fn fail(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SessionState::Analyzing => {
                self.state = SessionState::Failed;
                Ok(())
            }
            from => Err(TransitionError { from }),
        }
    }

    /// Return to `ReadyToAnalyze` after a failure, keeping the symptom set.
    pub fn retry(&mut self) -> Result<(), TransitionError> {
        match self.state {
            SessionState::Failed => {
                self.state = SessionState::ReadyToAnalyze;
                Ok(())
            }
            from => Err(TransitionError { from }),
        }
    }

    /// Clear the session back to `Empty`.
    pub fn reset(&mut self) {
        self.symptoms.clear();
        self.state = SessionState::Empty;
    }

    fn sync_collection_state(&mut self) {
        self.state = if self.symptoms.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Collecting
        };
    }
}
