//! Doctor directory models.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading the doctor directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("doctor directory unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("doctor directory malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A doctor directory entry. Wire field names follow the directory export
/// format (`Doctor_Name`, `Clinic_Hospital`, ...). Queried, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    #[serde(rename = "Doctor_Name")]
    pub name: String,
    #[serde(rename = "Specialty")]
    pub specialty: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Contact_No")]
    pub contact: String,
    #[serde(rename = "Clinic_Hospital")]
    pub clinic: String,
    #[serde(rename = "Days_Available")]
    pub days_available: String,
    #[serde(rename = "Time_Slot")]
    pub time_slot: String,
    #[serde(rename = "Area")]
    pub area: String,
}

impl Doctor {
    /// Create a directory entry with required fields.
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            rating: 0.0,
            address: String::new(),
            contact: String::new(),
            clinic: String::new(),
            days_available: String::new(),
            time_slot: String::new(),
            area: String::new(),
        }
    }
}

/// Load a doctor directory from a JSON array file.
pub fn load_directory(path: impl AsRef<Path>) -> Result<Vec<Doctor>, DirectoryError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Result of a doctor search: the resolved specialty plus matching doctors in
/// directory order.
///
/// An empty `doctors` list with a resolved specialty is a valid "no matches"
/// outcome, distinct from no specialty resolving at all (`specialty: None`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSearchOutcome {
    pub specialty: Option<String>,
    pub doctors: Vec<Doctor>,
}

impl DoctorSearchOutcome {
    /// Outcome when no keyword matched the input.
    pub fn unresolved() -> Self {
        Self {
            specialty: None,
            doctors: Vec::new(),
        }
    }

    pub fn resolved(&self) -> bool {
        self.specialty.is_some()
    }
}
