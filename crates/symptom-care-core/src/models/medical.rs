//! Medical knowledge reference models.

use serde::{Deserialize, Serialize};

/// Treatment and dietary guidance for one condition. Static reference data,
/// read-only at inference time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalInfoRecord {
    pub treatment: String,
    pub medicinal_composition: String,
    pub precautionary_measures: String,
    pub ingredients_to_avoid: String,
    pub recommended_diet: String,
}

/// One row of the disease reference table as shipped on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseEntry {
    /// Condition name; lookup keys are its lower-cased form.
    pub disease: String,
    #[serde(flatten)]
    pub info: MedicalInfoRecord,
}
