//! Domain models for the symptom-care system.

mod doctor;
mod medical;
mod prediction;
mod session;
mod symptoms;

pub use doctor::*;
pub use medical::*;
pub use prediction::*;
pub use session::*;
pub use symptoms::*;
