//! JSON contracts and handlers for the symptom-to-care endpoints.
//!
//! The web layer (routing, transport, CORS) lives outside this workspace;
//! handlers here are pure functions over a shared
//! [`RecommendationEngine`](symptom_care_core::RecommendationEngine), so any
//! HTTP framework can expose them. Contracts follow the wire format of the
//! original endpoints: every response field is always present, with sentinel
//! defaults ("N/A"/"Unknown"/null) instead of omitted keys.

pub mod contracts;
pub mod handlers;

pub use contracts::*;
pub use handlers::*;
