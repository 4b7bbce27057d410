//! Resource builders.
//!
//! Each builder turns one validated TMR fragment into one FHIR resource. Builders are pure:
//! they never consult a registry, so whether a resource is new or shared is decided by the
//! orchestrator in `translate`.

pub mod condition;
pub mod detected_issue;
pub mod forecast_effect;
pub mod medication;
pub mod request;

use fhir::{CodeableConcept, Coding};

pub(crate) fn concept(system: &str, code: &str, display: &str) -> CodeableConcept {
    CodeableConcept::single(Coding::new(system, code, display))
}
