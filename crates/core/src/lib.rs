//! # CDS Core
//!
//! TMR → FHIR translation engine.
//!
//! This crate turns a TMR guideline group into a flat, deduplicated, cross-referenced list of
//! FHIR resources and wraps it into an advisory card:
//! - Schema validation of the raw document, with field-level errors
//! - Deterministic resource identifiers
//! - One builder per resource kind, feeding insertion-ordered registries
//! - Care-plan assembly and the card envelope
//! - The COPD medication-preference card
//!
//! **No API concerns**: the command line and HTTP surfaces belong in `cds-cli` and
//! `api-rest`. Translation is synchronous, does no I/O and keeps no state between calls.

pub mod builders;
pub mod card;
pub mod care_plan;
pub mod config;
pub mod constants;
pub mod error;
pub mod identifiers;
pub mod preferences;
pub mod registry;
pub mod translate;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use card::{create_card, CardOptions, CardResponse};
pub use care_plan::assemble_care_plan;
pub use config::TranslatorConfig;
pub use error::{CdsError, CdsResult};
pub use preferences::{
    create_preferences_card, parse_preferences, GroupPreferences, MedicationCatalogue,
    PreferenceCardOptions,
};
pub use translate::{parse_group, translate, translate_group, Translation};

use cds_types::PatientId;
use serde_json::Value;

/// Counts reported by [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationSummary {
    pub recommendations: usize,
    pub interactions: usize,
    pub resources: usize,
}

/// Run every validation gate on `document` without producing output.
///
/// This performs a full translation for a placeholder patient, so it also catches
/// unresolvable interaction norms and malformed concept URIs.
pub fn validate(document: &Value, config: &TranslatorConfig) -> CdsResult<ValidationSummary> {
    let group = parse_group(document)?;
    let patient = PatientId::new(constants::VALIDATION_PATIENT_ID)?;
    let translation = translate_group(&patient, &group, config)?;

    Ok(ValidationSummary {
        recommendations: group.recommendations.len(),
        interactions: group.interactions.len(),
        resources: translation.entries.len(),
    })
}
