//! FHIR wire/boundary support for the TMR decision-support engine.
//!
//! This crate provides the **wire models** the translation engine emits:
//! - data types (`Coding`, `CodeableConcept`, `Reference`)
//! - the resources a translated guideline group is made of
//! - the bundle/entry carriers used by the advisory card
//! - the `Parameters`/`List` carriers used by the medication-preference card
//! - the interaction-kind coding table and its YAML format
//!
//! This crate focuses on:
//! - FHIR-shaped JSON serialisation with stable field order
//! - small, infallible constructors and accessors
//!
//! Deciding *which* resources to build and how they reference each other belongs to
//! `cds-core`. Nothing in here validates clinical content.

pub mod bundle;
pub mod care_plan;
pub mod condition;
pub mod datatypes;
pub mod detected_issue;
pub mod forecast_effect;
pub mod list;
pub mod medication;
pub mod parameters;
pub mod patient;
pub mod request;

// Re-export facades
pub use bundle::{Bundle, BundleEntry, Resource};
pub use care_plan::CarePlan;
pub use condition::Condition;
pub use datatypes::{CodeableConcept, Coding, Reference};
pub use detected_issue::{
    DetectedIssue, InteractionCodeTable, IssueCoding, IssueStatus, Mitigation,
};
pub use forecast_effect::{AppliesTo, EffectRank, EventType, ForecastEffect, TargetMeasurement};
pub use list::{List, ListEntry, ListMode, ListStatus};
pub use medication::Medication;
pub use parameters::{Parameter, ParameterResource, Parameters};
pub use patient::Patient;
pub use request::{MedicationRequest, RequestIntent, RequestKind, RequestStatus, ServiceRequest};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Implemented by every resource this crate can emit.
pub trait FhirResource {
    /// Value of `resourceType`.
    const RESOURCE_TYPE: &'static str;

    /// Logical id of this resource.
    fn id(&self) -> &str;

    /// Literal reference (`{resourceType}/{id}`) to this resource.
    fn reference(&self) -> Reference {
        Reference::to(Self::RESOURCE_TYPE, self.id())
    }
}
