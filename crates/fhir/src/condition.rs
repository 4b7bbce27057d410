//! Condition resource.

use crate::{CodeableConcept, FhirResource, Reference};
use serde::Serialize;

/// A clinical situation a care action addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub id: String,
    pub code: CodeableConcept,
    pub subject: Reference,
}

impl FhirResource for Condition {
    const RESOURCE_TYPE: &'static str = "Condition";

    fn id(&self) -> &str {
        &self.id
    }
}
