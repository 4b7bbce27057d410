//! Medication resource.

use crate::{CodeableConcept, FhirResource};
use serde::Serialize;

/// A drug or drug category a medication request points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub id: String,
    pub code: CodeableConcept,
}

impl FhirResource for Medication {
    const RESOURCE_TYPE: &'static str = "Medication";

    fn id(&self) -> &str {
        &self.id
    }
}
