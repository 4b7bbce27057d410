//! FHIR general-purpose data types used by the emitted resources.

use cds_types::PatientId;
use serde::{Deserialize, Serialize};

/// A code defined by a terminology system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl Coding {
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: display.into(),
        }
    }
}

/// A concept carried as one or more codings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    pub fn single(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
        }
    }
}

/// A literal reference from one resource to another.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    /// Reference to `{resource_type}/{id}`.
    pub fn to(resource_type: &str, id: &str) -> Self {
        Self {
            reference: format!("{resource_type}/{id}"),
        }
    }

    pub fn patient(patient: &PatientId) -> Self {
        Self {
            reference: patient.reference(),
        }
    }

    /// Splits the reference into `(resourceType, id)`.
    ///
    /// Returns `None` for references that are not of the literal relative form.
    pub fn target(&self) -> Option<(&str, &str)> {
        let (resource_type, id) = self.reference.split_once('/')?;
        if resource_type.is_empty() || id.is_empty() || id.contains('/') {
            return None;
        }
        Some((resource_type, id))
    }
}
