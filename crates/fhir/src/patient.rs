//! Patient resource.
//!
//! The advisory card bundle opens with the patient the recommendations were computed for.
//! Only identity and an optional birth date are carried; demographics live elsewhere.

use crate::FhirResource;
use cds_types::PatientId;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub active: bool,
    /// ISO 8601 date (YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Patient {
    pub fn new(patient: &PatientId, birth_date: Option<String>) -> Self {
        Self {
            id: patient.as_str().to_owned(),
            active: true,
            birth_date: birth_date.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl FhirResource for Patient {
    const RESOURCE_TYPE: &'static str = "Patient";

    fn id(&self) -> &str {
        &self.id
    }
}
