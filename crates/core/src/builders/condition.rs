use super::concept;
use cds_types::PatientId;
use fhir::{Condition, Reference};
use tmr::Situation;

/// Condition for the situation a care action transforms. Its id is the situation code.
pub fn build_condition(pre: &Situation, patient: &PatientId) -> Condition {
    Condition {
        id: pre.value.code.clone(),
        code: concept(&pre.id, &pre.value.code, &pre.value.display),
        subject: Reference::patient(patient),
    }
}
