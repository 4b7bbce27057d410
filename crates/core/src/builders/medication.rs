use super::concept;
use crate::identifiers::strip_namespace;
use crate::CdsResult;
use fhir::Medication;
use tmr::CareActionType;

/// Medication for a care action, identified by the local part of the care action URI.
pub fn build_medication(care_action: &CareActionType) -> CdsResult<Medication> {
    Ok(Medication {
        id: strip_namespace(&care_action.id)?.to_owned(),
        code: concept(&care_action.id, &care_action.code, &care_action.display),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmr::RequestType;

    #[test]
    fn medication_carries_care_action_coding() {
        let care_action = CareActionType {
            id: "http://anonymous.org/data/DrugTLaba".into(),
            code: "Laba".into(),
            display: "administration of LABA bronchodilator".into(),
            request_type: RequestType::Medication,
        };
        let medication = build_medication(&care_action).expect("build");
        assert_eq!(medication.id, "DrugTLaba");
        assert_eq!(medication.code.coding[0].system, care_action.id);
        assert_eq!(medication.code.coding[0].code, "Laba");
    }
}
