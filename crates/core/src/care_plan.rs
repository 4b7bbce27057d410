//! Care-plan assembly.

use crate::constants::CARE_PLAN_INDEX;
use crate::identifiers::strip_namespace;
use crate::{CdsError, CdsResult};
use cds_types::PatientId;
use fhir::{CarePlan, Reference, RequestIntent, RequestStatus, Resource};

/// Build the aggregate care plan for one translation.
///
/// Activities follow `recommendation_ids`; each id is matched by its local part against the
/// requests of the same translation.
///
/// # Errors
///
/// Returns [`CdsError::Reference`] if a recommendation has no request. That only happens
/// when the ids and requests come from different translations.
pub fn assemble_care_plan<S>(
    patient: &PatientId,
    title: &str,
    recommendation_ids: &[S],
    request_references: &[Resource],
) -> CdsResult<CarePlan>
where
    S: AsRef<str>,
{
    let activity = recommendation_ids
        .iter()
        .map(|rec_id| {
            let rec_id = rec_id.as_ref();
            let local_id = strip_namespace(rec_id)?;
            request_references
                .iter()
                .find(|request| request.id() == local_id)
                .map(Resource::reference)
                .ok_or_else(|| {
                    CdsError::Reference(format!("no request was built for recommendation {rec_id}"))
                })
        })
        .collect::<CdsResult<Vec<Reference>>>()?;

    Ok(CarePlan {
        id: format!("CarePlan{CARE_PLAN_INDEX}"),
        status: RequestStatus::Active,
        intent: RequestIntent::Plan,
        title: title.to_owned(),
        subject: Reference::patient(patient),
        activity,
    })
}
