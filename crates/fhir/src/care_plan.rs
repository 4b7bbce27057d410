//! CarePlan resource.

use crate::{FhirResource, Reference};
use crate::request::{RequestIntent, RequestStatus};
use serde::Serialize;

/// Aggregate plan referencing every request produced for a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CarePlan {
    pub id: String,
    pub status: RequestStatus,
    pub intent: RequestIntent,
    pub title: String,
    pub subject: Reference,
    /// One reference per recommendation, in recommendation order.
    pub activity: Vec<Reference>,
}

impl FhirResource for CarePlan {
    const RESOURCE_TYPE: &'static str = "CarePlan";

    fn id(&self) -> &str {
        &self.id
    }
}
