//! MedicationRequest and ServiceRequest resources.
//!
//! Every recommendation becomes exactly one request. Which of the two resource types it
//! becomes is decided by [`RequestKind`].

use crate::{CodeableConcept, FhirResource, Reference};
use serde::Serialize;
use tmr::RequestType;

/// Resource type a recommendation's care action is rendered as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Medication,
    Service,
}

impl RequestKind {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Medication => MedicationRequest::RESOURCE_TYPE,
            Self::Service => ServiceRequest::RESOURCE_TYPE,
        }
    }

    /// Reference to the request of this kind with logical id `id`.
    pub fn reference(&self, id: &str) -> Reference {
        Reference::to(self.resource_type(), id)
    }
}

impl From<RequestType> for RequestKind {
    fn from(request_type: RequestType) -> Self {
        match request_type {
            RequestType::Medication | RequestType::Vaccination => Self::Medication,
            RequestType::Service => Self::Service,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestIntent {
    Plan,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    pub id: String,
    pub status: RequestStatus,
    pub intent: RequestIntent,
    pub instantiates_uri: String,
    pub do_not_perform: bool,
    /// Condition of the main effect only; side-effect conditions are reachable through
    /// `forecast-effects`.
    pub reason_reference: Vec<Reference>,
    #[serde(rename = "forecast-effects")]
    pub forecast_effects: Vec<Reference>,
    pub medication_reference: Reference,
    pub subject: Reference,
    pub detected_issue: Vec<Reference>,
}

impl FhirResource for MedicationRequest {
    const RESOURCE_TYPE: &'static str = "MedicationRequest";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub status: RequestStatus,
    pub intent: RequestIntent,
    pub instantiates_uri: String,
    pub do_not_perform: bool,
    pub reason_reference: Vec<Reference>,
    #[serde(rename = "forecast-effects")]
    pub forecast_effects: Vec<Reference>,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub detected_issue: Vec<Reference>,
}

impl FhirResource for ServiceRequest {
    const RESOURCE_TYPE: &'static str = "ServiceRequest";

    fn id(&self) -> &str {
        &self.id
    }
}
