//! Resource union and bundle carriers.

use crate::{
    CarePlan, Condition, DetectedIssue, FhirError, FhirResource, FhirResult, ForecastEffect,
    Medication, MedicationRequest, Patient, Reference, ServiceRequest,
};
use serde::Serialize;

/// Any resource the engine emits, serialised with its `resourceType` tag first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Medication(Medication),
    Condition(Condition),
    ForecastEffect(ForecastEffect),
    MedicationRequest(MedicationRequest),
    ServiceRequest(ServiceRequest),
    DetectedIssue(DetectedIssue),
    CarePlan(CarePlan),
}

macro_rules! impl_from_resource {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Resource {
                fn from(resource: $variant) -> Self {
                    Resource::$variant(resource)
                }
            }
        )*
    };
}

impl_from_resource!(
    Patient,
    Medication,
    Condition,
    ForecastEffect,
    MedicationRequest,
    ServiceRequest,
    DetectedIssue,
    CarePlan,
);

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Patient(_) => Patient::RESOURCE_TYPE,
            Self::Medication(_) => Medication::RESOURCE_TYPE,
            Self::Condition(_) => Condition::RESOURCE_TYPE,
            Self::ForecastEffect(_) => ForecastEffect::RESOURCE_TYPE,
            Self::MedicationRequest(_) => MedicationRequest::RESOURCE_TYPE,
            Self::ServiceRequest(_) => ServiceRequest::RESOURCE_TYPE,
            Self::DetectedIssue(_) => DetectedIssue::RESOURCE_TYPE,
            Self::CarePlan(_) => CarePlan::RESOURCE_TYPE,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Patient(r) => r.id(),
            Self::Medication(r) => r.id(),
            Self::Condition(r) => r.id(),
            Self::ForecastEffect(r) => r.id(),
            Self::MedicationRequest(r) => r.id(),
            Self::ServiceRequest(r) => r.id(),
            Self::DetectedIssue(r) => r.id(),
            Self::CarePlan(r) => r.id(),
        }
    }

    /// Literal reference to this resource.
    pub fn reference(&self) -> Reference {
        Reference::to(self.resource_type(), self.id())
    }

    /// Every reference embedded in this resource, in field order.
    pub fn references(&self) -> Vec<&Reference> {
        match self {
            Self::Patient(_) | Self::Medication(_) => Vec::new(),
            Self::Condition(r) => vec![&r.subject],
            Self::ForecastEffect(r) => std::iter::once(&r.subject)
                .chain(r.applies_to.care_action_instance.iter())
                .chain(std::iter::once(&r.applies_to.condition_addressed))
                .collect(),
            Self::MedicationRequest(r) => r
                .reason_reference
                .iter()
                .chain(r.forecast_effects.iter())
                .chain([&r.medication_reference, &r.subject])
                .chain(r.detected_issue.iter())
                .collect(),
            Self::ServiceRequest(r) => r
                .reason_reference
                .iter()
                .chain(r.forecast_effects.iter())
                .chain(std::iter::once(&r.subject))
                .chain(r.detected_issue.iter())
                .collect(),
            Self::DetectedIssue(r) => r.implicated.iter().collect(),
            Self::CarePlan(r) => std::iter::once(&r.subject)
                .chain(r.activity.iter())
                .collect(),
        }
    }

    /// Render to plain JSON.
    pub fn render(&self) -> FhirResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            FhirError::Translation(format!(
                "Failed to render {}/{}: {e}",
                self.resource_type(),
                self.id()
            ))
        })
    }
}

/// One entry of a bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    pub resource: Resource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Collection,
}

/// A collection bundle, always serialised with `resourceType: "Bundle"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "resourceType", rename = "Bundle")]
pub struct Bundle {
    pub id: String,
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    pub fn collection(id: impl Into<String>, entry: Vec<BundleEntry>) -> Self {
        Self {
            id: id.into(),
            bundle_type: BundleType::Collection,
            entry,
        }
    }
}
