//! ForecastEffect resource.
//!
//! A forecast effect is the predicted transition between two clinical situations. It is
//! identified by the transition, not by the recommendation proposing it, so one effect can
//! be shared by several requests; it keeps the list of those requests in
//! `appliesTo.careActionInstance`.

use crate::{CodeableConcept, FhirResource, Reference};
use serde::Serialize;

/// Whether the effect is the intended outcome of the care action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EffectRank {
    #[serde(rename = "main-effect")]
    Main,
    #[serde(rename = "side-effect")]
    Side,
}

impl EffectRank {
    /// The first belief of a recommendation carries its main effect.
    pub fn from_belief_index(index: usize) -> Self {
        if index == 0 {
            Self::Main
        } else {
            Self::Side
        }
    }
}

/// Whether the effect is desirable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EventType {
    #[serde(rename = "therapeutic-effect")]
    Therapeutic,
    #[serde(rename = "adverse-effect")]
    Adverse,
}

/// Requests the effect applies to and the condition it addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliesTo {
    pub care_action_instance: Vec<Reference>,
    pub condition_addressed: Reference,
}

/// Property the transition changes and in which direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMeasurement {
    pub measured_property: CodeableConcept,
    pub degree_of_change: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEffect {
    pub id: String,
    pub type_of_effect: EffectRank,
    pub type_of_event: EventType,
    pub subject: Reference,
    pub applies_to: AppliesTo,
    pub expected_outcome_code: CodeableConcept,
    pub target_measurement: TargetMeasurement,
    pub probability: String,
    pub evidence: String,
}

impl ForecastEffect {
    /// Records another request this effect applies to.
    ///
    /// Returns `false` if the request was already listed.
    pub fn add_care_action_instance(&mut self, request: Reference) -> bool {
        if self.applies_to.care_action_instance.contains(&request) {
            return false;
        }
        self.applies_to.care_action_instance.push(request);
        true
    }

    pub fn care_action_instances(&self) -> &[Reference] {
        &self.applies_to.care_action_instance
    }
}

impl FhirResource for ForecastEffect {
    const RESOURCE_TYPE: &'static str = "ForecastEffect";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coding;

    fn effect() -> ForecastEffect {
        ForecastEffect {
            id: "SitModAls2SitMildAlsMp".into(),
            type_of_effect: EffectRank::Main,
            type_of_event: EventType::Therapeutic,
            subject: Reference::to("Patient", "dummy"),
            applies_to: AppliesTo {
                care_action_instance: vec![Reference::to("MedicationRequest", "R1")],
                condition_addressed: Reference::to("Condition", "SitModAls"),
            },
            expected_outcome_code: CodeableConcept::single(Coding::new("s", "SitMildAls", "mild")),
            target_measurement: TargetMeasurement {
                measured_property: CodeableConcept::single(Coding::new("p", "Als", "als")),
                degree_of_change: "decrease".into(),
            },
            probability: "always".into(),
            evidence: "high-level".into(),
        }
    }

    #[test]
    fn rank_follows_belief_index() {
        assert_eq!(EffectRank::from_belief_index(0), EffectRank::Main);
        assert_eq!(EffectRank::from_belief_index(3), EffectRank::Side);
    }

    #[test]
    fn care_action_instances_are_not_repeated() {
        let mut effect = effect();
        assert!(effect.add_care_action_instance(Reference::to("ServiceRequest", "R2")));
        assert!(!effect.add_care_action_instance(Reference::to("MedicationRequest", "R1")));
        let ids: Vec<_> = effect
            .care_action_instances()
            .iter()
            .map(|r| r.reference.as_str())
            .collect();
        assert_eq!(ids, ["MedicationRequest/R1", "ServiceRequest/R2"]);
    }

    #[test]
    fn serializes_hyphenated_classifiers() {
        let value = serde_json::to_value(effect()).expect("serialize");
        assert_eq!(value["typeOfEffect"], "main-effect");
        assert_eq!(value["typeOfEvent"], "therapeutic-effect");
        assert_eq!(value["targetMeasurement"]["degreeOfChange"], "decrease");
        assert_eq!(
            value["appliesTo"]["conditionAddressed"]["reference"],
            "Condition/SitModAls"
        );
    }
}
