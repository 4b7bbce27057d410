//! MedicationRequest / ServiceRequest builders.
//!
//! A request lists one ForecastEffect per causation belief, in belief order, but only the
//! condition of the main effect (belief 0) as its reason. Conditions addressed by side
//! effects stay reachable through their ForecastEffect.

use super::concept;
use super::detected_issue::issue_id;
use crate::identifiers::{compute_effect_id, resolve_situations};
use crate::CdsResult;
use cds_types::PatientId;
use fhir::{
    Condition, DetectedIssue, FhirResource, ForecastEffect, MedicationRequest, Reference,
    RequestIntent, RequestStatus, ServiceRequest,
};
use tmr::{Interaction, Recommendation};

/// Inputs shared by every request of one translation.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext<'a> {
    pub patient: &'a PatientId,
    pub interactions: &'a [Interaction],
}

/// References a request derives from its causation beliefs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BeliefReferences {
    pub reasons: Vec<Reference>,
    pub forecast_effects: Vec<Reference>,
}

pub fn belief_references(recommendation: &Recommendation) -> CdsResult<BeliefReferences> {
    let mut refs = BeliefReferences::default();
    for (index, belief) in recommendation.causation_beliefs.iter().enumerate() {
        let pair = resolve_situations(&belief.transition.situation_types)?;
        if index == 0 {
            refs.reasons.push(Reference::to(
                Condition::RESOURCE_TYPE,
                &pair.pre.value.code,
            ));
        }
        refs.forecast_effects.push(Reference::to(
            ForecastEffect::RESOURCE_TYPE,
            &compute_effect_id(pair, index, belief.contribution),
        ));
    }
    Ok(refs)
}

/// DetectedIssues whose interaction names `rec_id`, once per interaction, in list order.
pub fn detected_issue_references(rec_id: &str, interactions: &[Interaction]) -> Vec<Reference> {
    interactions
        .iter()
        .enumerate()
        .filter(|(_, interaction)| interaction.involves(rec_id))
        .map(|(index, interaction)| {
            Reference::to(DetectedIssue::RESOURCE_TYPE, &issue_id(interaction.kind, index))
        })
        .collect()
}

pub fn build_medication_request(
    recommendation: &Recommendation,
    id: &str,
    medication: Reference,
    ctx: RequestContext<'_>,
) -> CdsResult<MedicationRequest> {
    let refs = belief_references(recommendation)?;
    Ok(MedicationRequest {
        id: id.to_owned(),
        status: RequestStatus::Active,
        intent: RequestIntent::Plan,
        instantiates_uri: recommendation.derived_from.clone(),
        do_not_perform: recommendation.is_nonrecommended(),
        reason_reference: refs.reasons,
        forecast_effects: refs.forecast_effects,
        medication_reference: medication,
        subject: Reference::patient(ctx.patient),
        detected_issue: detected_issue_references(&recommendation.id, ctx.interactions),
    })
}

pub fn build_service_request(
    recommendation: &Recommendation,
    id: &str,
    ctx: RequestContext<'_>,
) -> CdsResult<ServiceRequest> {
    let refs = belief_references(recommendation)?;
    let action = &recommendation.care_action_type;
    Ok(ServiceRequest {
        id: id.to_owned(),
        status: RequestStatus::Active,
        intent: RequestIntent::Plan,
        instantiates_uri: recommendation.derived_from.clone(),
        do_not_perform: recommendation.is_nonrecommended(),
        reason_reference: refs.reasons,
        forecast_effects: refs.forecast_effects,
        code: concept(&action.id, &action.code, &action.display),
        subject: Reference::patient(ctx.patient),
        detected_issue: detected_issue_references(&recommendation.id, ctx.interactions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, belief};
    use tmr::parse_value;

    fn recommendation(request_type: u64) -> Recommendation {
        let mut value = test_support::recommendation(
            "RecCOPD-LabaShould",
            "DrugTLaba",
            request_type,
            vec![
                belief("CB1", "SitModAls", "SitMildAls", "positive"),
                belief("CB2", "SitNoTachy", "SitTachy", "negative"),
            ],
        );
        value["suggestion"] = "nonrecommend".into();
        parse_value(&value, "recommendation").expect("parse")
    }

    fn interactions() -> Vec<Interaction> {
        [
            test_support::interaction("repetition", &["RecCOPD-LabaShould", "RecOther"]),
            test_support::interaction("alternative", &["RecA", "RecB"]),
            test_support::interaction(
                "contradiction",
                &["RecCOPD-LabaShould", "RecCOPD-LabaShould"],
            ),
        ]
        .iter()
        .map(|v| parse_value(v, "interaction").expect("parse"))
        .collect()
    }

    #[test]
    fn only_main_effect_condition_is_a_reason() {
        let refs = belief_references(&recommendation(0)).expect("refs");
        let reasons: Vec<_> = refs.reasons.iter().map(|r| r.reference.as_str()).collect();
        let effects: Vec<_> = refs
            .forecast_effects
            .iter()
            .map(|r| r.reference.as_str())
            .collect();
        assert_eq!(reasons, ["Condition/SitModAls"]);
        assert_eq!(
            effects,
            [
                "ForecastEffect/SitModAls2SitMildAlsMp",
                "ForecastEffect/SitNoTachy2SitTachySn"
            ]
        );
    }

    #[test]
    fn detected_issues_are_listed_once_per_interaction() {
        let refs = detected_issue_references(
            "http://anonymous.org/data/RecCOPD-LabaShould",
            &interactions(),
        );
        let refs: Vec<_> = refs.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(
            refs,
            ["DetectedIssue/repetition0", "DetectedIssue/contradiction2"]
        );
    }

    #[test]
    fn medication_request_points_at_medication() {
        let interactions = interactions();
        let patient = test_support::patient();
        let ctx = RequestContext {
            patient: &patient,
            interactions: &interactions,
        };
        let request = build_medication_request(
            &recommendation(0),
            "RecCOPD-LabaShould",
            Reference::to("Medication", "DrugTLaba"),
            ctx,
        )
        .expect("build");

        assert!(request.do_not_perform);
        assert_eq!(request.instantiates_uri, "GOLD COPD 2017");
        assert_eq!(request.medication_reference.reference, "Medication/DrugTLaba");
        assert_eq!(request.subject.reference, "Patient/dummy");
        assert_eq!(request.detected_issue.len(), 2);
    }

    #[test]
    fn service_request_carries_care_action_code() {
        let patient = test_support::patient();
        let ctx = RequestContext {
            patient: &patient,
            interactions: &[],
        };
        let request =
            build_service_request(&recommendation(1), "RecCOPD-LabaShould", ctx).expect("build");

        assert_eq!(request.code.coding[0].code, "Laba");
        assert_eq!(
            request.code.coding[0].system,
            "http://anonymous.org/data/DrugTLaba"
        );
        assert!(request.detected_issue.is_empty());
        assert_eq!(request.forecast_effects.len(), 2);
    }
}
