use super::concept;
use cds_types::PatientId;
use fhir::{
    AppliesTo, Condition, EffectRank, EventType, FhirResource, ForecastEffect, Reference,
    TargetMeasurement,
};
use tmr::{CausationBelief, Contribution, SituationPair};

/// Forecast effect of one causation belief.
///
/// `request` is the first request the effect applies to; later ones are added by the
/// registry merge.
pub fn build_forecast_effect(
    id: String,
    belief: &CausationBelief,
    pair: SituationPair<'_>,
    belief_index: usize,
    patient: &PatientId,
    request: Reference,
) -> ForecastEffect {
    let property = &belief.transition.property;
    ForecastEffect {
        id,
        type_of_effect: EffectRank::from_belief_index(belief_index),
        type_of_event: match belief.contribution {
            Contribution::Positive => EventType::Therapeutic,
            Contribution::Negative => EventType::Adverse,
        },
        subject: Reference::patient(patient),
        applies_to: AppliesTo {
            care_action_instance: vec![request],
            condition_addressed: Reference::to(Condition::RESOURCE_TYPE, &pair.pre.value.code),
        },
        expected_outcome_code: concept(
            &pair.post.id,
            &pair.post.value.code,
            &pair.post.value.display,
        ),
        target_measurement: TargetMeasurement {
            measured_property: concept(&property.id, &property.code, &property.display),
            degree_of_change: belief.transition.effect.as_str().to_owned(),
        },
        probability: belief.probability.clone(),
        evidence: belief.evidence.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{compute_effect_id, resolve_situations};
    use crate::test_support;
    use tmr::parse_value;

    #[test]
    fn side_effect_with_negative_contribution_is_adverse() {
        let belief: CausationBelief = parse_value(
            &test_support::belief("CB1", "SitModAls", "SitMildAls", "negative"),
            "causationBelief",
        )
        .expect("parse");
        let pair = resolve_situations(&belief.transition.situation_types).expect("pair");
        let id = compute_effect_id(pair, 1, belief.contribution);

        let effect = build_forecast_effect(
            id,
            &belief,
            pair,
            1,
            &test_support::patient(),
            Reference::to("MedicationRequest", "R1"),
        );

        assert_eq!(effect.id, "SitModAls2SitMildAlsSn");
        assert_eq!(effect.type_of_effect, EffectRank::Side);
        assert_eq!(effect.type_of_event, EventType::Adverse);
        assert_eq!(
            effect.applies_to.condition_addressed.reference,
            "Condition/SitModAls"
        );
        assert_eq!(effect.expected_outcome_code.coding[0].code, "SitMildAls");
        assert_eq!(effect.target_measurement.measured_property.coding[0].code, "Als");
        assert_eq!(effect.target_measurement.degree_of_change, "decrease");
        assert_eq!(effect.probability, "always");
        assert_eq!(effect.evidence, "high-level");
        assert_eq!(effect.subject.reference, "Patient/dummy");
    }
}
