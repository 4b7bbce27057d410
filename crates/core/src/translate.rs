//! Translation orchestrator.
//!
//! Responsibilities:
//! - Run every validation gate before any resource is built
//! - Route each recommendation to the request registry of its kind
//! - Feed the Medication, Condition and ForecastEffect registries
//! - Raise one DetectedIssue per interaction once all requests exist
//! - Flatten the registries in the fixed output order
//!
//! Notes:
//! - All registries live on the stack of one call; nothing survives between translations
//! - Any failure aborts the whole call; no partial output is ever returned

use crate::builders::condition::build_condition;
use crate::builders::detected_issue::build_detected_issue;
use crate::builders::forecast_effect::build_forecast_effect;
use crate::builders::medication::build_medication;
use crate::builders::request::{build_medication_request, build_service_request, RequestContext};
use crate::identifiers::{compute_effect_id, resolve_situations, strip_namespace};
use crate::registry::Registry;
use crate::validation::{
    validate_causation_belief, validate_document, validate_interactions, validate_recommendation,
};
use crate::{CdsError, CdsResult, TranslatorConfig};
use cds_types::PatientId;
use fhir::{
    Condition, DetectedIssue, FhirResource, ForecastEffect, Medication, MedicationRequest,
    Reference, RequestKind, Resource, ServiceRequest,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tmr::{CareActionType, GuidelineGroup, Interaction, Recommendation};

/// Output of one translation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Medications, Conditions, ForecastEffects, requests, DetectedIssues, in that order.
    pub entries: Vec<Resource>,
    /// ServiceRequests followed by MedicationRequests.
    pub request_references: Vec<Resource>,
    /// Recommendation ids in document order.
    #[serde(skip)]
    pub recommendation_ids: Vec<String>,
}

/// Validate a TMR document and parse it into a typed guideline group.
///
/// Interactions are checked first, then each recommendation together with its beliefs, so
/// the first defect in document order is the one reported.
pub fn parse_group(document: &Value) -> CdsResult<GuidelineGroup> {
    let parts = validate_document(document)?;

    validate_interactions(parts.interactions)?;
    let interactions = parts
        .interactions
        .iter()
        .enumerate()
        .map(|(index, value)| {
            tmr::parse_value::<Interaction>(value, &format!("interactions[{index}]"))
                .map_err(CdsError::from)
        })
        .collect::<CdsResult<Vec<_>>>()?;

    let recommendations = parts
        .recommendations
        .iter()
        .map(parse_recommendation)
        .collect::<CdsResult<Vec<_>>>()?;

    Ok(GuidelineGroup {
        id: parts.id.map(str::to_owned),
        interactions,
        recommendations,
    })
}

fn parse_recommendation(value: &Value) -> CdsResult<Recommendation> {
    validate_recommendation(value)?;
    for belief in value["causationBeliefs"].as_array().into_iter().flatten() {
        validate_causation_belief(belief)?;
    }
    Ok(tmr::parse_value(value, "recommendation")?)
}

/// Translate a TMR document for `patient`.
pub fn translate(
    patient: &PatientId,
    document: &Value,
    config: &TranslatorConfig,
) -> CdsResult<Translation> {
    let group = parse_group(document)?;
    translate_group(patient, &group, config)
}

/// Translate an already parsed guideline group.
pub fn translate_group(
    patient: &PatientId,
    group: &GuidelineGroup,
    config: &TranslatorConfig,
) -> CdsResult<Translation> {
    let mut translator = Translator::new(patient, &group.interactions, config);
    for recommendation in &group.recommendations {
        translator.add_recommendation(recommendation)?;
    }
    let issues = translator.detected_issues()?;

    let translation = translator.finish(
        issues,
        group.recommendation_ids().into_iter().map(str::to_owned).collect(),
    );
    tracing::info!(
        "Translated guideline group {} for {}: {} resources, {} requests",
        group.id.as_deref().unwrap_or("<unnamed>"),
        patient,
        translation.entries.len(),
        translation.request_references.len()
    );
    Ok(translation)
}

struct Translator<'a> {
    patient: &'a PatientId,
    interactions: &'a [Interaction],
    config: &'a TranslatorConfig,
    medications: Registry<Medication>,
    conditions: Registry<Condition>,
    forecast_effects: Registry<ForecastEffect>,
    service_requests: Registry<ServiceRequest>,
    medication_requests: Registry<MedicationRequest>,
    /// Recommendation URI to the request it became.
    requests_by_recommendation: HashMap<String, Reference>,
    /// Request resource id to its reference, across both request kinds.
    requests_by_local_id: HashMap<String, Reference>,
    /// Medication resource id to the care-action code it was registered for.
    medication_codes: HashMap<String, String>,
}

impl<'a> Translator<'a> {
    fn new(
        patient: &'a PatientId,
        interactions: &'a [Interaction],
        config: &'a TranslatorConfig,
    ) -> Self {
        Self {
            patient,
            interactions,
            config,
            medications: Registry::new(),
            conditions: Registry::new(),
            forecast_effects: Registry::new(),
            service_requests: Registry::new(),
            medication_requests: Registry::new(),
            requests_by_recommendation: HashMap::new(),
            requests_by_local_id: HashMap::new(),
            medication_codes: HashMap::new(),
        }
    }

    fn add_recommendation(&mut self, recommendation: &Recommendation) -> CdsResult<()> {
        let kind = RequestKind::from(recommendation.request_type());
        let local_id = strip_namespace(&recommendation.id)?;

        if let Some(existing) = self.requests_by_local_id.get(local_id).cloned() {
            tracing::warn!(
                "Duplicate recommendation {} (routed to {}); keeping the first {}",
                recommendation.id,
                kind.resource_type(),
                existing.reference
            );
            self.requests_by_recommendation
                .entry(recommendation.id.clone())
                .or_insert_with(|| existing.clone());
            return self.add_beliefs(recommendation, &existing);
        }

        let request = kind.reference(local_id);
        let key = self.config.full_url(kind.resource_type(), local_id);
        let ctx = RequestContext {
            patient: self.patient,
            interactions: self.interactions,
        };

        tracing::debug!(
            "Routing recommendation {} to {}",
            recommendation.id,
            request.reference
        );

        match kind {
            RequestKind::Medication => {
                let medication = self.add_medication(&recommendation.care_action_type)?;
                self.medication_requests.upsert(
                    key,
                    || build_medication_request(recommendation, local_id, medication, ctx),
                    |_| {},
                )?;
            }
            RequestKind::Service => {
                self.service_requests.upsert(
                    key,
                    || build_service_request(recommendation, local_id, ctx),
                    |_| {},
                )?;
            }
        }

        self.requests_by_local_id
            .insert(local_id.to_owned(), request.clone());
        self.requests_by_recommendation
            .insert(recommendation.id.clone(), request.clone());

        self.add_beliefs(recommendation, &request)
    }

    /// Medication for a care action, keyed by its code. Returns a reference to it.
    ///
    /// Two codes whose care-action URIs share a local id would emit two Medications with the
    /// same id, so that is rejected.
    fn add_medication(&mut self, care_action: &CareActionType) -> CdsResult<Reference> {
        let key = self
            .config
            .full_url(Medication::RESOURCE_TYPE, &care_action.code);
        if self.medications.contains_key(&key) {
            return self.medication_reference(&key);
        }

        let id = strip_namespace(&care_action.id)?;
        if let Some(code) = self.medication_codes.get(id) {
            return Err(CdsError::InvalidInput(format!(
                "care action {} is coded both '{}' and '{}'",
                care_action.id, code, care_action.code
            )));
        }

        self.medications
            .upsert(key.as_str(), || build_medication(care_action), |_| {})?;
        self.medication_codes
            .insert(id.to_owned(), care_action.code.clone());
        self.medication_reference(&key)
    }

    fn medication_reference(&self, key: &str) -> CdsResult<Reference> {
        self.medications
            .get(key)
            .map(FhirResource::reference)
            .ok_or_else(|| CdsError::Reference(format!("medication {key} was not registered")))
    }

    fn add_beliefs(&mut self, recommendation: &Recommendation, request: &Reference) -> CdsResult<()> {
        let patient = self.patient;
        for (index, belief) in recommendation.causation_beliefs.iter().enumerate() {
            let pair = resolve_situations(&belief.transition.situation_types)?;

            let key = self
                .config
                .full_url(Condition::RESOURCE_TYPE, &pair.pre.value.code);
            self.conditions
                .upsert(key, || Ok(build_condition(pair.pre, patient)), |_| {})?;

            let effect_id = compute_effect_id(pair, index, belief.contribution);
            let key = self
                .config
                .full_url(ForecastEffect::RESOURCE_TYPE, &effect_id);
            self.forecast_effects.upsert(
                key,
                || {
                    Ok(build_forecast_effect(
                        effect_id,
                        belief,
                        pair,
                        index,
                        patient,
                        request.clone(),
                    ))
                },
                |effect| {
                    effect.add_care_action_instance(request.clone());
                },
            )?;
        }
        Ok(())
    }

    fn detected_issues(&self) -> CdsResult<Vec<DetectedIssue>> {
        self.interactions
            .iter()
            .enumerate()
            .map(|(index, interaction)| {
                build_detected_issue(
                    index,
                    interaction,
                    self.config.interaction_codes(),
                    |rec_id| self.resolve_norm(rec_id),
                )
            })
            .collect()
    }

    fn resolve_norm(&self, rec_id: &str) -> CdsResult<Reference> {
        if let Some(request) = self.requests_by_recommendation.get(rec_id) {
            return Ok(request.clone());
        }
        if self.config.strict_references() {
            return Err(CdsError::Reference(format!(
                "interaction names recommendation {rec_id}, which is not in the guideline group"
            )));
        }

        let fallback = RequestKind::Medication.reference(strip_namespace(rec_id)?);
        tracing::warn!(
            "Interaction names unknown recommendation {}; implicating {}",
            rec_id,
            fallback.reference
        );
        Ok(fallback)
    }

    fn finish(self, issues: Vec<DetectedIssue>, recommendation_ids: Vec<String>) -> Translation {
        let request_references: Vec<Resource> = self
            .service_requests
            .into_values()
            .into_iter()
            .map(Resource::from)
            .chain(
                self.medication_requests
                    .into_values()
                    .into_iter()
                    .map(Resource::from),
            )
            .collect();

        let entries = self
            .medications
            .into_values()
            .into_iter()
            .map(Resource::from)
            .chain(self.conditions.into_values().into_iter().map(Resource::from))
            .chain(
                self.forecast_effects
                    .into_values()
                    .into_iter()
                    .map(Resource::from),
            )
            .chain(request_references.iter().cloned())
            .chain(issues.into_iter().map(Resource::from))
            .collect();

        Translation {
            entries,
            request_references,
            recommendation_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, belief, document, interaction, patient, recommendation};
    use serde_json::json;
    use std::collections::HashSet;

    fn translate_default(document: &Value) -> CdsResult<Translation> {
        translate(&patient(), document, &TranslatorConfig::default())
    }

    fn ids_of(translation: &Translation, resource_type: &str) -> Vec<String> {
        translation
            .entries
            .iter()
            .filter(|r| r.resource_type() == resource_type)
            .map(|r| r.id().to_owned())
            .collect()
    }

    fn two_laba_recommendations() -> Value {
        document(
            vec![
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
                recommendation(
                    "R2",
                    "DrugTLama",
                    0,
                    vec![belief("CB2", "SitModAls", "SitMildAls", "positive")],
                ),
            ],
            vec![],
        )
    }

    #[test]
    fn shared_transition_yields_one_forecast_effect() {
        let translation = translate_default(&two_laba_recommendations()).expect("translate");

        assert_eq!(
            ids_of(&translation, "ForecastEffect"),
            ["SitModAls2SitMildAlsMp"]
        );
        assert_eq!(ids_of(&translation, "MedicationRequest"), ["R1", "R2"]);

        let Some(Resource::ForecastEffect(effect)) = translation
            .entries
            .iter()
            .find(|r| r.resource_type() == "ForecastEffect")
        else {
            panic!("expected a forecast effect");
        };
        let instances: Vec<_> = effect
            .care_action_instances()
            .iter()
            .map(|r| r.reference.as_str())
            .collect();
        assert_eq!(instances, ["MedicationRequest/R1", "MedicationRequest/R2"]);
    }

    #[test]
    fn different_rank_or_polarity_is_a_different_effect() {
        let document = document(
            vec![
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
                recommendation(
                    "R2",
                    "DrugTLama",
                    0,
                    vec![
                        belief("CB2", "SitSmoker", "SitNonSmoker", "positive"),
                        belief("CB3", "SitModAls", "SitMildAls", "positive"),
                    ],
                ),
                recommendation(
                    "R3",
                    "DrugTIcs",
                    0,
                    vec![belief("CB4", "SitModAls", "SitMildAls", "negative")],
                ),
            ],
            vec![],
        );
        let translation = translate_default(&document).expect("translate");
        assert_eq!(
            ids_of(&translation, "ForecastEffect"),
            [
                "SitModAls2SitMildAlsMp",
                "SitSmoker2SitNonSmokerMp",
                "SitModAls2SitMildAlsSp",
                "SitModAls2SitMildAlsMn"
            ]
        );
        assert_eq!(ids_of(&translation, "Condition"), ["SitModAls", "SitSmoker"]);
    }

    #[test]
    fn output_follows_fixed_resource_order() {
        let document = document(
            vec![
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
                recommendation(
                    "R2",
                    "NonDrugTSct",
                    1,
                    vec![belief("CB2", "SitSmoker", "SitNonSmoker", "positive")],
                ),
            ],
            vec![interaction("alternative", &["R1", "R2"])],
        );
        let translation = translate_default(&document).expect("translate");

        let types: Vec<_> = translation
            .entries
            .iter()
            .map(Resource::resource_type)
            .collect();
        assert_eq!(
            types,
            [
                "Medication",
                "Condition",
                "Condition",
                "ForecastEffect",
                "ForecastEffect",
                "ServiceRequest",
                "MedicationRequest",
                "DetectedIssue"
            ]
        );
        let requests: Vec<_> = translation
            .request_references
            .iter()
            .map(|r| r.reference().reference)
            .collect();
        assert_eq!(requests, ["ServiceRequest/R2", "MedicationRequest/R1"]);
        assert_eq!(
            translation.recommendation_ids,
            [
                "http://anonymous.org/data/R1",
                "http://anonymous.org/data/R2"
            ]
        );
    }

    #[test]
    fn contradiction_implicates_both_requests() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["interactions"] =
            json!([interaction("contradiction", &["R1", "R2"])]);

        let translation = translate_default(&document).expect("translate");
        let Some(Resource::DetectedIssue(issue)) = translation.entries.last() else {
            panic!("expected a detected issue last");
        };
        assert_eq!(issue.id, "contradiction0");
        let implicated: Vec<_> = issue
            .implicated
            .iter()
            .map(|r| r.reference.as_str())
            .collect();
        assert_eq!(implicated, ["MedicationRequest/R1", "MedicationRequest/R2"]);
        assert_eq!(issue.code.coding[0].code, "DACT");
        assert_eq!(issue.mitigation[0].action.coding[0].code, "13");

        for request in &translation.request_references {
            let Resource::MedicationRequest(request) = request else {
                panic!("expected medication requests");
            };
            assert_eq!(
                request.detected_issue,
                [Reference::to("DetectedIssue", "contradiction0")]
            );
        }
    }

    #[test]
    fn implicated_references_use_the_request_kind() {
        let document = document(
            vec![
                recommendation("R1", "DrugTLaba", 0, vec![]),
                recommendation("R2", "NonDrugTSct", 1, vec![]),
            ],
            vec![interaction("repairable", &["R2", "R1"])],
        );
        let translation = translate_default(&document).expect("translate");
        let Some(Resource::DetectedIssue(issue)) = translation.entries.last() else {
            panic!("expected a detected issue last");
        };
        assert_eq!(
            issue.implicated,
            [
                Reference::to("ServiceRequest", "R2"),
                Reference::to("MedicationRequest", "R1")
            ]
        );
    }

    #[test]
    fn detected_issue_counts_follow_interactions() {
        let translation =
            translate_default(&test_support::copd_document()).expect("translate");
        let document = test_support::copd_document();
        let interactions = document["guidelineGroup"]["interactions"]
            .as_array()
            .expect("array");

        let issues: Vec<_> = translation
            .entries
            .iter()
            .filter_map(|r| match r {
                Resource::DetectedIssue(issue) => Some(issue),
                _ => None,
            })
            .collect();
        assert_eq!(issues.len(), interactions.len());
        for (issue, interaction) in issues.iter().zip(interactions) {
            assert_eq!(
                issue.implicated.len(),
                interaction["interactionNorms"]
                    .as_array()
                    .expect("norms")
                    .len()
            );
        }
    }

    #[test]
    fn every_reference_resolves_within_the_output() {
        let translation =
            translate_default(&test_support::copd_document()).expect("translate");

        let present: HashSet<String> = translation
            .entries
            .iter()
            .map(|r| r.reference().reference)
            .collect();
        for resource in &translation.entries {
            for reference in resource.references() {
                if reference.target().map(|(t, _)| t) == Some("Patient") {
                    assert_eq!(reference.reference, "Patient/dummy");
                    continue;
                }
                assert!(
                    present.contains(&reference.reference),
                    "{}/{} references missing {}",
                    resource.resource_type(),
                    resource.id(),
                    reference.reference
                );
            }
        }
    }

    #[test]
    fn translation_is_deterministic() {
        let document = test_support::copd_document();
        let first = translate_default(&document).expect("first");
        let second = translate_default(&document).expect("second");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("render"),
            serde_json::to_string(&second).expect("render")
        );
    }

    #[test]
    fn missing_property_code_aborts_translation() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["recommendations"][1]["causationBeliefs"][0]["transition"]
            ["property"]
            .as_object_mut()
            .expect("object")
            .remove("code");

        let err = translate_default(&document).expect_err("should fail");
        match err {
            CdsError::Schema { field, owner, .. } => {
                assert_eq!(field, "code");
                assert_eq!(owner, "http://anonymous.org/data/CB2");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_norm_is_a_reference_error_when_strict() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["interactions"] =
            json!([interaction("repetition", &["R1", "R9"])]);

        let err = translate_default(&document).expect_err("should fail");
        assert_eq!(err.kind(), "reference");
        assert!(err.to_string().contains("R9"), "{err}");
    }

    #[test]
    fn unknown_norm_falls_back_when_relaxed() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["interactions"] =
            json!([interaction("repetition", &["R1", "R9"])]);
        let config = TranslatorConfig::new(
            "http://anonymous.org/".into(),
            fhir::InteractionCodeTable::default(),
            false,
            false,
            "plan".into(),
        )
        .expect("config");

        let translation = translate(&patient(), &document, &config).expect("translate");
        let Some(Resource::DetectedIssue(issue)) = translation.entries.last() else {
            panic!("expected a detected issue last");
        };
        assert_eq!(issue.implicated[1], Reference::to("MedicationRequest", "R9"));
    }

    #[test]
    fn duplicate_recommendation_keeps_first_request() {
        let document = document(
            vec![
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
            ],
            vec![],
        );
        let translation = translate_default(&document).expect("translate");
        assert_eq!(translation.request_references.len(), 1);
        assert_eq!(ids_of(&translation, "ForecastEffect").len(), 1);
        let Some(Resource::ForecastEffect(effect)) = translation
            .entries
            .iter()
            .find(|r| r.resource_type() == "ForecastEffect")
        else {
            panic!("expected a forecast effect");
        };
        assert_eq!(effect.care_action_instances().len(), 1);
    }

    #[test]
    fn duplicate_recommendation_across_request_kinds_keeps_first_request() {
        let document = document(
            vec![
                recommendation(
                    "R1",
                    "DrugTLaba",
                    0,
                    vec![belief("CB1", "SitModAls", "SitMildAls", "positive")],
                ),
                recommendation(
                    "R1",
                    "SctSmokingCessation",
                    1,
                    vec![belief("CB2", "SitSmoker", "SitNonSmoker", "positive")],
                ),
            ],
            vec![interaction("repetition", &["R1"])],
        );
        let translation = translate_default(&document).expect("translate");

        let requests: Vec<_> = translation
            .request_references
            .iter()
            .map(|r| r.reference().reference)
            .collect();
        assert_eq!(requests, ["MedicationRequest/R1"]);
        assert!(ids_of(&translation, "ServiceRequest").is_empty());

        // the second recommendation's belief still lands on the kept request
        let Some(Resource::ForecastEffect(effect)) = translation
            .entries
            .iter()
            .find(|r| r.resource_type() == "ForecastEffect" && r.id().starts_with("SitSmoker"))
        else {
            panic!("expected the smoking forecast effect");
        };
        assert_eq!(
            effect.care_action_instances(),
            [Reference::to("MedicationRequest", "R1")]
        );

        let Some(Resource::DetectedIssue(issue)) = translation.entries.last() else {
            panic!("expected a detected issue last");
        };
        assert_eq!(issue.implicated, [Reference::to("MedicationRequest", "R1")]);
    }

    #[test]
    fn care_action_coded_twice_is_rejected() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["recommendations"][1]["careActionType"]["id"] =
            format!("{}DrugTLaba", test_support::NS).into();

        let err = translate_default(&document).expect_err("should fail");
        assert_eq!(err.kind(), "invalid-input");
        assert!(err.to_string().contains("'TLaba' and 'TLama'"), "{err}");
    }

    #[test]
    fn numeric_probability_is_carried_as_text() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["recommendations"][0]["causationBeliefs"][0]["probability"] =
            json!(0.8);

        let translation = translate_default(&document).expect("translate");
        let Some(Resource::ForecastEffect(effect)) = translation
            .entries
            .iter()
            .find(|r| r.resource_type() == "ForecastEffect")
        else {
            panic!("expected a forecast effect");
        };
        assert_eq!(effect.probability, "0.8");
    }

    #[test]
    fn vaccination_is_a_medication_request() {
        let document = document(
            vec![recommendation(
                "RecFlu",
                "DrugTInfluenzaVaccine",
                2,
                vec![belief("CB1", "SitNoImmunity", "SitImmunity", "positive")],
            )],
            vec![],
        );
        let translation = translate_default(&document).expect("translate");
        assert_eq!(ids_of(&translation, "Medication"), ["DrugTInfluenzaVaccine"]);
        let Some(Resource::MedicationRequest(request)) = translation.request_references.first()
        else {
            panic!("expected a medication request");
        };
        assert_eq!(
            request.medication_reference,
            Reference::to("Medication", "DrugTInfluenzaVaccine")
        );
    }

    #[test]
    fn shared_medication_code_points_at_registered_medication() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["recommendations"][1]["careActionType"]["code"] =
            "TLaba".into();
        document["guidelineGroup"]["recommendations"][0]["careActionType"]["code"] =
            "TLaba".into();

        let translation = translate_default(&document).expect("translate");
        assert_eq!(ids_of(&translation, "Medication"), ["DrugTLaba"]);
        for request in &translation.request_references {
            let Resource::MedicationRequest(request) = request else {
                panic!("expected medication requests");
            };
            assert_eq!(
                request.medication_reference,
                Reference::to("Medication", "DrugTLaba")
            );
        }
    }

    #[test]
    fn invalid_request_type_is_a_tmr_error() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["recommendations"][0]["careActionType"]["requestType"] =
            7.into();
        let err = translate_default(&document).expect_err("should fail");
        assert_eq!(err.kind(), "tmr");
        assert!(err.to_string().contains("careActionType.requestType"), "{err}");
    }

    #[test]
    fn interactions_must_be_an_array() {
        let mut document = two_laba_recommendations();
        document["guidelineGroup"]["interactions"] = json!("none");
        let err = translate_default(&document).expect_err("should fail");
        assert_eq!(err.kind(), "structural");
    }

    #[test]
    fn translation_serializes_entries_and_request_references() {
        let translation = translate_default(&two_laba_recommendations()).expect("translate");
        let value = serde_json::to_value(&translation).expect("render");
        assert!(value["entries"].is_array());
        assert_eq!(value["requestReferences"][0]["resourceType"], "MedicationRequest");
        assert!(value.get("recommendationIds").is_none());
    }
}
