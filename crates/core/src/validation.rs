//! Schema validation of TMR guideline groups.
//!
//! These checks run on the raw JSON before anything is deserialised into `tmr` types, so a
//! missing field is reported by name together with where it was expected and the id of the
//! object that lacks it. Nothing here repairs or defaults input.

use crate::{CdsError, CdsResult};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

const GROUP_FIELDS: [&str; 2] = ["interactions", "recommendations"];
const INTERACTION_FIELDS: [&str; 2] = ["type", "interactionNorms"];
const NORM_FIELDS: [&str; 2] = ["recId", "type"];
const RECOMMENDATION_FIELDS: [&str; 5] = [
    "id",
    "derivedFrom",
    "suggestion",
    "careActionType",
    "causationBeliefs",
];
const CARE_ACTION_FIELDS: [&str; 4] = ["id", "code", "display", "requestType"];
const BELIEF_FIELDS: [&str; 6] = [
    "id",
    "contribution",
    "probability",
    "evidence",
    "author",
    "transition",
];
const TRANSITION_FIELDS: [&str; 4] = ["id", "effect", "property", "situationTypes"];
const PROPERTY_FIELDS: [&str; 3] = ["id", "display", "code"];
const SITUATION_FIELDS: [&str; 3] = ["id", "type", "value"];
const SITUATION_VALUE_FIELDS: [&str; 2] = ["code", "display"];

const UNKNOWN_OWNER: &str = "<unknown>";

/// The two top-level arrays of a guideline group.
#[derive(Debug, Clone, Copy)]
pub struct GroupParts<'a> {
    pub id: Option<&'a str>,
    pub interactions: &'a [Value],
    pub recommendations: &'a [Value],
}

/// Check the document envelope and return its interaction and recommendation arrays.
///
/// The document must be `{ "guidelineGroup": { "interactions": [...], "recommendations":
/// [...] } }`.
pub fn validate_document(document: &Value) -> CdsResult<GroupParts<'_>> {
    let document = as_object(document, "document")?;
    let group = document
        .get("guidelineGroup")
        .filter(|v| !v.is_null())
        .ok_or_else(|| CdsError::schema("guidelineGroup", "document", UNKNOWN_OWNER))?;
    let group = as_object(group, "guidelineGroup")?;
    let id = group.get("id").and_then(Value::as_str);

    require_fields(group, &GROUP_FIELDS, "guidelineGroup", id.unwrap_or(UNKNOWN_OWNER))?;

    Ok(GroupParts {
        id,
        interactions: as_array(&group["interactions"], "interactions")?,
        recommendations: as_array(&group["recommendations"], "recommendations")?,
    })
}

/// Check every interaction has a `type` and an array of norms, each naming a recommendation.
pub fn validate_interactions(interactions: &[Value]) -> CdsResult<()> {
    for (index, interaction) in interactions.iter().enumerate() {
        let location = format!("interactions[{index}]");
        let object = as_object(interaction, &location)?;
        require_fields(object, &INTERACTION_FIELDS, &location, &index.to_string())?;

        let norms_location = format!("{location}.interactionNorms");
        let norms = as_array(&object["interactionNorms"], &norms_location)?;
        for (norm_index, norm) in norms.iter().enumerate() {
            let location = format!("{norms_location}[{norm_index}]");
            let norm = as_object(norm, &location)?;
            require_fields(norm, &NORM_FIELDS, &location, &index.to_string())?;
        }
    }
    Ok(())
}

/// Check a recommendation's own fields and its care action.
///
/// Causation beliefs are checked separately by [`validate_causation_belief`].
pub fn validate_recommendation(recommendation: &Value) -> CdsResult<()> {
    let object = as_object(recommendation, "recommendation")?;
    let owner = owner_id(object);
    require_fields(object, &RECOMMENDATION_FIELDS, "recommendation", owner)?;

    let care_action = as_object(&object["careActionType"], "careActionType")?;
    require_fields(care_action, &CARE_ACTION_FIELDS, "careActionType", owner)?;

    if !object["causationBeliefs"].is_array() {
        return Err(CdsError::Structural(format!(
            "causationBeliefs is not an array in recommendation {owner}"
        )));
    }
    Ok(())
}

/// Check a causation belief down to the values of its two situations.
pub fn validate_causation_belief(belief: &Value) -> CdsResult<()> {
    let object = as_object(belief, "causationBelief")?;
    let owner = owner_id(object);
    require_fields(object, &BELIEF_FIELDS, "causationBelief", owner)?;

    let transition = as_object(&object["transition"], "transition")?;
    require_fields(transition, &TRANSITION_FIELDS, "transition", owner)?;

    let property = as_object(&transition["property"], "transition.property")?;
    require_fields(property, &PROPERTY_FIELDS, "transition.property", owner)?;

    let situations = transition["situationTypes"].as_array().ok_or_else(|| {
        CdsError::Structural(format!(
            "situationTypes is not an array in causationBelief {owner}"
        ))
    })?;
    if situations.len() != 2 {
        return Err(CdsError::Structural(format!(
            "causationBelief {owner} must have exactly two situations, found {}",
            situations.len()
        )));
    }

    for (index, situation) in situations.iter().enumerate() {
        let location = format!("transition.situationTypes[{index}]");
        let situation = as_object(situation, &location)?;
        require_fields(situation, &SITUATION_FIELDS, &location, owner)?;

        let location = format!("{location}.value");
        let value = as_object(&situation["value"], &location)?;
        require_fields(value, &SITUATION_VALUE_FIELDS, &location, owner)?;
    }
    Ok(())
}

fn require_fields(object: &Object, fields: &[&str], location: &str, owner: &str) -> CdsResult<()> {
    match fields
        .iter()
        .find(|field| object.get(**field).is_none_or(Value::is_null))
    {
        Some(missing) => Err(CdsError::schema(*missing, location, owner)),
        None => Ok(()),
    }
}

fn owner_id(object: &Object) -> &str {
    object
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_OWNER)
}

fn as_object<'a>(value: &'a Value, location: &str) -> CdsResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| CdsError::Structural(format!("{location} is not an object")))
}

fn as_array<'a>(value: &'a Value, location: &str) -> CdsResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CdsError::Structural(format!("{location} is not an array")))
}
