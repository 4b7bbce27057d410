//! JSON fixtures shared by the unit tests.

use cds_types::PatientId;
use serde_json::{json, Value};

pub const NS: &str = "http://anonymous.org/data/";

pub fn patient() -> PatientId {
    PatientId::new("dummy").expect("patient")
}

pub fn situation(code: &str, situation_type: &str) -> Value {
    json!({
        "id": format!("{NS}{code}"),
        "type": situation_type,
        "value": { "code": code, "display": format!("situation {code}") }
    })
}

/// A belief moving the patient from `pre` to `post`. Situations are listed post-first.
pub fn belief(id: &str, pre: &str, post: &str, contribution: &str) -> Value {
    json!({
        "id": format!("{NS}{id}"),
        "contribution": contribution,
        "probability": "always",
        "evidence": "high-level",
        "author": "JDA",
        "transition": {
            "id": format!("{NS}Tr{pre}{post}"),
            "effect": "decrease",
            "property": {
                "id": format!("{NS}PropAls"),
                "code": "Als",
                "display": "airflow limitation severity"
            },
            "situationTypes": [
                situation(post, "hasExpectedSituation"),
                situation(pre, "hasTransformableSituation")
            ]
        }
    })
}

pub fn recommendation(id: &str, action: &str, request_type: u64, beliefs: Vec<Value>) -> Value {
    json!({
        "id": format!("{NS}{id}"),
        "text": format!("recommendation {id}"),
        "derivedFrom": "GOLD COPD 2017",
        "suggestion": "recommend",
        "careActionType": {
            "id": format!("{NS}{action}"),
            "code": action.trim_start_matches("Drug"),
            "display": format!("administration of {action}"),
            "requestType": request_type
        },
        "causationBeliefs": beliefs
    })
}

pub fn interaction(kind: &str, rec_ids: &[&str]) -> Value {
    let norms: Vec<Value> = rec_ids
        .iter()
        .map(|id| json!({ "recId": format!("{NS}{id}"), "type": "primary" }))
        .collect();
    json!({ "type": kind, "interactionNorms": norms })
}

pub fn document(recommendations: Vec<Value>, interactions: Vec<Value>) -> Value {
    json!({
        "guidelineGroup": {
            "id": "CIG-test",
            "interactions": interactions,
            "recommendations": recommendations
        }
    })
}

/// Aggregated COPD guideline group with shared effects and every interaction kind.
pub fn copd_document() -> Value {
    serde_json::from_str(include_str!("../fixtures/copd.json")).expect("fixture")
}
