//! Parameters resource.
//!
//! A flat, named list of values. Each parameter carries at most one of `valueId`,
//! `valueCoding` or `resource`, or nests further parameters under `part`.

use crate::{Bundle, Coding, List};
use serde::Serialize;

/// Resources that can be embedded in a parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterResource {
    Bundle(Bundle),
    List(List),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ParameterResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub part: Vec<Parameter>,
}

impl Parameter {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_id: None,
            value_coding: None,
            resource: None,
            part: Vec::new(),
        }
    }

    pub fn id(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_id: Some(value.into()),
            ..Self::named(name)
        }
    }

    pub fn coding(name: impl Into<String>, value: Coding) -> Self {
        Self {
            value_coding: Some(value),
            ..Self::named(name)
        }
    }

    pub fn resource(name: impl Into<String>, resource: impl Into<ParameterResource>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..Self::named(name)
        }
    }

    pub fn parts(name: impl Into<String>, part: Vec<Parameter>) -> Self {
        Self {
            part,
            ..Self::named(name)
        }
    }
}

impl From<Bundle> for ParameterResource {
    fn from(bundle: Bundle) -> Self {
        Self::Bundle(bundle)
    }
}

impl From<List> for ParameterResource {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

/// Always serialised with `resourceType: "Parameters"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "resourceType", rename = "Parameters")]
pub struct Parameters {
    pub id: String,
    pub parameter: Vec<Parameter>,
}

impl Parameters {
    pub fn new(id: impl Into<String>, parameter: Vec<Parameter>) -> Self {
        Self {
            id: id.into(),
            parameter,
        }
    }

    /// First top-level parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameter.iter().find(|p| p.name == name)
    }
}
