//! Causation beliefs and the clinical situations they connect.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Polarity of a causation belief.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contribution {
    Positive,
    Negative,
}

impl Contribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    /// First character of the wire value, used in composite identifiers.
    pub fn initial(&self) -> char {
        match self {
            Self::Positive => 'p',
            Self::Negative => 'n',
        }
    }
}

/// Direction in which a transition moves the measured property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Increase,
    Decrease,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

/// Role a situation plays within a transition.
///
/// Guideline exports spell these `hasTransformableSituation` / `hasExpectedSituation`;
/// the bare names are accepted as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SituationType {
    #[serde(rename = "hasTransformableSituation", alias = "TransformableSituation")]
    Transformable,
    #[serde(rename = "hasExpectedSituation", alias = "ExpectedSituation")]
    Expected,
}

/// Code and label of a situation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SituationValue {
    pub code: String,
    pub display: String,
}

/// A clinical situation, identified by a concept URI.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Situation {
    pub id: String,
    #[serde(rename = "type")]
    pub situation_type: SituationType,
    pub value: SituationValue,
}

/// The property a transition acts on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Property {
    pub id: String,
    pub code: String,
    pub display: String,
}

/// A change from one situation to another.
///
/// `situation_types` holds the two situations in no particular order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: String,
    pub effect: Effect,
    pub property: Property,
    pub situation_types: [Situation; 2],
}

/// Assertion that a care action promotes a transition.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CausationBelief {
    pub id: String,
    pub contribution: Contribution,
    #[serde(deserialize_with = "scalar_text")]
    pub probability: String,
    #[serde(deserialize_with = "scalar_text")]
    pub evidence: String,
    pub author: String,
    pub transition: Transition,
}

/// Accept a string, number or boolean and keep its text form (`0.8` becomes `"0.8"`).
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarText;

    impl Visitor<'_> for ScalarText {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarText)
}

/// The two situations of a transition, ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SituationPair<'a> {
    /// The situation the care action transforms.
    pub pre: &'a Situation,
    /// The situation expected afterwards.
    pub post: &'a Situation,
}
