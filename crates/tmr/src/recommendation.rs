//! Recommendations and the care actions they propose.

use crate::{CausationBelief, TmrError};
use serde::Deserialize;

/// Whether the guideline recommends performing the care action or advises against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suggestion {
    Recommend,
    Nonrecommend,
}

/// Kind of order a care action becomes.
///
/// Encoded on the wire as a small integer: `0` medication, `1` service, `2` vaccination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u64")]
pub enum RequestType {
    Medication,
    Service,
    Vaccination,
}

impl TryFrom<u64> for RequestType {
    type Error = TmrError;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Medication),
            1 => Ok(Self::Service),
            2 => Ok(Self::Vaccination),
            other => Err(TmrError::InvalidRequestType(other)),
        }
    }
}

impl RequestType {
    /// Wire code of this request type.
    pub fn code(&self) -> u64 {
        match self {
            Self::Medication => 0,
            Self::Service => 1,
            Self::Vaccination => 2,
        }
    }
}

/// The care action a recommendation is about.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareActionType {
    pub id: String,
    pub code: String,
    pub display: String,
    pub request_type: RequestType,
}

/// A guideline recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
    pub derived_from: String,
    pub suggestion: Suggestion,
    pub care_action_type: CareActionType,
    pub causation_beliefs: Vec<CausationBelief>,
}

impl Recommendation {
    pub fn is_nonrecommended(&self) -> bool {
        self.suggestion == Suggestion::Nonrecommend
    }

    pub fn request_type(&self) -> RequestType {
        self.care_action_type.request_type
    }
}
