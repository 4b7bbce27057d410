//! Typed model of the TMR (Transition-based Medical Recommendation) documents.
//!
//! A TMR guideline group carries recommendations, the causation beliefs that motivate them,
//! and the interactions detected between recommendations. This crate turns JSON fragments of
//! such a document into strongly typed values.
//!
//! This crate focuses on:
//! - the shape and vocabulary of TMR terms (situations, beliefs, care actions, interactions)
//! - strict deserialisation that reports the failing path (e.g. `careActionType.requestType`)
//!
//! Presence checks with field-level error messages are the job of the schema validator in
//! `cds-core`; this crate assumes it is handed fragments that already passed that gate and
//! rejects anything whose values are out of vocabulary.

pub mod belief;
pub mod group;
pub mod interaction;
pub mod recommendation;

pub use belief::{
    CausationBelief, Contribution, Effect, Property, Situation, SituationPair, SituationType,
    SituationValue, Transition,
};
pub use group::GuidelineGroup;
pub use interaction::{Interaction, InteractionKind, InteractionNorm};
pub use recommendation::{CareActionType, Recommendation, RequestType, Suggestion};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors returned by the `tmr` crate.
#[derive(Debug, Error)]
pub enum TmrError {
    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid requestType {0} (expected 0, 1 or 2)")]
    InvalidRequestType(u64),
}

/// Type alias for Results that can fail with a [`TmrError`].
pub type TmrResult<T> = Result<T, TmrError>;

/// Deserialise a TMR fragment, surfacing the path of the first offending field.
///
/// `what` names the fragment in the error message (for example `recommendation`).
pub fn parse_value<T>(value: &serde_json::Value, what: &str) -> TmrResult<T>
where
    T: DeserializeOwned,
{
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(TmrError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}
