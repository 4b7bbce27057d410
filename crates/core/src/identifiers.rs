//! Deterministic identifiers for the generated resources.
//!
//! Ids depend only on the TMR content, never on process state, so translating the same
//! document twice yields the same ids.

use crate::{CdsError, CdsResult};
use tmr::{Contribution, Situation, SituationPair, SituationType};

/// Order the two situations of a transition as (pre, post).
///
/// # Errors
///
/// Returns [`CdsError::Structural`] unless exactly one situation is transformable and the
/// other expected.
pub fn resolve_situations(situations: &[Situation; 2]) -> CdsResult<SituationPair<'_>> {
    let [a, b] = situations;
    match (a.situation_type, b.situation_type) {
        (SituationType::Transformable, SituationType::Expected) => {
            Ok(SituationPair { pre: a, post: b })
        }
        (SituationType::Expected, SituationType::Transformable) => {
            Ok(SituationPair { pre: b, post: a })
        }
        _ => Err(CdsError::Structural(format!(
            "transition between {} and {} needs one transformable and one expected situation",
            a.id, b.id
        ))),
    }
}

/// Id of the forecast effect for a transition at a given belief rank and polarity.
///
/// `{pre}2{post}{M|S}{p|n}`: `M` for the first belief of a recommendation, `S` otherwise.
pub fn compute_effect_id(
    pair: SituationPair<'_>,
    belief_index: usize,
    contribution: Contribution,
) -> String {
    let rank = if belief_index == 0 { 'M' } else { 'S' };
    format!(
        "{}2{}{rank}{}",
        pair.pre.value.code,
        pair.post.value.code,
        contribution.initial()
    )
}

/// Local id of a concept URI: its last path segment (or fragment).
///
/// # Errors
///
/// Returns [`CdsError::InvalidInput`] if the URI has no non-empty trailing segment.
pub fn strip_namespace(uri: &str) -> CdsResult<&str> {
    let trimmed = uri.trim();
    let local = trimmed
        .rsplit(['/', '#'])
        .next()
        .unwrap_or(trimmed);
    if local.is_empty() || local.contains(char::is_whitespace) {
        return Err(CdsError::InvalidInput(format!(
            "cannot derive a local id from '{uri}'"
        )));
    }
    Ok(local)
}
