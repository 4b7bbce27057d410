use crate::{CdsError, CdsResult};
use fhir::{CodeableConcept, DetectedIssue, InteractionCodeTable, IssueStatus, Reference};
use tmr::{Interaction, InteractionKind};

/// Id of the issue raised for the interaction at `index` of the interaction list.
///
/// Stable only as long as the interaction list keeps its order.
pub fn issue_id(kind: InteractionKind, index: usize) -> String {
    format!("{kind}{index}")
}

/// Issue for one interaction.
///
/// `resolve` maps a norm's recommendation id to the request it became; one implicated
/// reference is produced per norm, in norm order.
pub fn build_detected_issue<F>(
    index: usize,
    interaction: &Interaction,
    codes: &InteractionCodeTable,
    mut resolve: F,
) -> CdsResult<DetectedIssue>
where
    F: FnMut(&str) -> CdsResult<Reference>,
{
    let coding = codes.get(interaction.kind).ok_or_else(|| {
        CdsError::InvalidInput(format!(
            "no issue coding configured for interaction kind '{}'",
            interaction.kind
        ))
    })?;

    let implicated = interaction
        .interaction_norms
        .iter()
        .map(|norm| resolve(&norm.rec_id))
        .collect::<CdsResult<Vec<_>>>()?;

    Ok(DetectedIssue {
        id: issue_id(interaction.kind, index),
        status: IssueStatus::Preliminary,
        code: CodeableConcept {
            coding: coding.interaction.clone(),
        },
        implicated,
        mitigation: coding.mitigation.clone(),
    })
}
