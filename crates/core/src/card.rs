//! Advisory card envelope.
//!
//! Wraps a translation and its care plan into the card a decision-support front end shows:
//! one card, one suggestion, one "update" action whose resource is a collection bundle of
//! the patient, every translated resource and the care plan.

use crate::care_plan::assemble_care_plan;
use crate::constants::{
    DEFAULT_ACTION_DESCRIPTION, DEFAULT_BUNDLE_ID, DEFAULT_CARD_SUMMARY, DEFAULT_CARD_UUID,
    DEFAULT_SOURCE_LABEL, DEFAULT_SUGGESTION_LABEL,
};
use crate::translate::translate;
use crate::{CdsResult, TranslatorConfig};
use cds_types::PatientId;
use fhir::{Bundle, BundleEntry, Patient, Resource};
use serde::Serialize;
use serde_json::Value;

/// Presentation overrides for [`create_card`]. `None` fields fall back to the defaults.
#[derive(Clone, Debug, Default)]
pub struct CardOptions {
    pub summary: Option<String>,
    pub source_label: Option<String>,
    pub suggestion_label: Option<String>,
    pub action_description: Option<String>,
    pub bundle_id: Option<String>,
    pub care_plan_title: Option<String>,
    pub birth_date: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Update,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SelectionBehaviour {
    #[serde(rename = "at-most-one")]
    AtMostOne,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Source {
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Action<R = Bundle> {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub description: String,
    pub resource: R,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion<R = Bundle> {
    pub label: String,
    pub uuid: String,
    pub actions: Vec<Action<R>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card<R = Bundle> {
    pub summary: String,
    pub indicator: Indicator,
    pub source: Source,
    pub suggestions: Vec<Suggestion<R>>,
    pub selection_behaviour: SelectionBehaviour,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardResponse<R = Bundle> {
    pub cards: Vec<Card<R>>,
}

impl<R> CardResponse<R> {
    /// The resource carried by the first action of the first suggestion.
    pub fn resource(&self) -> Option<&R> {
        self.cards
            .first()?
            .suggestions
            .first()?
            .actions
            .first()
            .map(|action| &action.resource)
    }
}

impl CardResponse {
    pub fn bundle(&self) -> Option<&Bundle> {
        self.resource()
    }
}

/// Texts shown around the single suggestion of a card.
pub(crate) struct CardTexts {
    pub summary: String,
    pub source_label: String,
    pub suggestion_label: String,
    pub action_description: String,
}

/// Wrap `resource` into a one-card, one-suggestion, one-update-action response.
pub(crate) fn single_update_card<R>(
    texts: CardTexts,
    cig_id: Option<&str>,
    resource: R,
) -> CardResponse<R> {
    let uuid = cig_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_CARD_UUID);

    let card = Card {
        summary: texts.summary,
        indicator: Indicator::Info,
        source: Source {
            label: texts.source_label,
        },
        suggestions: vec![Suggestion {
            label: texts.suggestion_label,
            uuid: uuid.to_owned(),
            actions: vec![Action {
                action_type: ActionType::Update,
                description: texts.action_description,
                resource,
            }],
        }],
        selection_behaviour: SelectionBehaviour::AtMostOne,
    };

    CardResponse { cards: vec![card] }
}

/// Translate `document` for `patient` and wrap the result into an advisory card.
///
/// `cig_id` becomes the suggestion uuid.
pub fn create_card(
    patient: &PatientId,
    cig_id: Option<&str>,
    document: &Value,
    options: &CardOptions,
    config: &TranslatorConfig,
) -> CdsResult<CardResponse> {
    let translation = translate(patient, document, config)?;

    let title = options
        .care_plan_title
        .as_deref()
        .unwrap_or(config.care_plan_title());
    let care_plan = assemble_care_plan(
        patient,
        title,
        &translation.recommendation_ids,
        &translation.request_references,
    )?;

    let resources = std::iter::once(Resource::from(Patient::new(
        patient,
        options.birth_date.clone(),
    )))
    .chain(translation.entries)
    .chain(std::iter::once(Resource::from(care_plan)));
    let entry = resources
        .map(|resource| BundleEntry {
            full_url: config
                .emit_full_urls()
                .then(|| config.full_url(resource.resource_type(), resource.id())),
            resource,
        })
        .collect();

    let bundle = Bundle::collection(
        options.bundle_id.as_deref().unwrap_or(DEFAULT_BUNDLE_ID),
        entry,
    );

    let texts = CardTexts {
        summary: or_default(&options.summary, DEFAULT_CARD_SUMMARY),
        source_label: or_default(&options.source_label, DEFAULT_SOURCE_LABEL),
        suggestion_label: or_default(&options.suggestion_label, DEFAULT_SUGGESTION_LABEL),
        action_description: or_default(&options.action_description, DEFAULT_ACTION_DESCRIPTION),
    };

    Ok(single_update_card(texts, cig_id, bundle))
}

pub(crate) fn or_default(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_owned()
}
