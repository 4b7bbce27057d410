//! DetectedIssue resource and the interaction coding table.
//!
//! Responsibilities:
//! - Define the DetectedIssue wire model
//! - Hold the interaction-kind → {issue coding, mitigation} lookup data
//! - Parse replacement lookup data from YAML, enforcing that every kind is covered
//!
//! Notes:
//! - The built-in table is the default; deployments may inject their own

use crate::{CodeableConcept, Coding, FhirError, FhirResource, FhirResult, Reference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tmr::InteractionKind;

// ============================================================================
// Resource
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Preliminary,
}

/// An action taken or advised to address an issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mitigation {
    pub action: CodeableConcept,
}

/// A conflict, duplication or alternative between two or more requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetectedIssue {
    pub id: String,
    pub status: IssueStatus,
    pub code: CodeableConcept,
    pub implicated: Vec<Reference>,
    pub mitigation: Vec<Mitigation>,
}

impl FhirResource for DetectedIssue {
    const RESOURCE_TYPE: &'static str = "DetectedIssue";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Interaction coding table
// ============================================================================

/// Issue codings and mitigation actions for one interaction kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueCoding {
    pub interaction: Vec<Coding>,
    pub mitigation: Vec<Mitigation>,
}

impl IssueCoding {
    fn single(interaction: Coding, mitigation: Coding) -> Self {
        Self {
            interaction: vec![interaction],
            mitigation: vec![Mitigation {
                action: CodeableConcept::single(mitigation),
            }],
        }
    }
}

/// Lookup data from interaction kind to issue/mitigation codings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionCodeTable {
    entries: BTreeMap<InteractionKind, IssueCoding>,
}

const ANONYMOUS_INTERACTIONS: &str = "http://anonymous.org/CodeSystem/interactions";
/// Repairable interactions are published under a lowercase `codeSystem` path.
const ANONYMOUS_REPAIR_INTERACTIONS: &str = "http://anonymous.org/codeSystem/interactions";
const HL7_ACT_CODE: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";

impl Default for InteractionCodeTable {
    fn default() -> Self {
        let not_required =
            |system: &str| Coding::new(system, "NOTREQ", "Mitigation Not Required");
        let stopped_concurrent =
            || Coding::new(HL7_ACT_CODE, "13", "Stopped Concurrent Therapy");

        let entries = BTreeMap::from([
            (
                InteractionKind::Alternative,
                IssueCoding::single(
                    Coding::new(
                        ANONYMOUS_INTERACTIONS,
                        "ALTHRPY",
                        "Alternative Therapies With Same Intended Effect",
                    ),
                    not_required(ANONYMOUS_INTERACTIONS),
                ),
            ),
            (
                InteractionKind::Contradiction,
                IssueCoding::single(
                    Coding::new(HL7_ACT_CODE, "DACT", "Drug Action Detected Issue"),
                    stopped_concurrent(),
                ),
            ),
            (
                InteractionKind::Repetition,
                IssueCoding::single(
                    Coding::new(HL7_ACT_CODE, "DUPTHPY", "Duplicate Therapy Alert"),
                    stopped_concurrent(),
                ),
            ),
            (
                InteractionKind::Repairable,
                IssueCoding::single(
                    Coding::new(
                        ANONYMOUS_REPAIR_INTERACTIONS,
                        "INVEFFCT",
                        "Adverse and therapeutic therapies with inverse effect",
                    ),
                    not_required(ANONYMOUS_REPAIR_INTERACTIONS),
                ),
            ),
        ]);

        Self { entries }
    }
}

impl InteractionCodeTable {
    /// Build a table from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] if any interaction kind has no entry or an entry
    /// has no interaction coding.
    pub fn new(entries: BTreeMap<InteractionKind, IssueCoding>) -> FhirResult<Self> {
        let missing: Vec<&str> = InteractionKind::ALL
            .iter()
            .filter(|kind| !entries.contains_key(kind))
            .map(|kind| kind.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(FhirError::InvalidInput(format!(
                "interaction code table has no entry for: {}",
                missing.join(", ")
            )));
        }

        if let Some((kind, _)) = entries.iter().find(|(_, c)| c.interaction.is_empty()) {
            return Err(FhirError::InvalidInput(format!(
                "interaction code table entry '{kind}' has no interaction coding"
            )));
        }

        Ok(Self { entries })
    }

    /// Parse a table from YAML text.
    ///
    /// The YAML is a mapping from interaction kind (`alternative`, `contradiction`,
    /// `repetition`, `repairable`) to `{ interaction: [Coding], mitigation: [{ action:
    /// { coding: [Coding] } }] }`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] with the failing path when the YAML does not match
    /// that shape, or [`FhirError::InvalidInput`] when a kind is missing.
    pub fn from_yaml(yaml_text: &str) -> FhirResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let entries = match serde_path_to_error::deserialize::<
            _,
            BTreeMap<InteractionKind, IssueCoding>,
        >(deserializer)
        {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "Interaction code table schema mismatch at {path}: {source}"
                )));
            }
        };

        Self::new(entries)
    }

    /// Render the table as YAML text.
    pub fn to_yaml(&self) -> FhirResult<String> {
        serde_yaml::to_string(&self.entries).map_err(|e| {
            FhirError::Translation(format!("Failed to serialize interaction code table: {e}"))
        })
    }

    pub fn get(&self, kind: InteractionKind) -> Option<&IssueCoding> {
        self.entries.get(&kind)
    }
}
