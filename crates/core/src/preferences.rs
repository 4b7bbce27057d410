//! COPD medication-preference card.
//!
//! Besides the care-plan card, the COPD assessment front end receives a `Parameters` payload
//! holding, for each GOLD 2017 group, the guideline's ranked medication preferences. Every
//! preference is a `List` of references into one shared medication bundle.

use crate::card::{or_default, single_update_card, CardResponse, CardTexts};
use crate::constants::{
    DEFAULT_DATA_NAMESPACE, MEDICATION_BUNDLE_ID, PREFERENCES_ACTION_DESCRIPTION,
    PREFERENCES_CARD_SUMMARY, PREFERENCES_PARAMETERS_ID, PREFERENCES_SOURCE_LABEL,
    PREFERENCES_SUGGESTION_LABEL, SNOMED_SYSTEM,
};
use crate::{CdsError, CdsResult};
use cds_types::PatientId;
use fhir::{
    Bundle, BundleEntry, CodeableConcept, Coding, FhirResource, List, Medication, Parameter,
    Parameters, Reference, Resource,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const ASSESSED_STAGE_PARAMETER: &str = "assessedCopdStage";
const GROUP_CODE_PARAMETER: &str = "code";

/// `(id, code, display)` of the medications offered to the assessment front end.
const COPD_MEDICATIONS: [(&str, &str, &str); 9] = [
    (
        "DrugCatSabaSama",
        "SabaSama",
        "medication containing a combination of SABA and SAMA",
    ),
    ("DrugTSaba", "Saba", "medication containing SABA"),
    ("DrugTSama", "Sama", "medication containing SAMA"),
    (
        "DrugCatLabaLama",
        "LabaLama",
        "medication containing a combination of LABA and LAMA",
    ),
    ("DrugTLaba", "Laba", "medication containing LABA"),
    ("DrugTLama", "Lama", "medication containing LAMA"),
    (
        "DrugCatLabaIcs",
        "LabaIcs",
        "medication containing a combination of LABA and ICS",
    ),
    (
        "DrugCatLabaLamaIcs",
        "LabaLamaIcs",
        "medication containing a combination of LABA, LAMA and ICS",
    ),
    ("DrugTIcs", "Ics", "medication containing ICS"),
];

/// Alternative spellings of combination codes.
const COPD_ALIASES: [(&str, &str); 2] = [
    ("LamaLaba", "DrugCatLabaLama"),
    ("LamaLabaIcs", "DrugCatLabaLamaIcs"),
];

/// GOLD 2017 COPD group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopdGroup {
    A,
    B,
    C,
    D,
}

impl CopdGroup {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// SNOMED CT concept id of the group.
    pub fn snomed_code(self) -> u64 {
        match self {
            Self::A => 1097871000000101,
            Self::B => 1097881000000104,
            Self::C => 1097891000000102,
            Self::D => 1097901000000101,
        }
    }

    pub fn from_snomed_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.snomed_code() == code)
    }

    pub fn display(self) -> &'static str {
        match self {
            Self::A => "Global Initiative for Chronic Obstructive Lung Disease 2017 group A",
            Self::B => "Global Initiative for Chronic Obstructive Lung Disease 2017 group B",
            Self::C => "Global Initiative for Chronic Obstructive Lung Disease 2017 group C",
            Self::D => "Global Initiative for Chronic Obstructive Lung Disease 2017 group D",
        }
    }

    /// Name of the parameter carrying this group's preferences.
    pub fn parameter_name(self) -> &'static str {
        match self {
            Self::A => "copdGroupA",
            Self::B => "copdGroupB",
            Self::C => "copdGroupC",
            Self::D => "copdGroupD",
        }
    }

    fn coding(self) -> Coding {
        Coding::new(SNOMED_SYSTEM, self.snomed_code().to_string(), self.display())
    }
}

/// Ranked medication preferences per COPD group.
///
/// Each inner list is one preference and names medication codes, e.g. `["Laba", "Lama"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupPreferences {
    pub group_a: Vec<Vec<String>>,
    pub group_b: Vec<Vec<String>>,
    pub group_c: Vec<Vec<String>>,
    pub group_d: Vec<Vec<String>>,
}

impl GroupPreferences {
    pub fn for_group(&self, group: CopdGroup) -> &[Vec<String>] {
        match group {
            CopdGroup::A => &self.group_a,
            CopdGroup::B => &self.group_b,
            CopdGroup::C => &self.group_c,
            CopdGroup::D => &self.group_d,
        }
    }
}

/// Parse `{ groupA, groupB, groupC, groupD }`, reporting the path of the first bad field.
pub fn parse_preferences(value: &Value) -> CdsResult<GroupPreferences> {
    serde_path_to_error::deserialize::<_, GroupPreferences>(value).map_err(|err| {
        let path = err.path().to_string();
        CdsError::InvalidInput(format!("preferences at {path}: {}", err.into_inner()))
    })
}

/// Medications the preference lists may name, keyed by medication code.
#[derive(Clone, Debug)]
pub struct MedicationCatalogue {
    medications: Vec<Medication>,
    ids_by_code: HashMap<String, String>,
}

impl Default for MedicationCatalogue {
    fn default() -> Self {
        let medications = COPD_MEDICATIONS
            .iter()
            .map(|(id, code, display)| Medication {
                id: (*id).to_owned(),
                code: CodeableConcept::single(Coding::new(
                    format!("{DEFAULT_DATA_NAMESPACE}{id}"),
                    *code,
                    *display,
                )),
            })
            .collect();

        let mut catalogue = Self::new(medications);
        for (code, id) in COPD_ALIASES {
            catalogue.ids_by_code.insert(code.to_owned(), id.to_owned());
        }
        catalogue
    }
}

impl MedicationCatalogue {
    /// Index `medications` by the code of each of their codings.
    pub fn new(medications: Vec<Medication>) -> Self {
        let ids_by_code = medications
            .iter()
            .flat_map(|medication| {
                medication
                    .code
                    .coding
                    .iter()
                    .map(|coding| (coding.code.clone(), medication.id.clone()))
            })
            .collect();
        Self {
            medications,
            ids_by_code,
        }
    }

    /// Also resolve `code` to the medication `id`.
    pub fn with_alias(mut self, code: impl Into<String>, id: &str) -> CdsResult<Self> {
        let code = code.into();
        if !self.medications.iter().any(|medication| medication.id == id) {
            return Err(CdsError::InvalidInput(format!(
                "alias {code} names unknown medication {id}"
            )));
        }
        self.ids_by_code.insert(code, id.to_owned());
        Ok(self)
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn resolve(&self, code: &str) -> Option<Reference> {
        self.ids_by_code
            .get(code)
            .map(|id| Reference::to(Medication::RESOURCE_TYPE, id))
    }

    fn bundle(&self) -> Bundle {
        let entry = self
            .medications
            .iter()
            .cloned()
            .map(|medication| BundleEntry {
                full_url: None,
                resource: Resource::from(medication),
            })
            .collect();
        Bundle::collection(MEDICATION_BUNDLE_ID, entry)
    }
}

/// Presentation overrides for [`create_preferences_card`].
#[derive(Clone, Debug, Default)]
pub struct PreferenceCardOptions {
    pub summary: Option<String>,
    pub source_label: Option<String>,
    pub suggestion_label: Option<String>,
    pub action_description: Option<String>,
    pub parameters_id: Option<String>,
}

/// Build the medication-preference card for `patient`.
///
/// `assessed_group` is the SNOMED CT code of the COPD group the patient was assessed in.
///
/// # Errors
///
/// Returns [`CdsError::InvalidInput`] if `assessed_group` is not a GOLD 2017 group code, a
/// preference is empty, or a preference names a code missing from `catalogue`.
pub fn create_preferences_card(
    patient: &PatientId,
    cig_id: Option<&str>,
    assessed_group: u64,
    preferences: &GroupPreferences,
    options: &PreferenceCardOptions,
    catalogue: &MedicationCatalogue,
) -> CdsResult<CardResponse<Parameters>> {
    let assessed = CopdGroup::from_snomed_code(assessed_group).ok_or_else(|| {
        CdsError::InvalidInput(format!(
            "{assessed_group} is not a GOLD 2017 COPD group code"
        ))
    })?;

    let mut parameter = vec![
        Parameter::id("patient", patient.as_str()),
        Parameter::resource(MEDICATION_BUNDLE_ID, catalogue.bundle()),
        Parameter::coding(ASSESSED_STAGE_PARAMETER, assessed.coding()),
    ];
    for group in CopdGroup::ALL {
        parameter.push(group_parameter(
            group,
            preferences.for_group(group),
            catalogue,
        )?);
    }

    tracing::info!(
        "Built medication preferences for patient {} (assessed {:?}, {} medications)",
        patient,
        assessed,
        catalogue.medications().len()
    );

    let parameters = Parameters::new(
        options
            .parameters_id
            .as_deref()
            .unwrap_or(PREFERENCES_PARAMETERS_ID),
        parameter,
    );
    let texts = CardTexts {
        summary: or_default(&options.summary, PREFERENCES_CARD_SUMMARY),
        source_label: or_default(&options.source_label, PREFERENCES_SOURCE_LABEL),
        suggestion_label: or_default(&options.suggestion_label, PREFERENCES_SUGGESTION_LABEL),
        action_description: or_default(
            &options.action_description,
            PREFERENCES_ACTION_DESCRIPTION,
        ),
    };

    Ok(single_update_card(texts, cig_id, parameters))
}

/// `{ name: copdGroupX, part: [code, medicationPreference_1, ...] }`, ranks starting at 1.
fn group_parameter(
    group: CopdGroup,
    ranked: &[Vec<String>],
    catalogue: &MedicationCatalogue,
) -> CdsResult<Parameter> {
    let mut part = vec![Parameter::coding(GROUP_CODE_PARAMETER, group.coding())];

    for (rank, codes) in (1..).zip(ranked) {
        if codes.is_empty() {
            return Err(CdsError::InvalidInput(format!(
                "{} preference {rank} names no medication",
                group.parameter_name()
            )));
        }
        let items = codes
            .iter()
            .map(|code| {
                catalogue.resolve(code).ok_or_else(|| {
                    CdsError::InvalidInput(format!(
                        "unknown medication code '{code}' in {} preference {rank}",
                        group.parameter_name()
                    ))
                })
            })
            .collect::<CdsResult<Vec<_>>>()?;

        part.push(Parameter::resource(
            format!("medicationPreference_{rank}"),
            List::changes(format!("list{rank}"), items),
        ));
    }

    Ok(Parameter::parts(group.parameter_name(), part))
}
