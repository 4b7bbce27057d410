//! Constants used throughout the CDS core crate.

/// Default namespace for resource full URLs.
pub const DEFAULT_BASE_URL: &str = "http://anonymous.org/";

/// Default title of the aggregate care plan.
pub const DEFAULT_CARE_PLAN_TITLE: &str = "personalised care plan";

/// Index appended to the care plan id (`CarePlan1`).
pub const CARE_PLAN_INDEX: usize = 1;

/// Default advisory card uuid when no guideline-group id is given.
pub const DEFAULT_CARD_UUID: &str = "CIG-00000000000000";

pub const DEFAULT_CARD_SUMMARY: &str =
    "Personalised knowledge-based decision support in patients with multimorbidity";

pub const DEFAULT_SOURCE_LABEL: &str = "TMR-based clinical guidelines";

pub const DEFAULT_SUGGESTION_LABEL: &str = "care plan decision support";

pub const DEFAULT_ACTION_DESCRIPTION: &str = "Update care plan";

pub const DEFAULT_BUNDLE_ID: &str = "bundle";

/// Patient id used when a document is only being validated.
pub const VALIDATION_PATIENT_ID: &str = "validation";

/// Namespace of the concept URIs carried as medication coding systems.
pub const DEFAULT_DATA_NAMESPACE: &str = "http://anonymous.org/data/";

pub const SNOMED_SYSTEM: &str = "http://snomed.info/sct";

pub const PREFERENCES_CARD_SUMMARY: &str = "Assessment of COPD";

pub const PREFERENCES_SOURCE_LABEL: &str = "GOLD 2017 COPD assessment";

pub const PREFERENCES_SUGGESTION_LABEL: &str = "COPD assessment decision support";

pub const PREFERENCES_ACTION_DESCRIPTION: &str = "Update COPD assessment interface";

pub const PREFERENCES_PARAMETERS_ID: &str = "copdAssessParameters";

pub const MEDICATION_BUNDLE_ID: &str = "medicationBundle";
