//! Translator runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed by reference into every translation. Lookup tables are injected here rather than
//! living in module-level statics, so tests and deployments can substitute their own.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CARE_PLAN_TITLE};
use crate::{CdsError, CdsResult};
use fhir::InteractionCodeTable;
use std::path::Path;

/// Translator configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct TranslatorConfig {
    base_url: String,
    interaction_codes: InteractionCodeTable,
    strict_references: bool,
    emit_full_urls: bool,
    care_plan_title: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            interaction_codes: InteractionCodeTable::default(),
            strict_references: true,
            emit_full_urls: false,
            care_plan_title: DEFAULT_CARE_PLAN_TITLE.to_owned(),
        }
    }
}

impl TranslatorConfig {
    /// Create a new `TranslatorConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::InvalidInput`] if `base_url` is empty or does not end in `/`, or if
    /// `care_plan_title` is empty.
    pub fn new(
        base_url: String,
        interaction_codes: InteractionCodeTable,
        strict_references: bool,
        emit_full_urls: bool,
        care_plan_title: String,
    ) -> CdsResult<Self> {
        let base_url = base_url.trim().to_owned();
        if base_url.is_empty() {
            return Err(CdsError::InvalidInput("base_url cannot be empty".into()));
        }
        if !base_url.ends_with('/') {
            return Err(CdsError::InvalidInput(format!(
                "base_url must end with '/': {base_url}"
            )));
        }

        let care_plan_title = care_plan_title.trim().to_owned();
        if care_plan_title.is_empty() {
            return Err(CdsError::InvalidInput(
                "care_plan_title cannot be empty".into(),
            ));
        }

        Ok(Self {
            base_url,
            interaction_codes,
            strict_references,
            emit_full_urls,
            care_plan_title,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn interaction_codes(&self) -> &InteractionCodeTable {
        &self.interaction_codes
    }

    pub fn strict_references(&self) -> bool {
        self.strict_references
    }

    pub fn emit_full_urls(&self) -> bool {
        self.emit_full_urls
    }

    pub fn care_plan_title(&self) -> &str {
        &self.care_plan_title
    }

    /// Absolute URL of a resource under the configured base.
    pub fn full_url(&self, resource_type: &str, id: &str) -> String {
        format!("{}{resource_type}/{id}", self.base_url)
    }
}

/// Load an interaction code table from a YAML file.
pub fn load_interaction_codes(path: &Path) -> CdsResult<InteractionCodeTable> {
    let text = std::fs::read_to_string(path).map_err(CdsError::ConfigRead)?;
    Ok(InteractionCodeTable::from_yaml(&text)?)
}

/// Parse a boolean flag from an optional string value.
///
/// `None` or empty/whitespace yields `default`. Accepts `true/false`, `1/0`, `yes/no` and
/// `on/off` in any case.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> CdsResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(default);
    };

    match value.as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(CdsError::InvalidInput(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}
