#[derive(Debug, thiserror::Error)]
pub enum CdsError {
    /// A required field is missing at a named location.
    #[error("property '{field}' is missing in {location} (id: {owner})")]
    Schema {
        field: String,
        location: String,
        owner: String,
    },
    /// An expected array/object shape is violated.
    #[error("structural error: {0}")]
    Structural(String),
    /// A cross-reference between resources cannot be resolved.
    #[error("reference error: {0}")]
    Reference(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("TMR error: {0}")]
    Tmr(#[from] tmr::TmrError),
    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read configuration file: {0}")]
    ConfigRead(std::io::Error),
}

impl CdsError {
    pub(crate) fn schema(
        field: impl Into<String>,
        location: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self::Schema {
            field: field.into(),
            location: location.into(),
            owner: owner.into(),
        }
    }

    /// Stable tag naming the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "schema",
            Self::Structural(_) => "structural",
            Self::Reference(_) => "reference",
            Self::InvalidInput(_) => "invalid-input",
            Self::Tmr(_) => "tmr",
            Self::Fhir(_) => "fhir",
            Self::Json(_) => "json",
            Self::ConfigRead(_) => "config",
        }
    }

    /// Whether the caller's input is at fault (as opposed to the engine or its deployment).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. }
                | Self::Structural(_)
                | Self::InvalidInput(_)
                | Self::Tmr(_)
                | Self::Json(_)
        )
    }
}

impl From<cds_types::TextError> for CdsError {
    fn from(err: cds_types::TextError) -> Self {
        Self::InvalidInput(format!("patient id: {err}"))
    }
}

pub type CdsResult<T> = std::result::Result<T, CdsError>;
