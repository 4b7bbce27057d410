//! Validated primitive types shared across the CDS workspace.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input contained a character that cannot appear in a FHIR logical id
    #[error("invalid character {0:?} in identifier")]
    InvalidCharacter(char),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of the patient a translation is run for.
///
/// Accepts either a bare logical id (`"p-001"`) or an already-qualified
/// reference (`"Patient/p-001"`); both normalise to the bare id. The id is
/// embedded in resource references, so whitespace and `/` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientId(NonEmptyText);

impl PatientId {
    const REFERENCE_PREFIX: &'static str = "Patient/";

    /// Parses a patient identifier.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        let bare = text
            .as_str()
            .strip_prefix(Self::REFERENCE_PREFIX)
            .unwrap_or(text.as_str());

        if let Some(bad) = bare.chars().find(|c| c.is_whitespace() || *c == '/') {
            return Err(TextError::InvalidCharacter(bad));
        }

        Ok(Self(NonEmptyText::new(bare)?))
    }

    /// The bare logical id.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The literal reference form, `Patient/{id}`.
    pub fn reference(&self) -> String {
        format!("{}{}", Self::REFERENCE_PREFIX, self.0)
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::new(&s).map_err(serde::de::Error::custom)
    }
}
