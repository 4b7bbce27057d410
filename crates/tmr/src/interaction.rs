//! Interactions detected between recommendations.

use serde::{Deserialize, Serialize};

/// Kind of interaction between two or more recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Therapies with the same intended effect.
    Alternative,
    /// One therapy's effect conflicts with another's.
    Contradiction,
    /// The same therapy is proposed more than once.
    Repetition,
    /// An adverse effect of one therapy is repaired by another.
    Repairable,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        Self::Alternative,
        Self::Contradiction,
        Self::Repetition,
        Self::Repairable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "alternative",
            Self::Contradiction => "contradiction",
            Self::Repetition => "repetition",
            Self::Repairable => "repairable",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation taking part in an interaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InteractionNorm {
    #[serde(rename = "recId")]
    pub rec_id: String,
    #[serde(rename = "type")]
    pub norm_type: String,
}

/// An interaction entry of a guideline group.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub interaction_norms: Vec<InteractionNorm>,
}

impl Interaction {
    /// Whether any norm of this interaction names the recommendation `rec_id`.
    pub fn involves(&self, rec_id: &str) -> bool {
        self.interaction_norms.iter().any(|norm| norm.rec_id == rec_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_value;
    use serde_json::json;

    #[test]
    fn parses_contradiction() {
        let value = json!({
            "type": "contradiction",
            "interactionNorms": [
                { "recId": "http://anonymous.org/data/R1", "type": "primary" },
                { "recId": "http://anonymous.org/data/R2", "type": "primary" }
            ]
        });
        let interaction: Interaction = parse_value(&value, "interaction").expect("parse");
        assert_eq!(interaction.kind, InteractionKind::Contradiction);
        assert!(interaction.involves("http://anonymous.org/data/R2"));
        assert!(!interaction.involves("http://anonymous.org/data/R3"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let value = json!({ "type": "synergy", "interactionNorms": [] });
        let err = parse_value::<Interaction>(&value, "interaction").expect_err("should reject");
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn kind_display_matches_wire_value() {
        for kind in InteractionKind::ALL {
            let wire = serde_json::to_value(kind).expect("serialize");
            assert_eq!(wire, json!(kind.to_string()));
        }
    }
}
