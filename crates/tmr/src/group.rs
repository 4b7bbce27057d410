//! Guideline groups: the unit a translation works on.

use crate::{Interaction, Recommendation};
use serde::Deserialize;

/// Recommendations merged from one or more guidelines, with the interactions found between
/// them.
///
/// The order of both lists is significant: it fixes the order of the generated resources
/// and the index-based ids of detected issues.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GuidelineGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub interactions: Vec<Interaction>,
    pub recommendations: Vec<Recommendation>,
}

impl GuidelineGroup {
    /// Recommendation ids in document order.
    pub fn recommendation_ids(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.id.as_str()).collect()
    }
}
