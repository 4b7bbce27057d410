//! List resource, used to carry one ranked medication preference.

use crate::{FhirResource, Reference};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    Current,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    Changes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub item: Reference,
}

/// Always serialised with `resourceType: "List"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "resourceType", rename = "List")]
pub struct List {
    pub id: String,
    pub status: ListStatus,
    pub mode: ListMode,
    pub entry: Vec<ListEntry>,
}

impl List {
    /// A current change list over `items`, in the given order.
    pub fn changes(id: impl Into<String>, items: impl IntoIterator<Item = Reference>) -> Self {
        Self {
            id: id.into(),
            status: ListStatus::Current,
            mode: ListMode::Changes,
            entry: items.into_iter().map(|item| ListEntry { item }).collect(),
        }
    }
}

impl FhirResource for List {
    const RESOURCE_TYPE: &'static str = "List";

    fn id(&self) -> &str {
        &self.id
    }
}
