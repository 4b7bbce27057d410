//! Deduplicating, insertion-ordered resource store.
//!
//! One registry exists per resource kind for the duration of a single translation. The first
//! insertion of a key fixes that value's position; later upserts of the same key only merge.

use crate::CdsResult;
use std::collections::HashMap;

/// Outcome of [`Registry::upsert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Merged,
}

#[derive(Debug)]
pub struct Registry<V> {
    index: HashMap<String, usize>,
    values: Vec<V>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<V> Registry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `create()` under `key` if absent, otherwise apply `merge` to the existing value.
    ///
    /// `create` is only called when the key is new; if it fails nothing is inserted.
    pub fn upsert<C, M>(&mut self, key: impl Into<String>, create: C, merge: M) -> CdsResult<Upsert>
    where
        C: FnOnce() -> CdsResult<V>,
        M: FnOnce(&mut V),
    {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            merge(&mut self.values[position]);
            return Ok(Upsert::Merged);
        }

        let value = create()?;
        self.index.insert(key, self.values.len());
        self.values.push(value);
        Ok(Upsert::Inserted)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.values[position])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in first-insertion order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CdsError;

    #[test]
    fn keeps_first_insertion_order() {
        let mut registry = Registry::new();
        for key in ["b", "a", "c", "a"] {
            registry
                .upsert(key, || Ok(key.to_owned()), |_| {})
                .expect("upsert");
        }
        assert_eq!(registry.values(), ["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn merge_runs_only_for_existing_keys() {
        let mut registry: Registry<Vec<&str>> = Registry::new();
        let first = registry
            .upsert("effect", || Ok(vec!["R1"]), |v| v.push("unused"))
            .expect("insert");
        let second = registry
            .upsert("effect", || Ok(vec!["unused"]), |v| v.push("R2"))
            .expect("merge");

        assert_eq!(first, Upsert::Inserted);
        assert_eq!(second, Upsert::Merged);
        assert_eq!(registry.get("effect"), Some(&vec!["R1", "R2"]));
    }

    #[test]
    fn failed_create_leaves_registry_unchanged() {
        let mut registry: Registry<String> = Registry::new();
        let result = registry.upsert(
            "x",
            || Err(CdsError::InvalidInput("bad".into())),
            |_| {},
        );
        assert!(result.is_err());
        assert!(registry.is_empty());
        assert!(!registry.contains_key("x"));
    }
}
