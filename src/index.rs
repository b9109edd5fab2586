//! The section index: the single source of truth every consumer view reads from.
//!
//! Records are kept in insertion order, which the extractor guarantees is document pre-order.
//! A key map points at the latest record for each identifier, so a repeated identifier is
//! overwritten for keyed lookups while every record keeps its own position in the sequence.

use crate::section::SectionRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
/// Insertion-ordered mapping from section identifier to record.
pub struct SectionIndex {
    records: Vec<SectionRecord>,
    #[serde(skip)]
    by_key: HashMap<String, usize>,
}

impl SectionIndex {
    #[must_use]
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, overwriting the keyed lookup for its identifier if already present.
    pub fn set(&mut self, record: SectionRecord) {
        if let Some(ref key) = record.key {
            self.by_key.insert(key.clone(), self.records.len());
        }
        self.records.push(record);
    }

    #[must_use]
    /// Exact lookup by identifier, returning the most recently set record for that key.
    pub fn get(&self, key: &str) -> Option<&SectionRecord> {
        self.by_key.get(key).map(|&position| &self.records[position])
    }

    #[must_use]
    /// Whether any record carries this identifier.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Every record in insertion order, keyless and overwritten ones included.
    ///
    /// The iterator is cloneable, so a consumer can restart the walk without touching the
    /// source document again.
    pub fn entries_in_order(&self) -> std::slice::Iter<'_, SectionRecord> {
        self.records.iter()
    }

    /// Distinct identifiers in the order they were first seen.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::new();
        self.records.iter().filter_map(move |record| {
            let key = record.key.as_deref()?;
            seen.insert(key).then_some(key)
        })
    }

    #[must_use]
    /// Number of records, counting each visited node once.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    /// Whether nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/index.rs"]
mod tests;
