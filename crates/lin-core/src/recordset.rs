//! Filtered-sequence helpers over ordered record slices.
//!
//! `RecordSet` is a borrowed, stateless view: every operation returns a fresh
//! result and preserves the original order. Descriptors use it for nested
//! file lookups; the store uses it for row queries.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use serde::Serialize;

/// A read-only view over an ordered sequence of records.
#[derive(Debug, Clone, Copy)]
pub struct RecordSet<'a, T>(&'a [T]);

impl<'a, T> RecordSet<'a, T> {
    /// Wrap a slice of records.
    #[must_use]
    pub const fn new(records: &'a [T]) -> Self {
        Self(records)
    }

    /// All records matching the predicate, original order preserved.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<&'a T> {
        self.0.iter().filter(|record| predicate(record)).collect()
    }

    /// The first record matching the predicate, if any.
    pub fn filter_first(&self, predicate: impl Fn(&T) -> bool) -> Option<&'a T> {
        self.0.iter().find(|record| predicate(record))
    }

    /// The position of the first record matching the predicate, if any.
    pub fn filter_first_index(&self, predicate: impl Fn(&T) -> bool) -> Option<usize> {
        self.0.iter().position(|record| predicate(record))
    }

    /// Distinct projected values across all records.
    pub fn values<K: Eq + Hash>(&self, selector: impl Fn(&T) -> K) -> HashSet<K> {
        self.0.iter().map(selector).collect()
    }

    /// Number of records in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the view is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the underlying records.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for RecordSet<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> RecordSet<'_, T> {
    /// Field names present across the records, discovered via JSON reflection.
    ///
    /// Records that do not serialize to a JSON object contribute nothing.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<String> {
        self.0
            .iter()
            .filter_map(|record| serde_json::to_value(record).ok())
            .filter_map(|value| value.as_object().cloned())
            .flat_map(|object| object.into_iter().map(|(key, _)| key))
            .collect()
    }
}
