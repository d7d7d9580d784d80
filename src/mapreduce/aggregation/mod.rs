//! Intermediate and final aggregates
//!
//! The intermediate aggregate is the only shared mutable state of a run.
//! The final aggregate is derived from its frozen form once and never
//! changes afterwards.

pub mod intermediate;

pub use intermediate::{FrozenAggregate, IntermediateAggregate, LockStrategy, PoisonedAggregate};

use serde::Serialize;
use std::collections::BTreeMap;

/// Final word totals, ordered lexicographically by word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FinalAggregate {
    totals: BTreeMap<String, u64>,
}

impl FinalAggregate {
    /// Build the final aggregate by reducing every word of a frozen aggregate
    pub fn from_frozen<F>(frozen: &FrozenAggregate, reduce: F) -> Self
    where
        F: Fn(&[u64]) -> u64,
    {
        let totals = frozen
            .iter()
            .map(|(word, counts)| (word.to_string(), reduce(counts)))
            .collect();
        Self { totals }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.totals.get(word).copied()
    }

    /// Entries in ascending word order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(word, total)| (word.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum of all word totals
    pub fn total_words(&self) -> u64 {
        self.totals.values().sum()
    }

    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.totals
    }
}

impl FromIterator<(String, u64)> for FinalAggregate {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut totals = BTreeMap::new();
        for (word, count) in iter {
            *totals.entry(word).or_insert(0) += count;
        }
        Self { totals }
    }
}
