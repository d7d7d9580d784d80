//! Shared intermediate aggregate populated during the map phase
//!
//! The lock lives inside the aggregate. Workers only ever see `append`, so
//! the locking scheme can change without touching callers. After the
//! barrier the aggregate is consumed by `freeze`, which makes further
//! appends impossible.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::trace;

/// How the intermediate aggregate guards its keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockStrategy {
    /// One coarse lock covering every key
    #[default]
    Global,
    /// Keys spread over independently locked shards by hash
    Sharded { shards: usize },
}

impl LockStrategy {
    fn shard_count(self) -> usize {
        match self {
            Self::Global => 1,
            Self::Sharded { shards } => shards.max(1),
        }
    }
}

/// The aggregate's lock was poisoned by a worker that panicked mid-append
#[derive(Debug, Error)]
#[error("intermediate aggregate lock poisoned by a panicked worker")]
pub struct PoisonedAggregate;

impl<T> From<PoisonError<T>> for PoisonedAggregate {
    fn from(_: PoisonError<T>) -> Self {
        PoisonedAggregate
    }
}

type Shard = HashMap<String, Vec<u64>>;

/// Word to partial-count lists, shared by all map workers
pub struct IntermediateAggregate {
    strategy: LockStrategy,
    shards: Vec<Mutex<Shard>>,
    hasher: RandomState,
}

impl IntermediateAggregate {
    /// Create an empty aggregate using the given lock strategy
    pub fn new(strategy: LockStrategy) -> Self {
        let shards = (0..strategy.shard_count())
            .map(|_| Mutex::new(Shard::new()))
            .collect();

        Self {
            strategy,
            shards,
            hasher: RandomState::new(),
        }
    }

    pub fn strategy(&self) -> LockStrategy {
        self.strategy
    }

    /// Append one partial count to the list for `word`
    ///
    /// The lock is held for this single append only.
    pub fn append(&self, word: String, count: u64) -> Result<(), PoisonedAggregate> {
        let shard = &self.shards[self.shard_for(&word)];
        let mut guard = shard.lock()?;
        guard.entry(word).or_default().push(count);
        Ok(())
    }

    fn shard_for(&self, word: &str) -> usize {
        if self.shards.len() == 1 {
            return 0;
        }
        (self.hasher.hash_one(word) % self.shards.len() as u64) as usize
    }

    /// Consume the aggregate at the barrier, producing its read-only form
    pub fn freeze(self) -> Result<FrozenAggregate, PoisonedAggregate> {
        let mut entries = BTreeMap::new();
        for shard in self.shards {
            let shard = shard.into_inner()?;
            entries.extend(shard);
        }
        trace!(keys = entries.len(), "Intermediate aggregate frozen");
        Ok(FrozenAggregate { entries })
    }
}

impl Default for IntermediateAggregate {
    fn default() -> Self {
        Self::new(LockStrategy::default())
    }
}

/// Read-only intermediate aggregate, ordered by word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrozenAggregate {
    entries: BTreeMap<String, Vec<u64>>,
}

impl FrozenAggregate {
    pub fn get(&self, word: &str) -> Option<&[u64]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.entries
            .iter()
            .map(|(word, counts)| (word.as_str(), counts.as_slice()))
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of partial counts across all words
    pub fn total_partials(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
