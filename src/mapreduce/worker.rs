//! Map worker: runs the map function over one partition
//!
//! Each emitted pair is appended to the shared aggregate on its own, so the
//! lock is never held across records or across the map function.

use super::aggregation::IntermediateAggregate;
use super::pure::partition::Partition;
use super::pure::tokenize::{map_record, EmptyTokenPolicy, PartialCount};
use crate::error::{MapReduceError, MapReduceResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Map function applied to every record
pub type MapFunction = Arc<dyn Fn(&str) -> Vec<PartialCount> + Send + Sync>;

/// Build the standard tokenizing map function for a token policy
pub fn tokenizing_mapper(policy: EmptyTokenPolicy) -> MapFunction {
    Arc::new(move |record: &str| map_record(record, policy))
}

/// Counters reported by a worker once its partition is done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub worker: usize,
    pub records_processed: usize,
    pub pairs_emitted: usize,
}

/// A worker bound to its partition and the shared aggregate
pub struct MapWorker<'a> {
    partition: Partition,
    records: &'a [String],
    aggregate: &'a IntermediateAggregate,
    mapper: &'a MapFunction,
}

impl<'a> MapWorker<'a> {
    pub fn new(
        partition: Partition,
        records: &'a [String],
        aggregate: &'a IntermediateAggregate,
        mapper: &'a MapFunction,
    ) -> Self {
        Self {
            partition,
            records,
            aggregate,
            mapper,
        }
    }

    /// Map every record of the partition into the aggregate
    ///
    /// A partition reaching past the record slice is a caller defect and
    /// fails immediately with no record processed.
    pub fn run(self) -> MapReduceResult<WorkerStats> {
        let worker = self.partition.index;
        let assigned = self
            .records
            .get(self.partition.range())
            .ok_or(MapReduceError::PartitionBounds {
                index: worker,
                start: self.partition.start,
                end: self.partition.end,
                record_count: self.records.len(),
            })?;

        debug!(
            worker,
            start = self.partition.start,
            end = self.partition.end,
            "Map worker started"
        );

        let mut stats = WorkerStats {
            worker,
            ..WorkerStats::default()
        };

        for record in assigned {
            for (word, count) in (self.mapper)(record.as_str()) {
                self.aggregate
                    .append(word, count)
                    .map_err(|e| MapReduceError::worker_failure(worker, e.to_string()))?;
                stats.pairs_emitted += 1;
            }
            stats.records_processed += 1;
        }

        debug!(
            worker,
            records = stats.records_processed,
            pairs = stats.pairs_emitted,
            "Map worker finished"
        );
        Ok(stats)
    }
}
