//! Map phase: one scoped OS thread per partition
//!
//! Workers borrow the record slice and the aggregate for the lifetime of
//! the scope. Every handle is joined before returning, which is the
//! barrier: no result is visible until the last worker has finished.

use crate::error::{MapReduceError, MapReduceResult};
use crate::mapreduce::aggregation::IntermediateAggregate;
use crate::mapreduce::pure::partition::Partition;
use crate::mapreduce::worker::{MapFunction, MapWorker, WorkerStats};
use std::thread;
use tracing::debug;

/// Run every partition on its own thread and wait for all of them
///
/// Workers are always joined, even after one has failed. The first failure
/// in partition order is returned; a panicking worker becomes a
/// `WorkerFailure`.
pub fn run_map_phase(
    records: &[String],
    partitions: &[Partition],
    aggregate: &IntermediateAggregate,
    mapper: &MapFunction,
) -> MapReduceResult<Vec<WorkerStats>> {
    let outcomes: Vec<MapReduceResult<WorkerStats>> = thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .iter()
            .map(|&partition| {
                let spawned = thread::Builder::new()
                    .name(format!("map-worker-{}", partition.index))
                    .spawn_scoped(scope, move || {
                        MapWorker::new(partition, records, aggregate, mapper).run()
                    });
                (partition.index, spawned)
            })
            .collect();

        debug!(workers = handles.len(), "Waiting for map workers");

        handles
            .into_iter()
            .map(|(worker, spawned)| match spawned {
                Ok(handle) => handle
                    .join()
                    .unwrap_or_else(|payload| Err(MapReduceError::from_panic(worker, payload))),
                Err(e) => Err(MapReduceError::worker_failure(
                    worker,
                    format!("failed to spawn thread: {e}"),
                )),
            })
            .collect()
    });

    let mut stats = Vec::with_capacity(outcomes.len());
    let mut first_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(worker_stats) => stats.push(worker_stats),
            Err(e) => {
                debug!("Map worker failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapreduce::pure::partition::partition_records;
    use crate::mapreduce::pure::tokenize::EmptyTokenPolicy;
    use crate::mapreduce::worker::tokenizing_mapper;
    use std::sync::Arc;

    fn corpus() -> Vec<String> {
        vec![
            "This is sentence one.".to_string(),
            "This is sentence two.".to_string(),
            "This is a sentence that ends with red.".to_string(),
            "This is a sentence that ends with blue.".to_string(),
        ]
    }

    #[test]
    fn test_all_workers_report_stats() {
        let records = corpus();
        let partitions = partition_records(records.len(), 3).unwrap();
        let aggregate = IntermediateAggregate::default();
        let mapper = tokenizing_mapper(EmptyTokenPolicy::Discard);

        let stats = run_map_phase(&records, &partitions, &aggregate, &mapper).unwrap();

        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats.iter().map(|s| s.records_processed).sum::<usize>(),
            records.len()
        );
        let frozen = aggregate.freeze().unwrap();
        assert_eq!(frozen.get("this").map(<[u64]>::len), Some(4));
        assert_eq!(frozen.total_partials(), 24);
    }

    #[test]
    fn test_panicking_worker_becomes_worker_failure() {
        let records = corpus();
        let partitions = partition_records(records.len(), 2).unwrap();
        let aggregate = IntermediateAggregate::default();
        let mapper: MapFunction = Arc::new(|record: &str| {
            if record.contains("blue") {
                panic!("cannot map blue");
            }
            vec![("ok".to_string(), 1)]
        });

        let err = run_map_phase(&records, &partitions, &aggregate, &mapper).unwrap_err();
        match err {
            MapReduceError::WorkerFailure { worker, reason } => {
                assert_eq!(worker, 1);
                assert!(reason.contains("cannot map blue"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_partitions_is_a_no_op() {
        let records: Vec<String> = Vec::new();
        let aggregate = IntermediateAggregate::default();
        let mapper = tokenizing_mapper(EmptyTokenPolicy::Discard);

        let stats = run_map_phase(&records, &[], &aggregate, &mapper).unwrap();
        assert!(stats.is_empty());
    }
}
