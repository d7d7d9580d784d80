//! Pure work partitioning for the map phase
//!
//! Records are assigned to workers as contiguous index ranges. Records are
//! never split, so a partition boundary always falls between two records.

use crate::error::{MapReduceError, MapReduceResult};
use std::ops::Range;

/// A contiguous, half-open range of record indices assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Position of the partition in the plan, also the worker id
    pub index: usize,
    /// First record index (inclusive)
    pub start: usize,
    /// Last record index (exclusive)
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Pure: Split `record_count` records into exactly `workers` partitions
///
/// The first `workers - 1` partitions hold `record_count / workers` records
/// each and the last one absorbs the remainder. When there are fewer records
/// than workers the leading partitions are empty, which is not an error.
///
/// # Errors
///
/// Returns a configuration error when `workers` is zero.
///
/// # Examples
///
/// ```
/// use tally::mapreduce::pure::partition::partition_records;
///
/// let plan = partition_records(10, 3).unwrap();
/// let sizes: Vec<usize> = plan.iter().map(|p| p.len()).collect();
/// assert_eq!(sizes, vec![3, 3, 4]);
/// ```
pub fn partition_records(record_count: usize, workers: usize) -> MapReduceResult<Vec<Partition>> {
    if workers == 0 {
        return Err(MapReduceError::configuration(
            "parallelism",
            workers,
            "degree of parallelism must be at least 1",
        ));
    }

    let chunk = record_count / workers;
    let partitions = (0..workers)
        .map(|index| {
            let start = index * chunk;
            let end = if index == workers - 1 {
                record_count
            } else {
                start + chunk
            };
            Partition { index, start, end }
        })
        .collect();

    Ok(partitions)
}

/// Pure: Check that a plan covers `[0, record_count)` exactly once
///
/// Partitions must be ordered by index, contiguous, and stay in bounds. Any
/// violation is reported for the first offending partition; nothing is
/// clamped.
pub fn validate_partitions(partitions: &[Partition], record_count: usize) -> MapReduceResult<()> {
    let mut expected_start = 0;

    for (position, partition) in partitions.iter().enumerate() {
        let in_bounds = partition.start <= partition.end && partition.end <= record_count;
        let contiguous = partition.start == expected_start && partition.index == position;

        if !in_bounds || !contiguous {
            return Err(bounds_error(partition, record_count));
        }
        expected_start = partition.end;
    }

    if expected_start != record_count {
        // Plan stops short of the last record
        let last = partitions.last().copied().unwrap_or(Partition {
            index: 0,
            start: 0,
            end: 0,
        });
        return Err(bounds_error(&last, record_count));
    }

    Ok(())
}

fn bounds_error(partition: &Partition, record_count: usize) -> MapReduceError {
    MapReduceError::PartitionBounds {
        index: partition.index,
        start: partition.start,
        end: partition.end,
        record_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(plan: &[Partition]) -> Vec<usize> {
        plan.iter().map(Partition::len).collect()
    }

    #[test]
    fn test_even_split() {
        let plan = partition_records(8, 4).unwrap();
        assert_eq!(sizes(&plan), vec![2, 2, 2, 2]);
        assert_eq!(plan[3].range(), 6..8);
    }

    #[test]
    fn test_last_partition_absorbs_remainder() {
        let plan = partition_records(11, 4).unwrap();
        assert_eq!(sizes(&plan), vec![2, 2, 2, 5]);
        assert!(validate_partitions(&plan, 11).is_ok());
    }

    #[test]
    fn test_fewer_records_than_workers() {
        let plan = partition_records(4, 8).unwrap();
        assert_eq!(plan.len(), 8);
        assert!(plan[..7].iter().all(Partition::is_empty));
        assert_eq!(plan[7].range(), 0..4);
        assert!(validate_partitions(&plan, 4).is_ok());
    }

    #[test]
    fn test_no_records() {
        let plan = partition_records(0, 3).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(Partition::is_empty));
        assert!(validate_partitions(&plan, 0).is_ok());
    }

    #[test]
    fn test_single_worker_takes_everything() {
        let plan = partition_records(5, 1).unwrap();
        assert_eq!(plan, vec![Partition { index: 0, start: 0, end: 5 }]);
    }

    #[test]
    fn test_zero_workers_is_configuration_error() {
        let err = partition_records(5, 0).unwrap_err();
        assert!(matches!(err, MapReduceError::Configuration { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let plan = vec![
            Partition { index: 0, start: 0, end: 3 },
            Partition { index: 1, start: 3, end: 7 },
        ];
        let err = validate_partitions(&plan, 5).unwrap_err();
        assert!(matches!(
            err,
            MapReduceError::PartitionBounds { index: 1, end: 7, record_count: 5, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let plan = vec![
            Partition { index: 0, start: 0, end: 3 },
            Partition { index: 1, start: 2, end: 5 },
        ];
        assert!(validate_partitions(&plan, 5).is_err());
    }

    #[test]
    fn test_validate_rejects_gap_at_end() {
        let plan = vec![Partition { index: 0, start: 0, end: 3 }];
        assert!(validate_partitions(&plan, 5).is_err());
    }
}
