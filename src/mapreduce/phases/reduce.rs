//! Reduce phase: sequential pass over the frozen aggregate
//!
//! Runs strictly after the barrier, so no synchronization is involved.

use crate::mapreduce::aggregation::{FinalAggregate, FrozenAggregate};
use crate::mapreduce::pure::reduce::reduce_counts;
use tracing::debug;

/// Apply the reducer once per distinct word
pub fn run_reduce_phase(frozen: &FrozenAggregate) -> FinalAggregate {
    let totals = FinalAggregate::from_frozen(frozen, reduce_counts);
    debug!(
        words = totals.len(),
        partials = frozen.total_partials(),
        "Reduce phase finished"
    );
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapreduce::aggregation::IntermediateAggregate;

    #[test]
    fn test_reduce_phase_totals() {
        let aggregate = IntermediateAggregate::default();
        for word in ["hello", "hello", "world", "hello"] {
            aggregate.append(word.to_string(), 1).unwrap();
        }

        let totals = run_reduce_phase(&aggregate.freeze().unwrap());
        assert_eq!(totals.get("hello"), Some(3));
        assert_eq!(totals.get("world"), Some(1));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_reduce_phase_on_empty_aggregate() {
        let frozen = IntermediateAggregate::default().freeze().unwrap();
        assert!(run_reduce_phase(&frozen).is_empty());
    }
}
