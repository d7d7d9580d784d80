//! Coordinator driving a single word-count run through its phases
//!
//! ```text
//! Idle → Partitioning → MapPhase → Barrier → ReducePhase → Done
//! ```
//!
//! There are no retries. Any failure moves the run to `Failed` and no
//! report is emitted.

use super::{run_map_phase, run_reduce_phase, Phase};
use crate::config::{detect_parallelism, EngineConfig};
use crate::error::MapReduceResult;
use crate::mapreduce::aggregation::{FinalAggregate, IntermediateAggregate};
use crate::mapreduce::pure::partition::{partition_records, validate_partitions, Partition};
use crate::mapreduce::report::ReportSink;
use crate::mapreduce::source::RecordSource;
use crate::mapreduce::worker::{tokenizing_mapper, MapFunction, WorkerStats};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub totals: FinalAggregate,
    pub parallelism: usize,
    pub records: usize,
    pub workers: Vec<WorkerStats>,
}

impl RunSummary {
    /// Number of `(word, 1)` pairs emitted across all workers
    pub fn total_pairs(&self) -> usize {
        self.workers.iter().map(|w| w.pairs_emitted).sum()
    }
}

/// Runs the map/reduce pipeline over a set of records
pub struct Coordinator {
    config: EngineConfig,
    mapper: MapFunction,
    detected_parallelism: Option<usize>,
    phase: Phase,
}

impl Coordinator {
    /// Create a coordinator using the tokenizing mapper and the detected
    /// hardware parallelism
    pub fn new(config: EngineConfig) -> Self {
        let mapper = tokenizing_mapper(config.empty_tokens);
        Self {
            config,
            mapper,
            detected_parallelism: detect_parallelism(),
            phase: Phase::Idle,
        }
    }

    /// Replace the map function
    pub fn with_mapper(mut self, mapper: MapFunction) -> Self {
        self.mapper = mapper;
        self
    }

    /// Override the hardware parallelism hint
    pub fn with_detected_parallelism(mut self, detected: Option<usize>) -> Self {
        self.detected_parallelism = detected;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pull records from `source`, run, and hand the totals to `sink`
    ///
    /// The sink is only called after a successful reduce phase.
    pub fn run_with<S, K>(&mut self, source: &mut S, sink: &mut K) -> MapReduceResult<RunSummary>
    where
        S: RecordSource + ?Sized,
        K: ReportSink + ?Sized,
    {
        let records = source.records()?;
        let summary = self.run(&records)?;
        sink.emit(&summary.totals)?;
        Ok(summary)
    }

    /// Run the full pipeline over `records`
    pub fn run(&mut self, records: &[String]) -> MapReduceResult<RunSummary> {
        if self.phase.is_terminal() {
            self.phase = Phase::Idle;
        }
        match self.execute(records) {
            Ok(summary) => {
                info!(
                    records = summary.records,
                    words = summary.totals.len(),
                    workers = summary.parallelism,
                    "Word count completed"
                );
                Ok(summary)
            }
            Err(e) => {
                debug!(phase = %self.phase, "Word count aborted");
                self.transition(Phase::Failed);
                Err(e)
            }
        }
    }

    fn execute(&mut self, records: &[String]) -> MapReduceResult<RunSummary> {
        self.transition(Phase::Partitioning);
        let parallelism = self
            .config
            .resolve_parallelism(self.detected_parallelism)?;
        let partitions = self.plan(records.len(), parallelism)?;

        self.transition(Phase::MapPhase);
        let aggregate = IntermediateAggregate::new(self.config.lock_strategy);
        debug!(strategy = ?aggregate.strategy(), "Intermediate aggregate ready");
        let workers = run_map_phase(records, &partitions, &aggregate, &self.mapper)?;

        self.transition(Phase::Barrier);
        let frozen = aggregate.freeze()?;

        self.transition(Phase::ReducePhase);
        let totals = run_reduce_phase(&frozen);

        self.transition(Phase::Done);
        Ok(RunSummary {
            totals,
            parallelism,
            records: records.len(),
            workers,
        })
    }

    fn plan(&self, record_count: usize, parallelism: usize) -> MapReduceResult<Vec<Partition>> {
        let partitions = partition_records(record_count, parallelism)?;
        validate_partitions(&partitions, record_count)?;
        debug!(
            records = record_count,
            partitions = partitions.len(),
            "Partitioned records"
        );
        Ok(partitions)
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid phase transition {} -> {}",
            self.phase,
            next
        );
        debug!("Phase transition: {} -> {}", self.phase, next);
        self.phase = next;
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
