//! Threaded map/reduce word counting
//!
//! Records are partitioned across a fixed set of worker threads. Workers
//! tokenize their records and append `(word, 1)` pairs into a shared,
//! internally locked aggregate. Once every worker has been joined the
//! aggregate is frozen and reduced sequentially into sorted word totals.

pub mod aggregation;
pub mod phases;
pub mod pure;
pub mod report;
pub mod source;
pub mod worker;

pub use aggregation::{FinalAggregate, IntermediateAggregate, LockStrategy};
pub use phases::{Coordinator, Phase, RunSummary};
pub use pure::{EmptyTokenPolicy, ReportFormat};
pub use report::{ReportSink, WriterSink};
pub use source::{FileSource, InMemorySource, RecordSource};
pub use worker::{MapFunction, WorkerStats};
