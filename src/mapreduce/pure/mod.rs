//! Pure functional pieces of the engine
//!
//! Partitioning, mapping, reducing and report formatting perform no I/O and
//! touch no shared state, so they are tested in isolation.

pub mod formatting;
pub mod partition;
pub mod reduce;
pub mod tokenize;

pub use formatting::{format_line, render_report, ReportFormat};
pub use partition::{partition_records, validate_partitions, Partition};
pub use reduce::reduce_counts;
pub use tokenize::{map_record, normalize_token, EmptyTokenPolicy, PartialCount};
