//! Phase execution for a word-count run
//!
//! # Phase Transition State Machine
//!
//! ```text
//! [Idle] → [Partitioning] → [MapPhase] → [Barrier] → [ReducePhase] → [Done]
//!               ↓               ↓            ↓             ↓
//!            [Failed]  ←──────────────────────────────────┘
//! ```
//!
//! - **Partitioning**: resolves the degree of parallelism and builds the plan.
//! - **MapPhase**: one OS thread per partition, all sharing the aggregate.
//! - **Barrier**: reached only once every worker has been joined.
//! - **ReducePhase**: sequential, over the frozen aggregate.
//! - **Failed**: any error before `Done`; no report is produced.

pub mod coordinator;
pub mod map;
pub mod reduce;

pub use coordinator::{Coordinator, RunSummary};
pub use map::run_map_phase;
pub use reduce::run_reduce_phase;

use serde::Serialize;

/// Phase of a single coordinator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Partitioning,
    MapPhase,
    Barrier,
    ReducePhase,
    Done,
    Failed,
}

impl Phase {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, Partitioning)
                | (Partitioning, MapPhase)
                | (MapPhase, Barrier)
                | (Barrier, ReducePhase)
                | (ReducePhase, Done)
                | (Partitioning | MapPhase | Barrier | ReducePhase, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "Idle",
            Phase::Partitioning => "Partitioning",
            Phase::MapPhase => "Map",
            Phase::Barrier => "Barrier",
            Phase::ReducePhase => "Reduce",
            Phase::Done => "Done",
            Phase::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}
