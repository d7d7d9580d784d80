//! Structured error types for the word-count engine
//!
//! Every failure surfaces synchronously to the coordinator, either while
//! partitioning or at the barrier, and terminates the run.

use crate::mapreduce::aggregation::PoisonedAggregate;
use std::any::Any;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for map/reduce runs
#[derive(Debug, Error)]
pub enum MapReduceError {
    #[error("Invalid configuration for {field} ({value}): {reason}")]
    Configuration {
        reason: String,
        field: String,
        value: String,
    },

    #[error(
        "Partition {index} covers [{start}, {end}) which falls outside [0, {record_count})"
    )]
    PartitionBounds {
        index: usize,
        start: usize,
        end: usize,
        record_count: usize,
    },

    #[error("Worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    #[error("Intermediate aggregate could not be frozen at the barrier")]
    AggregatePoisoned(#[from] PoisonedAggregate),

    #[error("I/O error while {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize report")]
    Serialization(#[from] serde_json::Error),
}

impl MapReduceError {
    /// Create a configuration error
    pub fn configuration(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            reason: reason.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create a worker failure error
    pub fn worker_failure(worker: usize, reason: impl Into<String>) -> Self {
        Self::WorkerFailure {
            worker,
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context describing the operation
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build a worker failure from the payload of a panicked worker thread
    pub fn from_panic(worker: usize, payload: Box<dyn Any + Send>) -> Self {
        let reason = if let Some(msg) = payload.downcast_ref::<&str>() {
            format!("panicked: {msg}")
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            format!("panicked: {msg}")
        } else {
            "panicked with a non-string payload".to_string()
        };
        Self::worker_failure(worker, reason)
    }

    /// Whether the error was raised by the map phase
    pub fn is_worker_failure(&self) -> bool {
        matches!(self, Self::WorkerFailure { .. })
    }
}

pub type MapReduceResult<T> = Result<T, MapReduceError>;
