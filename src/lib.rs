//! # Tally
//!
//! In-memory word counting on a threaded map/reduce engine.
//!
//! ## Usage
//!
//! ```bash
//! tally [-j workers] [--keep-empty-tokens] [--format text|json] [FILES]...
//! ```
//!
//! ## Modules
//!
//! - `config` - Engine configuration layered from defaults, TOML and environment
//! - `error` - Error taxonomy shared by every phase of a run
//! - `mapreduce` - Partitioning, map workers, shared aggregate, reduction and reporting
//!
//! ```
//! use tally::config::EngineConfig;
//! use tally::mapreduce::Coordinator;
//!
//! let records = vec!["This is sentence one.".to_string(), "This is sentence two.".to_string()];
//! let mut coordinator = Coordinator::new(EngineConfig::new().with_parallelism(2));
//! let summary = coordinator.run(&records).unwrap();
//! assert_eq!(summary.totals.get("sentence"), Some(2));
//! ```
pub mod config;
pub mod error;
pub mod mapreduce;

pub use error::{MapReduceError, MapReduceResult};
