//! Engine configuration
//!
//! Values are layered lowest to highest: defaults, an optional TOML file,
//! `TALLY_*` environment variables, then explicit setters (the CLI).

use crate::error::{MapReduceError, MapReduceResult};
use crate::mapreduce::aggregation::LockStrategy;
use crate::mapreduce::pure::tokenize::EmptyTokenPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const ENV_PARALLELISM: &str = "TALLY_PARALLELISM";
pub const ENV_KEEP_EMPTY_TOKENS: &str = "TALLY_KEEP_EMPTY_TOKENS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Degree of parallelism; `None` uses the detected hardware parallelism
    pub parallelism: Option<usize>,
    /// Coerce a zero degree of parallelism to 1 instead of failing
    pub coerce_zero_parallelism: bool,
    pub empty_tokens: EmptyTokenPolicy,
    pub lock_strategy: LockStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            coerce_zero_parallelism: true,
            empty_tokens: EmptyTokenPolicy::default(),
            lock_strategy: LockStrategy::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce_zero_parallelism = coerce;
        self
    }

    pub fn with_empty_tokens(mut self, policy: EmptyTokenPolicy) -> Self {
        self.empty_tokens = policy;
        self
    }

    pub fn with_lock_strategy(mut self, strategy: LockStrategy) -> Self {
        self.lock_strategy = strategy;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> MapReduceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MapReduceError::io(format!("reading config file {}", path.display()), e)
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| {
            MapReduceError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `TALLY_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> MapReduceResult<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `TALLY_*` overrides from an arbitrary variable lookup
    pub fn merge_env_from<F>(&mut self, lookup: F) -> MapReduceResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PARALLELISM) {
            let parsed = value.trim().parse::<usize>().map_err(|_| {
                MapReduceError::configuration(
                    ENV_PARALLELISM,
                    &value,
                    "expected a non-negative integer",
                )
            })?;
            self.parallelism = Some(parsed);
        }

        if let Some(value) = lookup(ENV_KEEP_EMPTY_TOKENS) {
            let keep = value.trim().parse::<bool>().map_err(|_| {
                MapReduceError::configuration(
                    ENV_KEEP_EMPTY_TOKENS,
                    &value,
                    "expected true or false",
                )
            })?;
            self.empty_tokens = if keep {
                EmptyTokenPolicy::Keep
            } else {
                EmptyTokenPolicy::Discard
            };
        }

        Ok(())
    }

    /// Resolve the degree of parallelism for a run
    ///
    /// An explicit setting wins over the detected value; when neither is
    /// available the run uses a single worker. Zero is coerced to 1 unless
    /// coercion is disabled, in which case it is a configuration error.
    pub fn resolve_parallelism(&self, detected: Option<usize>) -> MapReduceResult<usize> {
        let requested = self.parallelism.or(detected).unwrap_or(1);
        if requested > 0 {
            return Ok(requested);
        }

        if self.coerce_zero_parallelism {
            warn!("Degree of parallelism resolved to 0, using 1 worker");
            Ok(1)
        } else {
            Err(MapReduceError::configuration(
                "parallelism",
                requested,
                "degree of parallelism must be at least 1",
            ))
        }
    }
}

/// Hardware parallelism reported by the platform, if any
pub fn detect_parallelism() -> Option<usize> {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .ok()
}
