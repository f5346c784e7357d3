//! Configuration for index construction and scoring.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BreathalyzerError, Result};

/// Configuration for the vocabulary index and match searcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Widest length offset the expanding search visits before falling back
    /// to an exhaustive scan. If None, uses the longest vocabulary word.
    pub max_offset: Option<usize>,

    /// Visit candidates sharing the query's first byte before the others.
    pub first_letter_priority: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_offset: None,
            first_letter_priority: true,
        }
    }
}

impl MatcherConfig {
    /// Reject settings the searcher cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_offset == Some(0) {
            return Err(BreathalyzerError::invalid_config("max_offset must be >= 1"));
        }
        Ok(())
    }
}

/// Configuration for a scoring pass over tokenized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Shard the token scan across a thread pool.
    pub parallel: bool,

    /// Thread pool size for parallel scoring.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Inputs with fewer tokens than this are scored sequentially.
    pub min_shard_size: usize,

    /// Abort scoring once this much time has elapsed.
    pub deadline: Option<Duration>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            thread_pool_size: None,
            min_shard_size: 1024,
            deadline: None,
        }
    }
}

impl ScoringConfig {
    /// Reject settings the scorer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.thread_pool_size == Some(0) {
            return Err(BreathalyzerError::invalid_config(
                "thread_pool_size must be >= 1",
            ));
        }
        if self.min_shard_size == 0 {
            return Err(BreathalyzerError::invalid_config(
                "min_shard_size must be >= 1",
            ));
        }
        Ok(())
    }

    /// Number of worker threads to use in parallel mode.
    pub fn effective_threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }
}

/// Top-level configuration, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathalyzerConfig {
    /// Index and search settings.
    pub matcher: MatcherConfig,
    /// Scoring pass settings.
    pub scoring: ScoringConfig,
}

impl BreathalyzerConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: BreathalyzerConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.scoring.validate()
    }
}
