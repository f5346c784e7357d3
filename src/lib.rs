//! # Breathalyzer
//!
//! Measures how far a text strays from a reference vocabulary: every
//! whitespace-separated token is matched to its nearest vocabulary word by
//! edit distance, and the distances are summed.
//!
//! ## Features
//!
//! - Length-bucketed vocabulary index built once and shared read-only
//! - Expanding-radius search with sound early exit and exhaustive fallback
//! - Per-pass result cache for repeated tokens
//! - Optional parallel scoring on a rayon thread pool
//! - Command line interface with human and JSON output

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::config::{BreathalyzerConfig, MatcherConfig, ScoringConfig};
    pub use crate::engine::{Breathalyzer, ProcessReport};
    pub use crate::error::{BreathalyzerError, Result};
    pub use crate::spelling::{
        MatchSearcher, ScoreSummary, TextScorer, Vocabulary, VocabularyIndex,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
