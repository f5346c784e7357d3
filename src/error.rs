//! Error types for the Breathalyzer library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`BreathalyzerError`] enum.
//!
//! # Examples
//!
//! ```
//! use breathalyzer::error::{BreathalyzerError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BreathalyzerError::invalid_config("max_offset must be >= 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::time::Duration;

use thiserror::Error;

/// The main error type for Breathalyzer operations.
#[derive(Error, Debug)]
pub enum BreathalyzerError {
    /// I/O errors while reading vocabulary or input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The vocabulary source yielded zero words.
    #[error("Vocabulary is empty: cannot build an index from nothing")]
    EmptyVocabulary,

    /// Scoring was attempted without any vocabulary.
    #[error("No vocabulary loaded")]
    NoVocabularyLoaded,

    /// Malformed input or vocabulary content (tokenization, encoding, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied scoring deadline elapsed.
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with BreathalyzerError.
pub type Result<T> = std::result::Result<T, BreathalyzerError>;

impl BreathalyzerError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BreathalyzerError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        BreathalyzerError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BreathalyzerError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        BreathalyzerError::Other(format!("Internal error: {}", msg.into()))
    }
}
