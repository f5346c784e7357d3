//! Token filters applied after tokenization.

use crate::error::Result;

/// Trait for filters that transform tokens.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token list.
    fn filter(&self, tokens: Vec<String>) -> Result<Vec<String>>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A filter that upper-cases ASCII letters and leaves every other byte alone.
#[derive(Clone, Debug, Default)]
pub struct UppercaseFilter;

impl UppercaseFilter {
    /// Create a new uppercase filter.
    pub fn new() -> Self {
        UppercaseFilter
    }
}

impl Filter for UppercaseFilter {
    fn filter(&self, mut tokens: Vec<String>) -> Result<Vec<String>> {
        for token in &mut tokens {
            token.make_ascii_uppercase();
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }
}
