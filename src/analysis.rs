//! Input text analysis for Breathalyzer.
//!
//! Text is split into tokens by a [`Tokenizer`] and normalized by a chain of
//! [`Filter`]s. The default pipeline splits on runs of whitespace and
//! upper-cases ASCII letters, matching an upper-case vocabulary.

pub mod token_filter;
pub mod tokenizer;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::analysis::token_filter::{Filter, UppercaseFilter};
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::{BreathalyzerError, Result};

/// A tokenizer combined with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Whitespace tokenization followed by ASCII upper-casing.
    pub fn standard() -> Self {
        PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(UppercaseFilter::new()))
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Tokenize text and apply every filter in order.
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }
}

impl Default for PipelineAnalyzer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read a text file and run it through the standard analyzer.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        BreathalyzerError::analysis(format!(
            "input {} is not valid UTF-8: {e}",
            path.display()
        ))
    })?;

    let tokens = PipelineAnalyzer::standard().analyze(&text)?;
    info!("Loaded {} input tokens from {}", tokens.len(), path.display());
    Ok(tokens)
}
