//! High-level engine tying vocabulary loading, input analysis and scoring together.

use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, PipelineAnalyzer};
use crate::config::BreathalyzerConfig;
use crate::error::{BreathalyzerError, Result};
use crate::spelling::{MatchSearcher, ScoreSummary, TextScorer, Vocabulary, VocabularyIndex};

/// Outcome of [`Breathalyzer::process_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Scoring totals.
    pub summary: ScoreSummary,
    /// Wall-clock time spent scoring.
    pub elapsed: Duration,
}

/// Loads a vocabulary once, then scores any number of input texts against it.
///
/// # Examples
///
/// ```
/// use breathalyzer::config::BreathalyzerConfig;
/// use breathalyzer::engine::Breathalyzer;
/// use breathalyzer::spelling::Vocabulary;
///
/// let mut engine = Breathalyzer::new(BreathalyzerConfig::default()).unwrap();
/// engine.set_vocabulary(Vocabulary::from_words(["CAT", "DOG"])).unwrap();
/// engine.set_input("cat dgo").unwrap();
///
/// let report = engine.process_text().unwrap();
/// assert_eq!(report.summary.changes, 2);
/// ```
pub struct Breathalyzer {
    config: BreathalyzerConfig,
    analyzer: PipelineAnalyzer,
    index: Option<VocabularyIndex>,
    input: Vec<String>,
}

impl Breathalyzer {
    /// Create an engine with no vocabulary and no input.
    pub fn new(config: BreathalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Breathalyzer {
            config,
            analyzer: PipelineAnalyzer::standard(),
            index: None,
            input: Vec::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &BreathalyzerConfig {
        &self.config
    }

    /// The vocabulary index, once a vocabulary is loaded.
    pub fn index(&self) -> Option<&VocabularyIndex> {
        self.index.as_ref()
    }

    /// Tokens of the current input.
    pub fn input(&self) -> &[String] {
        &self.input
    }

    /// Load a newline-delimited vocabulary file and index it.
    pub fn load_vocabulary<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.set_vocabulary(Vocabulary::load_from_file(path)?)
    }

    /// Index an in-memory vocabulary, replacing any previous one.
    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) -> Result<()> {
        let start = Instant::now();
        let index = VocabularyIndex::build(vocabulary, &self.config.matcher)?;
        info!(
            "Indexed {} words (max length {}, max offset {}) in {:?}",
            index.vocabulary().len(),
            index.max_length(),
            index.max_offset(),
            start.elapsed()
        );
        self.index = Some(index);
        Ok(())
    }

    /// Read and tokenize an input file, replacing any previous input.
    pub fn load_input<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.input = analysis::load_input(path)?;
        Ok(())
    }

    /// Tokenize in-memory text, replacing any previous input.
    pub fn set_input(&mut self, text: &str) -> Result<()> {
        self.input = self.analyzer.analyze(text)?;
        Ok(())
    }

    /// Score the current input against the loaded vocabulary.
    pub fn process_text(&self) -> Result<ProcessReport> {
        let index = self
            .index
            .as_ref()
            .ok_or(BreathalyzerError::NoVocabularyLoaded)?;

        let scorer = TextScorer::with_config(index, self.config.scoring.clone())?;
        let start = Instant::now();
        let summary = scorer.score_with_summary(&self.input)?;
        let elapsed = start.elapsed();

        info!(
            "Changes done: {} ({} tokens in {:?})",
            summary.changes, summary.tokens, elapsed
        );

        Ok(ProcessReport { summary, elapsed })
    }

    /// Minimum edit distance of a single word, upper-cased like input text.
    pub fn min_distance(&self, word: &str) -> Result<usize> {
        let index = self
            .index
            .as_ref()
            .ok_or(BreathalyzerError::NoVocabularyLoaded)?;
        Ok(MatchSearcher::new(index).min_distance(&word.to_ascii_uppercase()))
    }
}
