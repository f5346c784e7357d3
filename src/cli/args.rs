//! Command line argument parsing for Breathalyzer CLI using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::BreathalyzerConfig;
use crate::error::Result;

/// Breathalyzer - count the edits needed for a text to match a vocabulary
#[derive(Parser, Debug, Clone)]
#[command(name = "breathalyzer")]
#[command(about = "Estimate how far a text strays from a reference vocabulary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BreathalyzerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BreathalyzerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score a text file against the vocabulary
    Score(ScoreArgs),

    /// Show the minimum edit distance of individual words
    Lookup(LookupArgs),

    /// Show vocabulary index statistics
    Stats(StatsArgs),
}

/// Vocabulary and matcher options shared by every command
#[derive(Args, Debug, Clone)]
pub struct VocabularyArgs {
    /// Vocabulary file, one word per line
    #[arg(long, value_name = "FILE", default_value = "vocabulary.txt")]
    pub vocabulary: PathBuf,

    /// Configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Widest length offset searched before a full scan (default: longest word)
    #[arg(long)]
    pub max_offset: Option<usize>,

    /// Visit candidates in plain load order instead of same-first-letter first
    #[arg(long)]
    pub no_first_letter_priority: bool,
}

impl VocabularyArgs {
    /// Load the configuration file, if any, and apply matcher flags on top.
    pub fn resolve_config(&self) -> Result<BreathalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => BreathalyzerConfig::load_from_file(path)?,
            None => BreathalyzerConfig::default(),
        };

        if let Some(max_offset) = self.max_offset {
            config.matcher.max_offset = Some(max_offset);
        }
        if self.no_first_letter_priority {
            config.matcher.first_letter_priority = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for scoring a text
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Text file to analyze
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub vocabulary: VocabularyArgs,

    /// Score tokens on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Thread pool size for parallel scoring (default: number of CPUs)
    #[arg(long, requires = "parallel")]
    pub threads: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MILLIS")]
    pub deadline_ms: Option<u64>,
}

impl ScoreArgs {
    /// Resolve the full configuration for a scoring run.
    pub fn resolve_config(&self) -> Result<BreathalyzerConfig> {
        let mut config = self.vocabulary.resolve_config()?;

        if self.parallel {
            config.scoring.parallel = true;
        }
        if let Some(threads) = self.threads {
            config.scoring.thread_pool_size = Some(threads);
        }
        if let Some(millis) = self.deadline_ms {
            config.scoring.deadline = Some(Duration::from_millis(millis));
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for looking up words
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Words to look up
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    #[command(flatten)]
    pub vocabulary: VocabularyArgs,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub vocabulary: VocabularyArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_command() {
        let args = BreathalyzerArgs::try_parse_from([
            "breathalyzer",
            "score",
            "input.txt",
            "--vocabulary",
            "/path/to/words.txt",
            "--max-offset",
            "4",
        ])
        .unwrap();

        if let Command::Score(score_args) = args.command {
            assert_eq!(score_args.input, PathBuf::from("input.txt"));
            assert_eq!(
                score_args.vocabulary.vocabulary,
                PathBuf::from("/path/to/words.txt")
            );
            assert_eq!(score_args.vocabulary.max_offset, Some(4));
            assert!(!score_args.parallel);

            let config = score_args.resolve_config().unwrap();
            assert_eq!(config.matcher.max_offset, Some(4));
            assert!(!config.scoring.parallel);
        } else {
            panic!("Expected Score command");
        }
    }

    #[test]
    fn test_default_vocabulary_path() {
        let args = BreathalyzerArgs::try_parse_from(["breathalyzer", "stats"]).unwrap();

        if let Command::Stats(stats_args) = args.command {
            assert_eq!(
                stats_args.vocabulary.vocabulary,
                PathBuf::from("vocabulary.txt")
            );
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_parallel_flags() {
        let args = BreathalyzerArgs::try_parse_from([
            "breathalyzer",
            "score",
            "input.txt",
            "--parallel",
            "--threads",
            "8",
            "--deadline-ms",
            "250",
        ])
        .unwrap();

        if let Command::Score(score_args) = args.command {
            let config = score_args.resolve_config().unwrap();
            assert!(config.scoring.parallel);
            assert_eq!(config.scoring.thread_pool_size, Some(8));
            assert_eq!(config.scoring.deadline, Some(Duration::from_millis(250)));
        } else {
            panic!("Expected Score command");
        }
    }

    #[test]
    fn test_threads_requires_parallel() {
        let result = BreathalyzerArgs::try_parse_from([
            "breathalyzer",
            "score",
            "input.txt",
            "--threads",
            "8",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_max_offset_rejected() {
        let args = BreathalyzerArgs::try_parse_from([
            "breathalyzer",
            "stats",
            "--max-offset",
            "0",
        ])
        .unwrap();

        if let Command::Stats(stats_args) = args.command {
            assert!(stats_args.vocabulary.resolve_config().is_err());
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_lookup_requires_words() {
        assert!(BreathalyzerArgs::try_parse_from(["breathalyzer", "lookup"]).is_err());

        let args =
            BreathalyzerArgs::try_parse_from(["breathalyzer", "lookup", "cot", "dgo"]).unwrap();
        if let Command::Lookup(lookup_args) = args.command {
            assert_eq!(lookup_args.words, vec!["cot", "dgo"]);
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_output_format_and_verbosity() {
        let args = BreathalyzerArgs::try_parse_from([
            "breathalyzer",
            "--format",
            "json",
            "-vv",
            "stats",
        ])
        .unwrap();

        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.verbosity(), 2);

        let args = BreathalyzerArgs::try_parse_from(["breathalyzer", "stats", "-q"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
