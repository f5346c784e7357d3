//! Command implementations for Breathalyzer CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::BreathalyzerConfig;
use crate::engine::Breathalyzer;
use crate::error::{BreathalyzerError, Result};
use crate::spelling::{MatchSearcher, VocabularyIndex};

/// Execute a CLI command.
pub fn execute_command(args: BreathalyzerArgs) -> Result<()> {
    match &args.command {
        Command::Score(score_args) => score_text(score_args.clone(), &args),
        Command::Lookup(lookup_args) => lookup_words(lookup_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Build an engine and load the vocabulary named on the command line.
fn open_engine(
    vocabulary: &VocabularyArgs,
    config: BreathalyzerConfig,
    cli_args: &BreathalyzerArgs,
) -> Result<Breathalyzer> {
    if cli_args.verbosity() > 1 {
        println!("Loading vocabulary from: {}", vocabulary.vocabulary.display());
    }

    let mut engine = Breathalyzer::new(config)?;
    engine.load_vocabulary(&vocabulary.vocabulary)?;
    Ok(engine)
}

fn loaded_index(engine: &Breathalyzer) -> Result<&VocabularyIndex> {
    engine.index().ok_or(BreathalyzerError::NoVocabularyLoaded)
}

/// Score an input text against the vocabulary.
fn score_text(args: ScoreArgs, cli_args: &BreathalyzerArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let mut engine = open_engine(&args.vocabulary, config, cli_args)?;
    engine.load_input(&args.input)?;

    let report = engine.process_text()?;

    output_result(
        "Scoring completed",
        &ScoreResult {
            input: args.input.to_string_lossy().to_string(),
            changes: report.summary.changes,
            tokens: report.summary.tokens,
            distinct_tokens: report.summary.distinct_tokens,
            unknown_tokens: report.summary.unknown_tokens,
            cache_hits: report.summary.cache_hits,
            execution_seconds: report.elapsed.as_secs_f64(),
        },
        cli_args,
    )
}

/// Report the minimum distance of individual words.
fn lookup_words(args: LookupArgs, cli_args: &BreathalyzerArgs) -> Result<()> {
    let config = args.vocabulary.resolve_config()?;
    let engine = open_engine(&args.vocabulary, config, cli_args)?;
    let searcher = MatchSearcher::new(loaded_index(&engine)?);

    let words: Vec<WordDistance> = args
        .words
        .iter()
        .map(|word| {
            let word = word.to_ascii_uppercase();
            let report = searcher.search(&word);
            WordDistance {
                word,
                distance: report.distance,
                used_fallback: report.used_fallback,
                offsets_scanned: report.offsets_scanned,
                comparisons: report.comparisons,
            }
        })
        .collect();
    let total_distance = words.iter().map(|w| w.distance).sum();

    output_result(
        "Lookup completed",
        &LookupResult {
            words,
            total_distance,
        },
        cli_args,
    )
}

/// Show statistics about the vocabulary index.
fn show_stats(args: StatsArgs, cli_args: &BreathalyzerArgs) -> Result<()> {
    let config = args.vocabulary.resolve_config()?;
    let first_letter_priority = config.matcher.first_letter_priority;
    let engine = open_engine(&args.vocabulary, config, cli_args)?;
    let stats = vocabulary_stats(
        &args.vocabulary.vocabulary.to_string_lossy(),
        loaded_index(&engine)?,
        first_letter_priority,
    );

    output_result("Vocabulary statistics", &stats, cli_args)
}

fn vocabulary_stats(
    path: &str,
    index: &VocabularyIndex,
    first_letter_priority: bool,
) -> VocabularyStats {
    VocabularyStats {
        path: path.to_string(),
        total_words: index.vocabulary().len(),
        distinct_words: index.vocabulary().distinct_count(),
        max_length: index.max_length(),
        max_offset: index.max_offset(),
        first_letter_priority,
        buckets: index
            .bucket_sizes()
            .into_iter()
            .map(|(length, words)| BucketStat { length, words })
            .collect(),
    }
}
