//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BreathalyzerArgs, OutputFormat};
use crate::error::Result;

/// Result structure for scoring a text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResult {
    pub input: String,
    pub changes: usize,
    pub tokens: usize,
    pub distinct_tokens: usize,
    pub unknown_tokens: usize,
    pub cache_hits: usize,
    pub execution_seconds: f64,
}

/// Distance of a single looked-up word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordDistance {
    pub word: String,
    pub distance: usize,
    pub used_fallback: bool,
    pub offsets_scanned: usize,
    pub comparisons: usize,
}

/// Result structure for word lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub words: Vec<WordDistance>,
    pub total_distance: usize,
}

/// Number of vocabulary words of one length.
#[derive(Debug, Serialize, Deserialize)]
pub struct BucketStat {
    pub length: usize,
    pub words: usize,
}

/// Vocabulary index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub path: String,
    pub total_words: usize,
    pub distinct_words: usize,
    pub max_length: usize,
    pub max_offset: usize,
    pub first_letter_priority: bool,
    pub buckets: Vec<BucketStat>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &BreathalyzerArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &BreathalyzerArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().ends_with("ScoreResult") => {
            output_score_human(&value, args)
        }
        _ if std::any::type_name::<T>().ends_with("LookupResult") => {
            output_lookup_human(&value, args)
        }
        _ if std::any::type_name::<T>().ends_with("VocabularyStats") => {
            output_stats_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output a scoring result in human format.
fn output_score_human(value: &serde_json::Value, args: &BreathalyzerArgs) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return output_generic_human(value, args);
    };

    if let Some(seconds) = obj.get("execution_seconds").and_then(|s| s.as_f64()) {
        println!("Execution time: {seconds:.6} seconds");
    }
    if let Some(changes) = obj.get("changes").and_then(|c| c.as_u64()) {
        println!("Changes done: {changes}");
    }

    if args.verbosity() > 1 {
        println!();
        for key in ["tokens", "distinct_tokens", "unknown_tokens", "cache_hits"] {
            if let Some(count) = obj.get(key).and_then(|c| c.as_u64()) {
                println!("{}: {count}", key.replace('_', " "));
            }
        }
    }
    Ok(())
}

/// Output word lookups in human format.
fn output_lookup_human(value: &serde_json::Value, args: &BreathalyzerArgs) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return output_generic_human(value, args);
    };

    if let Some(words) = obj.get("words").and_then(|w| w.as_array()) {
        for entry in words {
            let word = entry.get("word").and_then(|w| w.as_str()).unwrap_or("");
            let distance = entry.get("distance").and_then(|d| d.as_u64()).unwrap_or(0);
            if args.verbosity() > 1 {
                let comparisons = entry
                    .get("comparisons")
                    .and_then(|c| c.as_u64())
                    .unwrap_or(0);
                let fallback = entry
                    .get("used_fallback")
                    .and_then(|f| f.as_bool())
                    .unwrap_or(false);
                println!("{word}\t{distance}\t({comparisons} comparisons, fallback: {fallback})");
            } else {
                println!("{word}\t{distance}");
            }
        }
    }

    if let Some(total) = obj.get("total_distance").and_then(|t| t.as_u64()) {
        println!();
        println!("Total distance: {total}");
    }
    Ok(())
}

/// Output vocabulary statistics in human format.
fn output_stats_human(value: &serde_json::Value, _args: &BreathalyzerArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Vocabulary Statistics:");
        println!("══════════════════════");

        if let Some(path) = obj.get("path").and_then(|p| p.as_str()) {
            println!("Vocabulary: {path}");
        }
        if let Some(total) = obj.get("total_words").and_then(|t| t.as_u64()) {
            println!("Total words: {total}");
        }
        if let Some(distinct) = obj.get("distinct_words").and_then(|d| d.as_u64()) {
            println!("Distinct words: {distinct}");
        }
        if let Some(max_length) = obj.get("max_length").and_then(|m| m.as_u64()) {
            println!("Longest word: {max_length}");
        }
        if let Some(max_offset) = obj.get("max_offset").and_then(|m| m.as_u64()) {
            println!("Max offset: {max_offset}");
        }
        if let Some(priority) = obj.get("first_letter_priority").and_then(|p| p.as_bool()) {
            println!("First letter priority: {priority}");
        }

        if let Some(buckets) = obj.get("buckets").and_then(|b| b.as_array()) {
            println!();
            println!("Words per length:");
            println!("─────────────────");
            for bucket in buckets {
                let length = bucket.get("length").and_then(|l| l.as_u64()).unwrap_or(0);
                let words = bucket.get("words").and_then(|w| w.as_u64()).unwrap_or(0);
                println!("  {length:>3}: {words}");
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &BreathalyzerArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BreathalyzerArgs) -> Result<()> {
    println!("{}", render_json(result, args.pretty)?);
    Ok(())
}

fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
