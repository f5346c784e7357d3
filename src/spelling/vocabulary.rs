//! Raw vocabulary loading and exact-match lookups.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use log::{info, warn};

use crate::error::{BreathalyzerError, Result};

/// Word list exactly as loaded, plus a hash set for exact-match checks.
///
/// Load order (duplicates included) is preserved, so an exhaustive scan over
/// [`Vocabulary::words`] is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Words in load order
    words: Vec<String>,
    /// Set of all words for fast lookup
    members: AHashSet<String>,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Build a vocabulary from an iterator of words. Empty words are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Vocabulary::new();
        for word in words {
            vocabulary.push(word.into());
        }
        vocabulary
    }

    /// Load a vocabulary from a text file with one word per line.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let vocabulary = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} vocabulary words from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    /// Read newline-delimited words. A trailing `\r` is stripped from each
    /// line and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        let mut skipped = 0usize;

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            if bytes.is_empty() {
                skipped += 1;
                continue;
            }
            let word = String::from_utf8(bytes).map_err(|e| {
                BreathalyzerError::analysis(format!(
                    "vocabulary line {} is not valid UTF-8: {e}",
                    line_num + 1
                ))
            })?;
            vocabulary.push(word);
        }

        if skipped > 0 {
            warn!("Skipped {skipped} blank vocabulary lines");
        }

        Ok(vocabulary)
    }

    fn push(&mut self, word: String) {
        if word.is_empty() {
            return;
        }
        self.members.insert(word.clone());
        self.words.push(word);
    }

    /// Check if a word exists verbatim in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    /// All words in load order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of loaded entries, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct words.
    pub fn distinct_count(&self) -> usize {
        self.members.len()
    }

    /// Length in bytes of the longest word, or 0 when empty.
    pub fn max_word_length(&self) -> usize {
        self.words.iter().map(String::len).max().unwrap_or(0)
    }
}
