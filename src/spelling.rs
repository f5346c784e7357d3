//! Approximate dictionary matching for Breathalyzer.
//!
//! This module indexes a vocabulary by word length, finds the minimum edit
//! distance from an arbitrary word to any vocabulary entry, and sums those
//! distances over tokenized text.

pub mod index;
pub mod levenshtein;
pub mod scorer;
pub mod searcher;
pub mod vocabulary;

// Re-export commonly used types
pub use index::{LengthBuckets, OffsetGroup, VocabularyIndex};
pub use levenshtein::{LevenshteinMatcher, levenshtein_distance, levenshtein_distance_threshold};
pub use scorer::{ResultCache, ScoreSummary, TextScorer};
pub use searcher::{MatchSearcher, SearchReport, SearchState};
pub use vocabulary::Vocabulary;
