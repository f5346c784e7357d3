//! Length-bucketed vocabulary index for expanding-radius lookups.
//!
//! Words are grouped by byte length. For a target length `L`, offset group
//! `0` is the bucket of length `L` and offset group `k` is the union of the
//! buckets of lengths `L - k` and `L + k`. Groups are views over the buckets;
//! nothing is copied per target length.

use std::ops::RangeInclusive;

use log::debug;

use crate::config::MatcherConfig;
use crate::error::{BreathalyzerError, Result};
use crate::spelling::vocabulary::Vocabulary;

/// Position of a word in the raw vocabulary.
pub type WordId = usize;

/// Words of a single length, as ids into the raw vocabulary.
#[derive(Debug, Clone, Default)]
pub struct LengthBucket {
    ids: Vec<WordId>,
    /// Ids are stably sorted by first byte.
    by_first_byte: bool,
}

/// A bucket split around the ids whose word starts with a given byte.
#[derive(Debug, Clone, Copy, Default)]
struct BucketPartition<'a> {
    before: &'a [WordId],
    same: &'a [WordId],
    after: &'a [WordId],
}

impl LengthBucket {
    /// Number of words in the bucket.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the bucket holds no words.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Word ids in bucket order.
    pub fn ids(&self) -> &[WordId] {
        &self.ids
    }

    fn partition<'a>(&'a self, words: &[String], first_byte: Option<u8>) -> BucketPartition<'a> {
        let Some(first) = first_byte.filter(|_| self.by_first_byte) else {
            return BucketPartition {
                before: &self.ids,
                ..Default::default()
            };
        };

        let key = |id: &WordId| words[*id].as_bytes()[0];
        let start = self.ids.partition_point(|id| key(id) < first);
        let end = start + self.ids[start..].partition_point(|id| key(id) == first);

        BucketPartition {
            before: &self.ids[..start],
            same: &self.ids[start..end],
            after: &self.ids[end..],
        }
    }
}

/// Mapping from word length to the words of exactly that length.
#[derive(Debug, Clone, Default)]
pub struct LengthBuckets {
    /// `buckets[len]`; index 0 is always empty.
    buckets: Vec<LengthBucket>,
}

impl LengthBuckets {
    /// Group every word of the vocabulary under its own byte length.
    pub fn build(vocabulary: &Vocabulary, by_first_byte: bool) -> Self {
        let words = vocabulary.words();
        let max_length = vocabulary.max_word_length();
        let mut buckets = vec![LengthBucket::default(); max_length + 1];

        for (id, word) in words.iter().enumerate() {
            buckets[word.len()].ids.push(id);
        }

        if by_first_byte {
            for bucket in buckets.iter_mut().skip(1) {
                // Stable, so load order survives within a first byte
                bucket.ids.sort_by_key(|&id| words[id].as_bytes()[0]);
                bucket.by_first_byte = true;
            }
        }

        LengthBuckets { buckets }
    }

    /// The bucket for a length, if any word of that length could exist.
    pub fn get(&self, length: usize) -> Option<&LengthBucket> {
        self.buckets.get(length).filter(|_| length > 0)
    }

    /// Lengths that have at least one word, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(len, _)| len)
    }
}

/// The words whose length differs from a target length by exactly one offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetGroup<'a> {
    words: &'a [String],
    lower: Option<&'a LengthBucket>,
    upper: Option<&'a LengthBucket>,
}

impl<'a> OffsetGroup<'a> {
    fn empty(words: &'a [String]) -> Self {
        OffsetGroup {
            words,
            lower: None,
            upper: None,
        }
    }

    /// Number of candidate words in the group.
    pub fn len(&self) -> usize {
        self.lower.map_or(0, LengthBucket::len) + self.upper.map_or(0, LengthBucket::len)
    }

    /// Whether the group has no candidates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates in bucket order, shorter words first.
    pub fn iter(self) -> impl Iterator<Item = &'a str> + 'a {
        self.candidates(None)
    }

    /// Candidates starting with `first_byte` come first; the rest follow in
    /// bucket order. Buckets built without first-byte ordering ignore the hint.
    pub fn candidates(self, first_byte: Option<u8>) -> impl Iterator<Item = &'a str> + 'a {
        let words = self.words;
        let lower = self
            .lower
            .map(|b| b.partition(words, first_byte))
            .unwrap_or_default();
        let upper = self
            .upper
            .map(|b| b.partition(words, first_byte))
            .unwrap_or_default();

        lower
            .same
            .iter()
            .chain(upper.same)
            .chain(lower.before)
            .chain(lower.after)
            .chain(upper.before)
            .chain(upper.after)
            .map(move |&id| words[id].as_str())
    }
}

/// Immutable lookup structure built once from the vocabulary and shared
/// read-only by every query.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    vocabulary: Vocabulary,
    buckets: LengthBuckets,
    max_length: usize,
    max_offset: usize,
}

impl VocabularyIndex {
    /// Build an index from a loaded vocabulary.
    pub fn build(vocabulary: Vocabulary, config: &MatcherConfig) -> Result<Self> {
        config.validate()?;
        if vocabulary.is_empty() {
            return Err(BreathalyzerError::EmptyVocabulary);
        }

        let max_length = vocabulary.max_word_length();
        let max_offset = config.max_offset.unwrap_or(max_length);
        let buckets = LengthBuckets::build(&vocabulary, config.first_letter_priority);

        debug!(
            "Built vocabulary index: {} words, {} distinct lengths, max_length={}, max_offset={}",
            vocabulary.len(),
            buckets.lengths().count(),
            max_length,
            max_offset
        );

        Ok(VocabularyIndex {
            vocabulary,
            buckets,
            max_length,
            max_offset,
        })
    }

    /// Build an index directly from a word list.
    pub fn from_words<I, S>(words: I, config: &MatcherConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(Vocabulary::from_words(words), config)
    }

    /// The raw vocabulary the index was built from.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Byte length of the longest vocabulary word.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Widest offset group addressable for any length.
    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    /// Target lengths that have offset groups.
    pub fn indexed_lengths(&self) -> RangeInclusive<usize> {
        1..=self.max_length.max(self.max_offset)
    }

    /// The underlying length buckets.
    pub fn buckets(&self) -> &LengthBuckets {
        &self.buckets
    }

    /// `(length, word count)` for every non-empty bucket, ascending by length.
    pub fn bucket_sizes(&self) -> Vec<(usize, usize)> {
        self.buckets
            .lengths()
            .map(|len| (len, self.buckets.buckets[len].len()))
            .collect()
    }

    /// Offset group `offset` for target length `length`.
    ///
    /// Lengths outside [`indexed_lengths`](Self::indexed_lengths) and offsets
    /// beyond [`max_offset`](Self::max_offset) yield an empty group.
    pub fn offset_group(&self, length: usize, offset: usize) -> OffsetGroup<'_> {
        let words = self.vocabulary.words();
        if offset > self.max_offset || !self.indexed_lengths().contains(&length) {
            return OffsetGroup::empty(words);
        }

        if offset == 0 {
            return OffsetGroup {
                words,
                lower: self.buckets.get(length),
                upper: None,
            };
        }

        OffsetGroup {
            words,
            lower: length
                .checked_sub(offset)
                .and_then(|len| self.buckets.get(len)),
            upper: self.buckets.get(length + offset),
        }
    }

    /// Smallest length gap between `word_len` and any vocabulary length that
    /// lies outside `radius` of `lookup_len`, i.e. a lower bound on the edit
    /// distance of every word an expanding search has not visited yet.
    pub fn unvisited_gap(&self, word_len: usize, lookup_len: usize, radius: usize) -> Option<usize> {
        self.buckets
            .lengths()
            .filter(|&len| len.abs_diff(lookup_len) > radius)
            .map(|len| len.abs_diff(word_len))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(words: &[&str]) -> VocabularyIndex {
        VocabularyIndex::from_words(words.iter().copied(), &MatcherConfig::default()).unwrap()
    }

    fn group_words(index: &VocabularyIndex, length: usize, offset: usize) -> Vec<&str> {
        let mut words: Vec<&str> = index.offset_group(length, offset).iter().collect();
        words.sort_unstable();
        words
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let result = VocabularyIndex::from_words(Vec::<String>::new(), &MatcherConfig::default());
        assert!(matches!(result, Err(BreathalyzerError::EmptyVocabulary)));
    }

    #[test]
    fn test_zero_max_offset_rejected() {
        let config = MatcherConfig {
            max_offset: Some(0),
            ..Default::default()
        };
        let result = VocabularyIndex::from_words(["CAT"], &config);
        assert!(matches!(result, Err(BreathalyzerError::InvalidConfig(_))));
    }

    #[test]
    fn test_offset_groups() {
        let index = index(&["A", "AB", "CAT", "DOG", "BIRD", "HORSE"]);

        assert_eq!(index.max_length(), 5);
        assert_eq!(index.max_offset(), 5);
        assert_eq!(group_words(&index, 3, 0), vec!["CAT", "DOG"]);
        assert_eq!(group_words(&index, 3, 1), vec!["AB", "BIRD"]);
        assert_eq!(group_words(&index, 3, 2), vec!["A", "HORSE"]);
        assert!(index.offset_group(3, 3).is_empty());
        assert_eq!(index.offset_group(3, 1).len(), 2);
    }

    #[test]
    fn test_out_of_range_groups_are_empty() {
        let index = index(&["CAT"]);
        assert!(index.offset_group(0, 0).is_empty());
        assert!(index.offset_group(4, 0).is_empty());
        assert!(index.offset_group(3, 4).is_empty());
        assert_eq!(group_words(&index, 1, 2), vec!["CAT"]);
    }

    #[test]
    fn test_groups_cover_every_word_once() {
        let words = ["A", "AB", "CAT", "DOG", "BIRD", "HORSE", "DOG"];
        let index = index(&words);

        for length in index.indexed_lengths() {
            let mut seen: Vec<&str> = (0..=index.max_offset())
                .flat_map(|k| index.offset_group(length, k).iter())
                .collect();
            seen.sort_unstable();

            let mut expected: Vec<&str> = words
                .iter()
                .copied()
                .filter(|w| w.len().abs_diff(length) <= index.max_offset())
                .collect();
            expected.sort_unstable();

            assert_eq!(seen, expected, "length {length}");
        }
    }

    #[test]
    fn test_custom_max_offset_extends_indexed_lengths() {
        let config = MatcherConfig {
            max_offset: Some(5),
            ..Default::default()
        };
        let index = VocabularyIndex::from_words(["AB"], &config).unwrap();

        assert_eq!(index.indexed_lengths(), 1..=5);
        assert_eq!(group_words(&index, 4, 2), vec!["AB"]);
        assert!(index.offset_group(6, 4).is_empty());
    }

    #[test]
    fn test_first_byte_priority_order() {
        let index = index(&["BAT", "CAT", "BOT", "CUT", "ABC"]);

        let ordered: Vec<&str> = index.offset_group(3, 0).candidates(Some(b'C')).collect();
        assert_eq!(ordered, vec!["CAT", "CUT", "ABC", "BAT", "BOT"]);

        let ordered: Vec<&str> = index.offset_group(3, 0).candidates(Some(b'Z')).collect();
        assert_eq!(ordered, vec!["ABC", "BAT", "BOT", "CAT", "CUT"]);
    }

    #[test]
    fn test_load_order_without_priority() {
        let config = MatcherConfig {
            first_letter_priority: false,
            ..Default::default()
        };
        let index = VocabularyIndex::from_words(["BAT", "CAT", "ABC"], &config).unwrap();

        let ordered: Vec<&str> = index.offset_group(3, 0).candidates(Some(b'C')).collect();
        assert_eq!(ordered, vec!["BAT", "CAT", "ABC"]);
    }

    #[test]
    fn test_unvisited_gap() {
        let index = index(&["A", "CAT", "HORSE"]);

        // Nothing visited yet around length 3 except length 3 itself
        assert_eq!(index.unvisited_gap(3, 3, 0), Some(2));
        assert_eq!(index.unvisited_gap(3, 3, 2), None);
        // Clamped lookup: a long word searched from a shorter lookup length
        assert_eq!(index.unvisited_gap(9, 4, 0), Some(4));
        assert_eq!(index.unvisited_gap(9, 4, 1), Some(8));
    }

    #[test]
    fn test_bucket_sizes() {
        let index = index(&["A", "CAT", "DOG", "HORSE"]);
        assert_eq!(index.bucket_sizes(), vec![(1, 1), (3, 2), (5, 1)]);
    }
}
