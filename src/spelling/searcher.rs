//! Expanding-radius nearest-word search over a [`VocabularyIndex`].
//!
//! The search walks offset groups outward from the query's length. After each
//! group it checks a pure predicate over the accumulated [`SearchState`]; once
//! the best distance found is within the allowed bound and no unvisited word
//! could be strictly closer, the search stops. If the offsets run out first,
//! the whole vocabulary is scanned.

use std::ops::ControlFlow;

use log::debug;

use crate::spelling::index::{OffsetGroup, VocabularyIndex};
use crate::spelling::levenshtein::LevenshteinMatcher;

/// Larger than any realizable distance.
const UNMATCHED: usize = usize::MAX;

/// Running state of one expanding search, folded over offset groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    /// Best distance seen so far, or `usize::MAX` if nothing was compared.
    pub min_found: usize,
    /// Early-exit threshold for the offset being scanned.
    pub allowed: usize,
    /// Number of distance computations performed.
    pub comparisons: usize,
}

impl SearchState {
    fn new(baseline: usize) -> Self {
        SearchState {
            min_found: UNMATCHED,
            allowed: baseline,
            comparisons: 0,
        }
    }

    /// Whether the search can stop. `unvisited_gap` is the smallest length
    /// difference between the query and any word not visited yet.
    pub fn is_settled(&self, unvisited_gap: Option<usize>) -> bool {
        self.min_found <= self.allowed && unvisited_gap.is_none_or(|gap| gap >= self.min_found)
    }

    fn advance(self) -> Self {
        SearchState {
            allowed: self.allowed + 1,
            ..self
        }
    }
}

/// Details of a single query, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Minimum edit distance to any vocabulary word.
    pub distance: usize,
    /// Whether the exhaustive fallback produced the answer.
    pub used_fallback: bool,
    /// Offset groups fully scanned before the search stopped.
    pub offsets_scanned: usize,
    /// Distance computations, fallback included.
    pub comparisons: usize,
    /// Allowed bound in effect at each scanned offset.
    pub allowed_bounds: Vec<usize>,
}

/// Finds the minimum edit distance from a word to a vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct MatchSearcher<'a> {
    index: &'a VocabularyIndex,
}

impl<'a> MatchSearcher<'a> {
    /// Create a searcher over a built index.
    pub fn new(index: &'a VocabularyIndex) -> Self {
        MatchSearcher { index }
    }

    /// The index being searched.
    pub fn index(&self) -> &'a VocabularyIndex {
        self.index
    }

    /// Minimum edit distance between `word` and any vocabulary word.
    pub fn min_distance(&self, word: &str) -> usize {
        self.run(word, |_, _| {}).distance
    }

    /// Like [`min_distance`](Self::min_distance), also reporting how the
    /// answer was reached.
    pub fn search(&self, word: &str) -> SearchReport {
        let mut allowed_bounds = Vec::new();
        let outcome = self.run(word, |_, state| allowed_bounds.push(state.allowed));

        SearchReport {
            distance: outcome.distance,
            used_fallback: outcome.used_fallback,
            offsets_scanned: allowed_bounds.len(),
            comparisons: outcome.comparisons,
            allowed_bounds,
        }
    }

    /// Brute-force minimum over the raw vocabulary, in load order.
    pub fn min_distance_exhaustive(&self, word: &str) -> usize {
        let matcher = LevenshteinMatcher::new(word.as_bytes());
        let mut best = UNMATCHED;

        for candidate in self.index.vocabulary().words() {
            if let Some(distance) = matcher.distance_threshold(candidate.as_bytes(), best - 1) {
                best = distance;
                if best == 0 {
                    break;
                }
            }
        }

        best
    }

    /// Length to look groups up under, and the initial allowed bound.
    ///
    /// A word longer than `max_offset` is looked up at `max_offset - 1`; its
    /// length gap to the lookup bucket already costs `len - max_offset` edits,
    /// which becomes the baseline.
    fn lookup(&self, word_len: usize) -> (usize, usize) {
        let max_offset = self.index.max_offset();
        if word_len > max_offset {
            (max_offset - 1, word_len - max_offset)
        } else {
            (word_len, 1)
        }
    }

    fn run<F>(&self, word: &str, mut on_offset: F) -> Outcome
    where
        F: FnMut(usize, &SearchState),
    {
        // A distance-1 hit ends the scan, so exact members must be caught first
        if self.index.vocabulary().contains(word) {
            return Outcome {
                distance: 0,
                used_fallback: false,
                comparisons: 0,
            };
        }

        let matcher = LevenshteinMatcher::new(word.as_bytes());
        let word_len = word.len();
        let (lookup_len, baseline) = self.lookup(word_len);

        let folded = (0..=self.index.max_offset()).try_fold(
            SearchState::new(baseline),
            |state, offset| {
                let group = self.index.offset_group(lookup_len, offset);
                let state = match scan_group(&matcher, group, state) {
                    ControlFlow::Continue(state) => state,
                    ControlFlow::Break(done) => return ControlFlow::Break(done),
                };
                on_offset(offset, &state);

                let gap = self.index.unvisited_gap(word_len, lookup_len, offset);
                if state.is_settled(gap) {
                    ControlFlow::Break(state)
                } else {
                    ControlFlow::Continue(state.advance())
                }
            },
        );

        match folded {
            ControlFlow::Break(state) => Outcome {
                distance: state.min_found,
                used_fallback: false,
                comparisons: state.comparisons,
            },
            ControlFlow::Continue(state) => {
                debug!(
                    "No settled match for {word:?} within {} offsets ({} comparisons), scanning full vocabulary",
                    self.index.max_offset() + 1,
                    state.comparisons
                );
                Outcome {
                    distance: self.min_distance_exhaustive(word),
                    used_fallback: true,
                    comparisons: state.comparisons + self.index.vocabulary().len(),
                }
            }
        }
    }
}

struct Outcome {
    distance: usize,
    used_fallback: bool,
    comparisons: usize,
}

/// Compare every candidate in a group. Breaks with the final state as soon
/// as a distance of 0 or 1 turns up, since nothing can beat it.
fn scan_group(
    matcher: &LevenshteinMatcher<'_>,
    group: OffsetGroup<'_>,
    mut state: SearchState,
) -> ControlFlow<SearchState, SearchState> {
    for candidate in group.candidates(matcher.first_byte()) {
        state.comparisons += 1;
        let Some(distance) = matcher.distance_threshold(candidate.as_bytes(), state.min_found - 1)
        else {
            continue;
        };
        state.min_found = distance;
        if distance <= 1 {
            return ControlFlow::Break(state);
        }
    }
    ControlFlow::Continue(state)
}
