//! Text scoring: sums the minimum edit distances of every input token.

use std::time::Instant;

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::{BreathalyzerError, Result};
use crate::spelling::index::VocabularyIndex;
use crate::spelling::searcher::MatchSearcher;

/// Distances already computed during one scoring pass.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entries: AHashMap<String, usize>,
    hits: usize,
}

impl ResultCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        ResultCache::default()
    }

    /// Look up a token, counting the hit.
    pub fn get(&mut self, token: &str) -> Option<usize> {
        let distance = self.entries.get(token).copied();
        if distance.is_some() {
            self.hits += 1;
        }
        distance
    }

    /// Record the distance for a token.
    pub fn insert(&mut self, token: &str, distance: usize) {
        self.entries.insert(token.to_string(), distance);
    }

    /// Number of distinct tokens cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of cached tokens with a non-zero distance.
    pub fn unknown_count(&self) -> usize {
        self.entries.values().filter(|&&d| d > 0).count()
    }

    /// Fold another cache into this one. Entries are per-token and
    /// order-independent, so overlapping keys always agree.
    pub fn merge(&mut self, other: ResultCache) {
        self.hits += other.hits;
        self.entries.extend(other.entries);
    }
}

/// Totals from a scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Sum of the minimum edit distances of all tokens.
    pub changes: usize,
    /// Number of tokens scored.
    pub tokens: usize,
    /// Number of distinct tokens.
    pub distinct_tokens: usize,
    /// Distinct tokens not found verbatim in the vocabulary.
    pub unknown_tokens: usize,
    /// Tokens answered from a cache instead of being searched.
    pub cache_hits: usize,
}

/// Scores tokenized text against a vocabulary index.
pub struct TextScorer<'a> {
    index: &'a VocabularyIndex,
    config: ScoringConfig,
    thread_pool: Option<ThreadPool>,
}

impl<'a> TextScorer<'a> {
    /// Create a sequential scorer.
    pub fn new(index: &'a VocabularyIndex) -> Self {
        TextScorer {
            index,
            config: ScoringConfig::default(),
            thread_pool: None,
        }
    }

    /// Create a scorer with custom configuration.
    pub fn with_config(index: &'a VocabularyIndex, config: ScoringConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = if config.parallel {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.effective_threads())
                .thread_name(|i| format!("breathalyzer-score-{i}"))
                .build()
                .map_err(|e| {
                    BreathalyzerError::internal(format!("Failed to create thread pool: {e}"))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(TextScorer {
            index,
            config,
            thread_pool,
        })
    }

    /// The scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Total changes needed for every token to match the vocabulary.
    pub fn score<S>(&self, tokens: &[S]) -> Result<usize>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.score_with_summary(tokens)?.changes)
    }

    /// Score tokens and report totals.
    pub fn score_with_summary<S>(&self, tokens: &[S]) -> Result<ScoreSummary>
    where
        S: AsRef<str> + Sync,
    {
        if self.index.vocabulary().is_empty() {
            return Err(BreathalyzerError::NoVocabularyLoaded);
        }

        let start = Instant::now();
        let (changes, cache) = match &self.thread_pool {
            Some(pool) if tokens.len() >= self.config.min_shard_size => {
                self.score_sharded(pool, tokens, start)?
            }
            _ => {
                let mut cache = ResultCache::new();
                let changes = self.score_shard(tokens, &mut cache, start)?;
                (changes, cache)
            }
        };

        debug!(
            "Scored {} tokens ({} distinct) in {:?}",
            tokens.len(),
            cache.len(),
            start.elapsed()
        );

        Ok(ScoreSummary {
            changes,
            tokens: tokens.len(),
            distinct_tokens: cache.len(),
            unknown_tokens: cache.unknown_count(),
            cache_hits: cache.hits(),
        })
    }

    fn score_sharded<S>(
        &self,
        pool: &ThreadPool,
        tokens: &[S],
        start: Instant,
    ) -> Result<(usize, ResultCache)>
    where
        S: AsRef<str> + Sync,
    {
        let threads = pool.current_num_threads().max(1);
        let shard_size = tokens.len().div_ceil(threads).max(1);
        debug!(
            "Sharding {} tokens into chunks of {shard_size} across {threads} threads",
            tokens.len()
        );

        let shards: Vec<Result<(usize, ResultCache)>> = pool.install(|| {
            tokens
                .par_chunks(shard_size)
                .map(|shard| {
                    let mut cache = ResultCache::new();
                    let changes = self.score_shard(shard, &mut cache, start)?;
                    Ok((changes, cache))
                })
                .collect()
        });

        let mut total = 0;
        let mut merged = ResultCache::new();
        for shard in shards {
            let (changes, cache) = shard?;
            total += changes;
            merged.merge(cache);
        }
        Ok((total, merged))
    }

    fn score_shard<S: AsRef<str>>(
        &self,
        tokens: &[S],
        cache: &mut ResultCache,
        start: Instant,
    ) -> Result<usize> {
        let vocabulary = self.index.vocabulary();
        let searcher = MatchSearcher::new(self.index);
        let mut changes = 0;

        for token in tokens {
            if let Some(deadline) = self.config.deadline
                && start.elapsed() >= deadline
            {
                return Err(BreathalyzerError::DeadlineExceeded(deadline));
            }

            let token = token.as_ref();
            if let Some(distance) = cache.get(token) {
                changes += distance;
                continue;
            }

            let distance = if vocabulary.contains(token) {
                0
            } else {
                searcher.min_distance(token)
            };
            cache.insert(token, distance);
            changes += distance;
        }

        Ok(changes)
    }
}
