//! Randomized cross-checks of the expanding search against brute force.

use breathalyzer::config::MatcherConfig;
use breathalyzer::error::Result;
use breathalyzer::spelling::{MatchSearcher, VocabularyIndex, levenshtein_distance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Small alphabet so random words land close to each other.
const ALPHABET: &[u8] = b"ABCD";

fn random_word(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let len = rng.random_range(min_len..=max_len);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn random_vocabulary(rng: &mut StdRng, size: usize, max_len: usize) -> Vec<String> {
    (0..size).map(|_| random_word(rng, 1, max_len)).collect()
}

fn brute_force(vocabulary: &[String], word: &str) -> usize {
    vocabulary
        .iter()
        .map(|candidate| levenshtein_distance(word.as_bytes(), candidate.as_bytes()))
        .min()
        .unwrap_or(usize::MAX)
}

fn matcher_configs() -> Vec<MatcherConfig> {
    let mut configs = Vec::new();
    for max_offset in [None, Some(1), Some(2), Some(3), Some(5), Some(20)] {
        for first_letter_priority in [true, false] {
            configs.push(MatcherConfig {
                max_offset,
                first_letter_priority,
            });
        }
    }
    configs
}

#[test]
fn test_min_distance_matches_brute_force() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x0b4e_a7a1);

    for round in 0..20 {
        let size = rng.random_range(1..40);
        let max_len = rng.random_range(1..10);
        let vocabulary = random_vocabulary(&mut rng, size, max_len);
        let queries: Vec<String> = (0..25).map(|_| random_word(&mut rng, 0, 14)).collect();

        for config in matcher_configs() {
            let index = VocabularyIndex::from_words(vocabulary.iter().cloned(), &config)?;
            let searcher = MatchSearcher::new(&index);

            for query in &queries {
                let expected = brute_force(&vocabulary, query);
                assert_eq!(
                    searcher.min_distance(query),
                    expected,
                    "round {round}, query {query:?}, config {config:?}, vocabulary {vocabulary:?}"
                );
                assert_eq!(searcher.min_distance_exhaustive(query), expected);
            }
        }
    }
    Ok(())
}

#[test]
fn test_vocabulary_words_score_zero() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let vocabulary = random_vocabulary(&mut rng, 200, 12);

    for config in matcher_configs() {
        let index = VocabularyIndex::from_words(vocabulary.iter().cloned(), &config)?;
        let searcher = MatchSearcher::new(&index);

        for word in &vocabulary {
            assert_eq!(searcher.min_distance(word), 0, "word {word:?}, config {config:?}");
        }
    }
    Ok(())
}

#[test]
fn test_allowed_bound_never_decreases() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let vocabulary = random_vocabulary(&mut rng, 60, 16);

    for config in matcher_configs() {
        let index = VocabularyIndex::from_words(vocabulary.iter().cloned(), &config)?;
        let searcher = MatchSearcher::new(&index);

        for _ in 0..30 {
            let query = random_word(&mut rng, 1, 24);
            let report = searcher.search(&query);
            assert!(
                report.allowed_bounds.windows(2).all(|w| w[0] <= w[1]),
                "bounds {:?} for {query:?}",
                report.allowed_bounds
            );
            assert!(report.offsets_scanned <= index.max_offset() + 1);
        }
    }
    Ok(())
}

#[test]
fn test_long_word_with_small_max_offset() -> Result<()> {
    let config = MatcherConfig {
        max_offset: Some(5),
        ..Default::default()
    };
    let index = VocabularyIndex::from_words(["AB"], &config)?;
    let searcher = MatchSearcher::new(&index);

    let word = format!("AB{}", "Q".repeat(48));
    assert_eq!(word.len(), 50);
    assert_eq!(searcher.min_distance(&word), 48);
    Ok(())
}

#[test]
fn test_first_letter_priority_does_not_change_results() -> Result<()> {
    let vocabulary = ["BAT", "CAT", "HAT", "COAT", "CART", "SCAT", "CA"];
    let on = VocabularyIndex::from_words(vocabulary, &MatcherConfig::default())?;
    let off = VocabularyIndex::from_words(
        vocabulary,
        &MatcherConfig {
            first_letter_priority: false,
            ..Default::default()
        },
    )?;

    for query in ["CUT", "XAT", "CATS", "COATS", "C", "ZZZZZZ", ""] {
        assert_eq!(
            MatchSearcher::new(&on).min_distance(query),
            MatchSearcher::new(&off).min_distance(query),
            "query {query:?}"
        );
    }
    Ok(())
}
