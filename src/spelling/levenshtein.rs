//! Levenshtein distance over byte strings.
//!
//! Words are compared byte by byte: lengths, offsets and edits all count
//! bytes, not Unicode scalars.

use std::cmp::min;

/// Calculate the Levenshtein distance between two byte strings.
/// This is the minimum number of single-byte edits (insertions, deletions or substitutions)
/// required to change one word into another.
pub fn levenshtein_distance(s1: &[u8], s2: &[u8]) -> usize {
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    // Keep the shorter string on the inner loop to keep the rows small.
    let (outer, inner) = if s1.len() >= s2.len() {
        (s1, s2)
    } else {
        (s2, s1)
    };

    let mut prev_row: Vec<usize> = (0..=inner.len()).collect();
    let mut curr_row = vec![0; inner.len() + 1];

    for (i, &a) in outer.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, &b) in inner.iter().enumerate() {
            let cost = usize::from(a != b);
            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[inner.len()]
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
/// Returns None if the distance exceeds the threshold, which is cheaper than a full
/// computation when most candidates are far away.
pub fn levenshtein_distance_threshold(s1: &[u8], s2: &[u8], threshold: usize) -> Option<usize> {
    let len1 = s1.len();
    let len2 = s2.len();

    // A length difference of d forces at least d edits
    if len1.abs_diff(len2) > threshold {
        return None;
    }

    if len1 == 0 {
        return (len2 <= threshold).then_some(len2);
    }
    if len2 == 0 {
        return (len1 <= threshold).then_some(len1);
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = usize::from(s1[i - 1] != s2[j - 1]);

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        // Row minima never decrease, so the final distance is at least this
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    (distance <= threshold).then_some(distance)
}

/// Distance calculator bound to a single query word, compared against many candidates.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher<'a> {
    query: &'a [u8],
}

impl<'a> LevenshteinMatcher<'a> {
    /// Create a new matcher for the given query.
    pub fn new(query: &'a [u8]) -> Self {
        LevenshteinMatcher { query }
    }

    /// Get the query bytes.
    pub fn query(&self) -> &[u8] {
        self.query
    }

    /// First byte of the query, if any.
    pub fn first_byte(&self) -> Option<u8> {
        self.query.first().copied()
    }

    /// Calculate distance to a candidate.
    pub fn distance(&self, candidate: &[u8]) -> usize {
        levenshtein_distance(self.query, candidate)
    }

    /// Calculate distance with threshold for early termination.
    pub fn distance_threshold(&self, candidate: &[u8], threshold: usize) -> Option<usize> {
        levenshtein_distance_threshold(self.query, candidate, threshold)
    }

    /// Check if a candidate is within the given edit distance threshold.
    pub fn is_match(&self, candidate: &[u8], max_distance: usize) -> bool {
        self.distance_threshold(candidate, max_distance).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lev(a: &str, b: &str) -> usize {
        levenshtein_distance(a.as_bytes(), b.as_bytes())
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(lev("", ""), 0);
        assert_eq!(lev("", "a"), 1);
        assert_eq!(lev("a", ""), 1);
        assert_eq!(lev("a", "a"), 0);
        assert_eq!(lev("ab", "ac"), 1);
        assert_eq!(lev("abc", "def"), 3);
        assert_eq!(lev("kitten", "sitting"), 3);
        assert_eq!(lev("sitting", "kitten"), 3);
        assert_eq!(lev("SEARCH", "SERACH"), 2); // transposition costs two edits
        assert_eq!(lev("XYZQP", "HELLO"), 5);
    }

    #[test]
    fn test_distance_is_byte_based() {
        // "É" is two bytes in UTF-8
        assert_eq!(lev("É", "E"), 2);
        assert_eq!(lev("CAFÉ", "CAFE"), 2);
    }

    #[test]
    fn test_levenshtein_distance_threshold() {
        let t = |a: &str, b: &str, k| levenshtein_distance_threshold(a.as_bytes(), b.as_bytes(), k);

        assert_eq!(t("kitten", "sitting", 3), Some(3));
        assert_eq!(t("kitten", "sitting", 2), None);
        assert_eq!(t("search", "search", 0), Some(0));
        assert_eq!(t("a", "abc", 1), None);
        assert_eq!(t("a", "ab", 1), Some(1));
        assert_eq!(t("", "abc", 3), Some(3));
        assert_eq!(t("abc", "", 2), None);
    }

    #[test]
    fn test_threshold_agrees_with_full_distance() {
        let words = ["CAT", "COT", "COAT", "DOG", "BIRD", "HELLO", "", "ABRACADABRA"];
        for a in words {
            for b in words {
                let full = lev(a, b);
                for k in 0..12 {
                    let bounded = levenshtein_distance_threshold(a.as_bytes(), b.as_bytes(), k);
                    if full <= k {
                        assert_eq!(bounded, Some(full), "{a} vs {b} at {k}");
                    } else {
                        assert_eq!(bounded, None, "{a} vs {b} at {k}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_levenshtein_matcher() {
        let matcher = LevenshteinMatcher::new(b"SEARCH");

        assert_eq!(matcher.query(), b"SEARCH");
        assert_eq!(matcher.first_byte(), Some(b'S'));
        assert_eq!(matcher.distance(b"SEARCH"), 0);
        assert_eq!(matcher.distance(b"SERACH"), 2);
        assert!(matcher.is_match(b"SERACH", 2));
        assert!(!matcher.is_match(b"COMPLETELY_DIFFERENT", 2));

        assert_eq!(LevenshteinMatcher::new(b"").first_byte(), None);
    }
}
