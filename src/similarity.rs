// 📐 Similarity Scorer - Multi-algorithm string similarity (0-100)
//
// Three independent components, each individually enableable:
//   1. Edit-distance similarity (Levenshtein)
//   2. Character-set Jaccard similarity
//   3. Greedy word-level similarity
// Enabled components combine via a weighted average.

use std::collections::HashSet;

use crate::config::ResolutionConfig;
use crate::error::{LedgerError, Result};

/// Minimum pairwise edit similarity for two words to count as matching
/// in the word-level component
const WORD_EDIT_SIMILARITY_FLOOR: f64 = 80.0;

// ============================================================================
// COMPONENT ALGORITHMS
// ============================================================================

/// Calculate Levenshtein distance between two strings
///
/// Minimum number of single-character insertions, deletions, or
/// substitutions (unit cost) to turn one string into the other.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            matrix[i][j] = std::cmp::min(
                std::cmp::min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}

/// Edit-distance similarity: `100 * (max_len - distance) / max_len`.
///
/// Two empty strings score 100.
pub fn levenshtein_similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 100.0;
    }

    let distance = levenshtein_distance(s1, s2);
    100.0 * (max_len - distance) as f64 / max_len as f64
}

/// Character-set Jaccard similarity over distinct characters (not multiset).
///
/// `100 * |A ∩ B| / |A ∪ B|`; an empty union (both strings empty) scores 100.
pub fn jaccard_similarity(s1: &str, s2: &str) -> f64 {
    let set1: HashSet<char> = s1.chars().collect();
    let set2: HashSet<char> = s2.chars().collect();

    let union = set1.union(&set2).count();
    if union == 0 {
        return 100.0;
    }

    let intersection = set1.intersection(&set2).count();
    100.0 * intersection as f64 / union as f64
}

/// Word-level similarity: greedily pair each word of `s1` with an unused
/// word of `s2`, score = pairs / max(word counts) × 100.
///
/// Words pair when equal, one contains the other, or their pairwise edit
/// similarity exceeds 80. The greedy consumption is one-sided, so this
/// component is NOT guaranteed symmetric.
pub fn word_similarity(s1: &str, s2: &str) -> f64 {
    let words1: Vec<&str> = s1.split_whitespace().collect();
    let words2: Vec<&str> = s2.split_whitespace().collect();

    let max_words = words1.len().max(words2.len());
    if max_words == 0 {
        return 100.0;
    }

    let mut used = vec![false; words2.len()];
    let mut matched = 0usize;

    for w1 in &words1 {
        let hit = words2
            .iter()
            .enumerate()
            .find(|(i, w2)| !used[*i] && words_pair(w1, w2));

        if let Some((i, _)) = hit {
            used[i] = true;
            matched += 1;
        }
    }

    100.0 * matched as f64 / max_words as f64
}

fn words_pair(w1: &str, w2: &str) -> bool {
    w1 == w2
        || w1.contains(w2)
        || w2.contains(w1)
        || levenshtein_similarity(w1, w2) > WORD_EDIT_SIMILARITY_FLOOR
}

// ============================================================================
// SIMILARITY SCORER
// ============================================================================

/// Combines the enabled component algorithms into one 0-100 score.
///
/// Construction fails when no component is enabled: a scorer that always
/// returns 0 would silently classify every input as unmatched.
pub struct SimilarityScorer {
    edit_weight: Option<f64>,
    jaccard_weight: Option<f64>,
    word_weight: Option<f64>,
}

impl SimilarityScorer {
    pub fn from_config(config: &ResolutionConfig) -> Result<Self> {
        if !config.algorithms.any_enabled() {
            return Err(LedgerError::Config(
                "no similarity algorithm enabled".to_string(),
            ));
        }

        let divisor = config.enabled_weight_sum();
        if divisor <= 0.0 {
            return Err(LedgerError::Config(
                "enabled similarity weights sum to zero".to_string(),
            ));
        }

        Ok(SimilarityScorer {
            edit_weight: config
                .algorithms
                .edit
                .then(|| config.weights.edit / divisor),
            jaccard_weight: config
                .algorithms
                .jaccard
                .then(|| config.weights.jaccard / divisor),
            word_weight: config
                .algorithms
                .word
                .then(|| config.weights.word / divisor),
        })
    }

    /// Score two already-normalized strings, rounded to two decimals.
    ///
    /// Exact equality short-circuits to 100 without running any component.
    pub fn score(&self, s1: &str, s2: &str) -> f64 {
        if s1 == s2 {
            return 100.0;
        }

        let mut combined = 0.0;
        if let Some(w) = self.edit_weight {
            combined += w * levenshtein_similarity(s1, s2);
        }
        if let Some(w) = self.jaccard_weight {
            combined += w * jaccard_similarity(s1, s2);
        }
        if let Some(w) = self.word_weight {
            combined += w * word_similarity(s1, s2);
        }

        round2(combined)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
