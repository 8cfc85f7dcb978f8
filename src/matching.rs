// 🎯 Match Engine - Rank registry candidates against one input
//
// Scores every candidate of a kind, keeps those above the cutoff, and
// returns the best few as ranked suggestions. Classification into
// confidence tiers happens afterwards (see confidence.rs).

use serde::{Deserialize, Serialize};

use crate::config::ResolutionConfig;
use crate::error::Result;
use crate::normalize::normalize;
use crate::similarity::SimilarityScorer;

// ============================================================================
// CONFIDENCE TIER
// ============================================================================

/// How trustworthy a fuzzy match is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    NoMatch,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Medium => "MEDIUM",
            ConfidenceTier::Low => "LOW",
            ConfidenceTier::NoMatch => "NO_MATCH",
        }
    }
}

// ============================================================================
// SUGGESTION
// ============================================================================

/// One ranked candidate for an input string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Canonical name from the registry
    pub name: String,

    /// Similarity score, 0-100
    pub score: f64,
}

// ============================================================================
// MATCH RESULT
// ============================================================================

/// Outcome of resolving one input string against a registry.
///
/// `matched` is non-null only when the tier is not `NoMatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The raw input text as observed
    pub input: String,

    /// Canonical name adopted (or proposed) for this input
    pub matched: Option<String>,

    /// Best score found, 0-100
    pub confidence_score: f64,

    pub confidence_tier: ConfidenceTier,

    /// Ranked candidates above the cutoff, best first
    pub suggestions: Vec<Suggestion>,

    /// Whether a human must approve before this match is adopted
    pub needs_confirmation: bool,
}

impl MatchResult {
    /// Result for input that matched nothing (or was blank)
    pub fn no_match(input: String, suggestions: Vec<Suggestion>) -> Self {
        MatchResult {
            input,
            matched: None,
            confidence_score: 0.0,
            confidence_tier: ConfidenceTier::NoMatch,
            suggestions,
            needs_confirmation: true,
        }
    }

    /// Result for input resolved by an explicit human confirmation.
    ///
    /// Confirmed mappings are ground truth: full score, no suggestions,
    /// nothing further to approve.
    pub fn confirmed(input: String, canonical: String) -> Self {
        MatchResult {
            input,
            matched: Some(canonical),
            confidence_score: 100.0,
            confidence_tier: ConfidenceTier::High,
            suggestions: Vec::new(),
            needs_confirmation: false,
        }
    }

    pub fn best_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }
}

// ============================================================================
// MATCH ENGINE
// ============================================================================

pub struct MatchEngine {
    scorer: SimilarityScorer,

    /// Minimum score for a candidate to be kept (default: 50)
    cutoff: f64,

    /// Maximum suggestions returned (default: 5)
    max_suggestions: usize,
}

impl MatchEngine {
    pub fn from_config(config: &ResolutionConfig) -> Result<Self> {
        Ok(MatchEngine {
            scorer: SimilarityScorer::from_config(config)?,
            cutoff: config.cutoff,
            max_suggestions: config.max_suggestions,
        })
    }

    /// Rank candidates for one input string.
    ///
    /// Candidates keep their original spelling in the suggestions; scoring
    /// runs on normalized forms. Ties keep registry order (stable sort).
    /// Blank input returns no suggestions without invoking the scorer.
    pub fn rank(&self, input: &str, candidates: &[String]) -> Vec<Suggestion> {
        let normalized_input = normalize(input);
        if normalized_input.is_empty() {
            return Vec::new();
        }

        let mut suggestions: Vec<Suggestion> = candidates
            .iter()
            .filter_map(|candidate| {
                let score = self.scorer.score(&normalized_input, &normalize(candidate));
                if score >= self.cutoff {
                    Some(Suggestion {
                        name: candidate.clone(),
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        suggestions.truncate(self.max_suggestions);
        suggestions
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn default_engine() -> MatchEngine {
        MatchEngine::from_config(&ResolutionConfig::default()).unwrap()
    }

    #[test]
    fn test_exact_match_scores_100() {
        let engine = default_engine();
        let suggestions = engine.rank("Jack Allan", &names(&["Jack Allan", "Maria Lopez"]));

        assert_eq!(suggestions[0].name, "Jack Allan");
        assert_eq!(suggestions[0].score, 100.0);
    }

    #[test]
    fn test_case_and_punctuation_noise_still_scores_100() {
        let engine = default_engine();
        let suggestions = engine.rank("  JACK  ALLAN. ", &names(&["Jack Allan"]));

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].score, 100.0);
    }

    #[test]
    fn test_candidates_below_cutoff_are_dropped() {
        let engine = default_engine();
        let suggestions = engine.rank("Jack Allan", &names(&["Jack Allan", "Wei Zhang"]));

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Jack Allan");
    }

    #[test]
    fn test_suggestions_sorted_descending() {
        let engine = default_engine();
        let suggestions = engine.rank(
            "Jack Alan",
            &names(&["Maria Lopez", "Jack Allan", "Jack Mallan"]),
        );

        assert!(suggestions.len() >= 2);
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(suggestions[0].name, "Jack Allan");
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let engine = default_engine();
        // Identical candidates score identically; first registered wins
        let suggestions = engine.rank("Jack Allan", &names(&["Jack Allan", "Jack Allan"]));

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].score, suggestions[1].score);
        assert_eq!(suggestions[0].name, "Jack Allan");
    }

    #[test]
    fn test_truncates_to_max_suggestions() {
        let mut config = ResolutionConfig::default();
        config.max_suggestions = 2;
        let engine = MatchEngine::from_config(&config).unwrap();

        let suggestions = engine.rank(
            "Jack Allan",
            &names(&["Jack Allan", "Jack Alan", "Jack Allans", "Jacky Allan"]),
        );

        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_blank_input_yields_no_suggestions() {
        let engine = default_engine();

        assert!(engine.rank("", &names(&["Jack Allan"])).is_empty());
        assert!(engine.rank("   \t", &names(&["Jack Allan"])).is_empty());
        // Punctuation-only normalizes to empty as well
        assert!(engine.rank("??!", &names(&["Jack Allan"])).is_empty());
    }

    #[test]
    fn test_empty_candidate_list() {
        let engine = default_engine();
        assert!(engine.rank("Jack Allan", &[]).is_empty());
    }

    #[test]
    fn test_match_result_constructors() {
        let miss = MatchResult::no_match("??".to_string(), Vec::new());
        assert_eq!(miss.confidence_tier, ConfidenceTier::NoMatch);
        assert!(miss.matched.is_none());
        assert!(miss.needs_confirmation);

        let hit = MatchResult::confirmed("Jon Allan".to_string(), "Jack Allan".to_string());
        assert_eq!(hit.confidence_tier, ConfidenceTier::High);
        assert_eq!(hit.confidence_score, 100.0);
        assert_eq!(hit.matched.as_deref(), Some("Jack Allan"));
        assert!(hit.suggestions.is_empty());
        assert!(!hit.needs_confirmation);
    }
}
