// 🚦 Confidence Classification - Tier and confirmation decision
//
// Maps the best-ranked suggestion to a confidence tier and decides whether
// adopting it requires human approval. All bands come from the config
// passed in at call time.

use crate::config::ResolutionConfig;
use crate::matching::{ConfidenceTier, MatchResult, Suggestion};

/// Tier, adopted name, and confirmation decision for one best suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub tier: ConfidenceTier,
    pub matched: Option<String>,
    pub needs_confirmation: bool,
}

/// Classify the best-ranked suggestion (or the absence of one).
///
/// Bands, from the top:
/// - score >= auto_accept_score: HIGH, adopted silently
/// - high band: HIGH, but a human must approve
/// - medium band: MEDIUM, approval required when the score clears the
///   strong-suggestion floor
/// - low band: LOW, informational only (approval only if the caller opted
///   in via `confirm_low_matches`)
/// - below low, or no suggestion at all: NO_MATCH, flagged unresolved
pub fn classify(best: Option<&Suggestion>, config: &ResolutionConfig) -> Classification {
    let best = match best {
        Some(s) => s,
        None => {
            return Classification {
                tier: ConfidenceTier::NoMatch,
                matched: None,
                needs_confirmation: true,
            }
        }
    };

    let t = &config.thresholds;

    if best.score >= config.auto_accept_score {
        Classification {
            tier: ConfidenceTier::High,
            matched: Some(best.name.clone()),
            needs_confirmation: false,
        }
    } else if best.score >= t.high {
        Classification {
            tier: ConfidenceTier::High,
            matched: Some(best.name.clone()),
            needs_confirmation: true,
        }
    } else if best.score >= t.medium {
        Classification {
            tier: ConfidenceTier::Medium,
            matched: Some(best.name.clone()),
            needs_confirmation: best.score >= config.strong_suggestion_floor,
        }
    } else if best.score >= t.low {
        Classification {
            tier: ConfidenceTier::Low,
            matched: Some(best.name.clone()),
            needs_confirmation: config.confirm_low_matches,
        }
    } else {
        Classification {
            tier: ConfidenceTier::NoMatch,
            matched: None,
            needs_confirmation: true,
        }
    }
}

/// Build the full match result for one input from its ranked suggestions
pub fn build_match_result(
    input: &str,
    suggestions: Vec<Suggestion>,
    config: &ResolutionConfig,
) -> MatchResult {
    let classification = classify(suggestions.first(), config);
    let confidence_score = suggestions.first().map_or(0.0, |s| s.score);

    MatchResult {
        input: input.to_string(),
        matched: classification.matched,
        confidence_score,
        confidence_tier: classification.tier,
        suggestions,
        needs_confirmation: classification.needs_confirmation,
    }
}

// ============================================================================
// TESTS
// ============================================================================
