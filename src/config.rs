// ⚙️ Resolution Configuration - Explicit per-call settings
//
// Thresholds and algorithm toggles are passed into every resolution run
// rather than read from process-wide state, so concurrent batches stay
// independent and test behavior is reproducible.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

// ============================================================================
// CONFIDENCE THRESHOLDS
// ============================================================================

/// Score bands for classifying a fuzzy match (0-100 scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Minimum score for a HIGH confidence match (default: 90)
    pub high: f64,

    /// Minimum score for a MEDIUM confidence match (default: 70)
    pub medium: f64,

    /// Minimum score for a LOW confidence match (default: 50)
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        ConfidenceThresholds {
            high: 90.0,
            medium: 70.0,
            low: 50.0,
        }
    }
}

// ============================================================================
// SIMILARITY ALGORITHM TOGGLES
// ============================================================================

/// Which similarity components participate in scoring.
///
/// At least one must be enabled; an all-false configuration is rejected
/// up front instead of silently scoring everything 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnabledAlgorithms {
    /// Levenshtein edit-distance similarity
    pub edit: bool,

    /// Character-set Jaccard similarity
    pub jaccard: bool,

    /// Greedy word-level similarity
    pub word: bool,
}

impl EnabledAlgorithms {
    pub fn any_enabled(&self) -> bool {
        self.edit || self.jaccard || self.word
    }
}

impl Default for EnabledAlgorithms {
    fn default() -> Self {
        EnabledAlgorithms {
            edit: true,
            jaccard: true,
            word: true,
        }
    }
}

/// Relative weight of each enabled similarity component.
///
/// Weights are renormalized over the enabled set, so a single enabled
/// algorithm always ends up with weight 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub edit: f64,
    pub jaccard: f64,
    pub word: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        SimilarityWeights {
            edit: 0.4,
            jaccard: 0.3,
            word: 0.3,
        }
    }
}

// ============================================================================
// RESOLUTION CONFIG
// ============================================================================

/// Full configuration for one resolution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Confidence tier bands
    pub thresholds: ConfidenceThresholds,

    /// Score at which a match is adopted silently, no confirmation (default: 95)
    pub auto_accept_score: f64,

    /// Minimum top-suggestion score worth asking a human about (default: 70)
    pub strong_suggestion_floor: f64,

    /// Maximum suggestions kept per input (default: 5)
    pub max_suggestions: usize,

    /// Minimum score for a candidate to appear as a suggestion (default: 50)
    pub cutoff: f64,

    /// Enabled similarity components
    pub algorithms: EnabledAlgorithms,

    /// Component weights
    pub weights: SimilarityWeights,

    /// Whether LOW-tier matches also request confirmation (default: false,
    /// LOW matches are informational only)
    pub confirm_low_matches: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        ResolutionConfig {
            thresholds: ConfidenceThresholds::default(),
            auto_accept_score: 95.0,
            strong_suggestion_floor: 70.0,
            max_suggestions: 5,
            cutoff: 50.0,
            algorithms: EnabledAlgorithms::default(),
            weights: SimilarityWeights::default(),
            confirm_low_matches: false,
        }
    }
}

impl ResolutionConfig {
    /// Check the configuration is usable before running a batch
    pub fn validate(&self) -> Result<()> {
        if !self.algorithms.any_enabled() {
            return Err(LedgerError::Config(
                "no similarity algorithm enabled".to_string(),
            ));
        }

        let enabled_weight = self.enabled_weight_sum();
        if enabled_weight <= 0.0 {
            return Err(LedgerError::Config(
                "enabled similarity weights sum to zero".to_string(),
            ));
        }

        let t = &self.thresholds;
        if t.high < t.medium || t.medium < t.low {
            return Err(LedgerError::Config(format!(
                "thresholds must be ordered high >= medium >= low (got {} / {} / {})",
                t.high, t.medium, t.low
            )));
        }

        Ok(())
    }

    /// Sum of weights over enabled algorithms (renormalization divisor)
    pub fn enabled_weight_sum(&self) -> f64 {
        let mut sum = 0.0;
        if self.algorithms.edit {
            sum += self.weights.edit;
        }
        if self.algorithms.jaccard {
            sum += self.weights.jaccard;
        }
        if self.algorithms.word {
            sum += self.weights.word;
        }
        sum
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ResolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thresholds.high, 90.0);
        assert_eq!(config.thresholds.medium, 70.0);
        assert_eq!(config.thresholds.low, 50.0);
        assert_eq!(config.auto_accept_score, 95.0);
        assert_eq!(config.strong_suggestion_floor, 70.0);
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.cutoff, 50.0);
        assert!(!config.confirm_low_matches);
    }

    #[test]
    fn test_all_algorithms_disabled_is_rejected() {
        let mut config = ResolutionConfig::default();
        config.algorithms = EnabledAlgorithms {
            edit: false,
            jaccard: false,
            word: false,
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("no similarity algorithm enabled"));
    }

    #[test]
    fn test_zero_weight_for_only_enabled_algorithm_is_rejected() {
        let mut config = ResolutionConfig::default();
        config.algorithms = EnabledAlgorithms {
            edit: true,
            jaccard: false,
            word: false,
        };
        config.weights.edit = 0.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unordered_thresholds_are_rejected() {
        let mut config = ResolutionConfig::default();
        config.thresholds.medium = 95.0; // above high

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_weight_sum_single_algorithm() {
        let mut config = ResolutionConfig::default();
        config.algorithms = EnabledAlgorithms {
            edit: false,
            jaccard: true,
            word: false,
        };

        assert_eq!(config.enabled_weight_sum(), 0.3);
    }
}
