// 🔗 Resolution Pipeline - From raw observations to a consolidated ledger
//
// resolve(): normalize → rank → classify each observation, collecting
// pending confirmations; a batch with open questions is returned to the
// caller instead of being consolidated.
// consolidate(): aggregate resolved time rows and allocate overtime.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregation::EntryAggregator;
use crate::confidence::build_match_result;
use crate::confirmation::{ConfirmationEntry, ConfirmationLedger, ConfirmationMap};
use crate::config::ResolutionConfig;
use crate::error::Result;
use crate::ledger::{ConsolidationReport, IdentityLedger, ResolvedRow};
use crate::matching::{MatchEngine, MatchResult};
use crate::normalize::is_blank;
use crate::overtime::OvertimeAllocator;
use crate::registry::{IdentityKind, Registry};

// ============================================================================
// OBSERVATIONS AND OUTCOMES
// ============================================================================

/// One free-text identity observation extracted by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// The text as it appeared in the source
    pub text: String,

    /// Which registry partition this observation resolves against
    pub kind: IdentityKind,

    /// Where the observation came from (sheet name, upload id, ...)
    pub source_tag: String,

    pub line_number: Option<u32>,
}

/// Batch-level conditions worth reporting, none of them fatal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchWarning {
    /// The registry has no candidates of this kind; every observation of
    /// the kind resolves to NO_MATCH
    EmptyRegistry { kind: IdentityKind },
}

/// A fully resolved batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBatch {
    /// One result per non-skipped observation, in observation order
    pub results: Vec<MatchResult>,

    /// Input texts skipped by explicit or default decision
    pub skipped: Vec<String>,

    pub warnings: Vec<BatchWarning>,
}

/// Outcome of one resolution pass.
///
/// `NeedsConfirmation` is a control-flow branch, not an error: the caller
/// answers the pending questions and resubmits with a confirmation map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    NeedsConfirmation { pending: Vec<ConfirmationEntry> },
    Resolved(ResolvedBatch),
}

// ============================================================================
// RESOLUTION PIPELINE
// ============================================================================

pub struct ResolutionPipeline {
    config: ResolutionConfig,
}

impl ResolutionPipeline {
    /// Build a pipeline for one batch; rejects unusable configuration
    pub fn new(config: ResolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(ResolutionPipeline { config })
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Resolve a batch of observations against the registry.
    ///
    /// `confirmations` distinguishes the two passes: `None` is an initial
    /// pass, where pending confirmations halt the batch; `Some(map)` is a
    /// follow-up pass, where mapped inputs are ground truth and pending
    /// entries left unmapped fall back to the default policy (auto-accept
    /// a top suggestion at or above the high threshold, otherwise skip).
    pub fn resolve(
        &self,
        observations: &[RawObservation],
        registry: &Registry,
        confirmations: Option<&ConfirmationMap>,
    ) -> Result<ResolveOutcome> {
        if let Some(map) = confirmations {
            map.validate(registry)?;
        }

        let engine = MatchEngine::from_config(&self.config)?;

        debug!(
            observations = observations.len(),
            registry_size = registry.len(),
            "resolving batch"
        );

        let mut warnings = Vec::new();
        for kind in [IdentityKind::Employee, IdentityKind::Region] {
            let observed = observations.iter().any(|o| o.kind == kind);
            if observed && registry.is_empty(kind) {
                warn!(kind = kind.as_str(), "registry has no candidates");
                warnings.push(BatchWarning::EmptyRegistry { kind });
            }
        }

        let mut pending_ledger = ConfirmationLedger::new();
        let mut results = Vec::new();
        let mut skipped = Vec::new();

        for obs in observations {
            // Blank cells resolve to NO_MATCH without touching the scorer
            if is_blank(&obs.text) {
                results.push(MatchResult::no_match(obs.text.clone(), Vec::new()));
                continue;
            }

            // An explicit decision for this exact text wins over scoring
            if let Some(map) = confirmations {
                if let Some(decision) = map.decision(&obs.text) {
                    match decision {
                        Some(canonical) => results
                            .push(MatchResult::confirmed(obs.text.clone(), canonical.clone())),
                        None => skipped.push(obs.text.clone()),
                    }
                    continue;
                }
            }

            let suggestions = engine.rank(&obs.text, registry.candidates(obs.kind));
            let result = build_match_result(&obs.text, suggestions, &self.config);

            let strong_top = result
                .best_suggestion()
                .map_or(false, |s| s.score >= self.config.strong_suggestion_floor);

            if result.needs_confirmation && strong_top {
                match confirmations {
                    None => {
                        pending_ledger.record_pending(
                            &obs.text,
                            &obs.source_tag,
                            obs.line_number,
                            result.suggestions.clone(),
                        );
                        results.push(result);
                    }
                    Some(_) => {
                        // Follow-up pass left this one unanswered
                        if let Some(top) = result.best_suggestion() {
                            if top.score >= self.config.thresholds.high {
                                let mut accepted = result.clone();
                                accepted.matched = Some(top.name.clone());
                                accepted.needs_confirmation = false;
                                results.push(accepted);
                            } else {
                                skipped.push(obs.text.clone());
                            }
                        }
                    }
                }
            } else {
                results.push(result);
            }
        }

        if !pending_ledger.is_empty() {
            debug!(pending = pending_ledger.len(), "batch needs confirmation");
            return Ok(ResolveOutcome::NeedsConfirmation {
                pending: pending_ledger.into_pending(),
            });
        }

        Ok(ResolveOutcome::Resolved(ResolvedBatch {
            results,
            skipped,
            warnings,
        }))
    }

    /// Consolidate resolved time rows into the final ledger
    pub fn consolidate(&self, rows: &[ResolvedRow]) -> Result<ConsolidationReport> {
        consolidate(rows)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// One-shot resolution with an explicit config
pub fn resolve(
    observations: &[RawObservation],
    registry: &Registry,
    config: &ResolutionConfig,
    confirmations: Option<&ConfirmationMap>,
) -> Result<ResolveOutcome> {
    ResolutionPipeline::new(config.clone())?.resolve(observations, registry, confirmations)
}

/// Aggregate and overtime-allocate resolved rows into the final ledger
pub fn consolidate(rows: &[ResolvedRow]) -> Result<ConsolidationReport> {
    let aggregator = EntryAggregator::new();
    let allocator = OvertimeAllocator::new();

    let entries = allocator.allocate(aggregator.aggregate(rows))?;

    debug!(entries = entries.len(), "consolidated ledger entries");

    let mut report = ConsolidationReport {
        ledgers: Default::default(),
        region_hours: Default::default(),
    };

    let mut per_identity: std::collections::BTreeMap<String, Vec<_>> = Default::default();
    for entry in entries {
        *report.region_hours.entry(entry.region.clone()).or_insert(0.0) += entry.hours;
        per_identity.entry(entry.identity.clone()).or_default().push(entry);
    }

    for (identity, entries) in per_identity {
        report
            .ledgers
            .insert(identity.clone(), IdentityLedger::from_entries(identity, entries));
    }

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
