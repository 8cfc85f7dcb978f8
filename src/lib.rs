// Timesheet Ledger - Core Library
// Identity resolution for free-text names plus time-entry consolidation.
//
// Two entry points: resolve() turns raw observations into canonical
// identities (pausing on ambiguous matches until a human confirms), and
// consolidate() merges raw time rows per identity into a ledger with
// weekly overtime allocation. Transport, spreadsheet parsing, and storage
// live with the callers; everything in here is pure and per-request.

pub mod aggregation;
pub mod confidence;
pub mod confirmation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod matching;
pub mod normalize;
pub mod overtime;
pub mod pipeline;
pub mod registry;
pub mod similarity;

// Re-export commonly used types
pub use aggregation::EntryAggregator;
pub use confidence::{build_match_result, classify, Classification};
pub use confirmation::{ConfirmationEntry, ConfirmationLedger, ConfirmationMap};
pub use config::{
    ConfidenceThresholds, EnabledAlgorithms, ResolutionConfig, SimilarityWeights,
};
pub use error::{LedgerError, Result};
pub use ledger::{
    ConsolidationReport, IdentityLedger, ResolvedRow, TimeCategory, TimeEntry, TimeEntryInput,
};
pub use matching::{ConfidenceTier, MatchEngine, MatchResult, Suggestion};
pub use normalize::{is_blank, normalize};
pub use overtime::OvertimeAllocator;
pub use pipeline::{
    consolidate, resolve, BatchWarning, RawObservation, ResolutionPipeline, ResolveOutcome,
    ResolvedBatch,
};
pub use registry::{IdentityKind, Registry, RegistryEntry};
pub use similarity::{
    jaccard_similarity, levenshtein_distance, levenshtein_similarity, word_similarity,
    SimilarityScorer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
