// Error types for the timesheet ledger core

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures that indicate a broken precondition rather than bad data.
///
/// Recoverable conditions (blank input, unmatched names, ambiguous matches,
/// an empty registry) are represented inside result values, never here.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration is unusable (e.g. no similarity algorithm enabled)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied confirmation payload failed to parse or validate
    #[error("Malformed confirmation payload: {0}")]
    MalformedConfirmation(String),

    /// An internal invariant was broken (defect, not bad input)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
