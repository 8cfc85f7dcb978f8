// ✋ Confirmation Workflow - Ambiguous matches awaiting a human decision
//
// A match that needs approval and has at least one suggestion worth asking
// about becomes a pending entry, keyed by (input, source tag). The caller
// answers with a confirmation map; decisions are scoped to one run and
// never written back into the registry.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::matching::Suggestion;
use crate::registry::Registry;

// ============================================================================
// CONFIRMATION ENTRY
// ============================================================================

/// One ambiguous observation waiting for an explicit decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationEntry {
    /// The raw input text as observed
    pub input: String,

    /// Where the observation came from (sheet name, upload id, ...)
    pub source_tag: String,

    pub line_number: Option<u32>,

    /// Ranked candidates, best first
    pub suggestions: Vec<Suggestion>,
}

// ============================================================================
// CONFIRMATION LEDGER
// ============================================================================

/// Accumulates pending confirmations for one resolution run.
///
/// Inserts are idempotent per (input, source tag): the same ambiguous cell
/// observed twice produces one question, not two.
#[derive(Debug, Default)]
pub struct ConfirmationLedger {
    pending: Vec<ConfirmationEntry>,
    seen: HashSet<(String, String)>,
}

impl ConfirmationLedger {
    pub fn new() -> Self {
        ConfirmationLedger::default()
    }

    /// Record a pending confirmation. Returns false if the (input, source
    /// tag) pair was already pending.
    pub fn record_pending(
        &mut self,
        input: &str,
        source_tag: &str,
        line_number: Option<u32>,
        suggestions: Vec<Suggestion>,
    ) -> bool {
        let key = (input.to_string(), source_tag.to_string());
        if !self.seen.insert(key) {
            return false;
        }

        self.pending.push(ConfirmationEntry {
            input: input.to_string(),
            source_tag: source_tag.to_string(),
            line_number,
            suggestions,
        });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Consume the ledger, yielding the pending set in observation order
    pub fn into_pending(self) -> Vec<ConfirmationEntry> {
        self.pending
    }
}

// ============================================================================
// CONFIRMATION MAP
// ============================================================================

/// Caller-supplied decisions: input text → chosen canonical name.
///
/// `None` means "skip this observation entirely". A non-null decision is
/// ground truth for every occurrence of that exact input text in the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationMap {
    mappings: HashMap<String, Option<String>>,
}

impl ConfirmationMap {
    pub fn new() -> Self {
        ConfirmationMap::default()
    }

    /// Map an input text to its confirmed canonical name
    pub fn confirm(&mut self, input: &str, canonical: &str) {
        self.mappings
            .insert(input.to_string(), Some(canonical.to_string()));
    }

    /// Mark an input text as skipped
    pub fn skip(&mut self, input: &str) {
        self.mappings.insert(input.to_string(), None);
    }

    /// Decision for an input text, if one was supplied
    pub fn decision(&self, input: &str) -> Option<&Option<String>> {
        self.mappings.get(input)
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Decode a caller payload: a JSON object of input → name-or-null.
    ///
    /// Anything else (non-object root, non-string keys are impossible in
    /// JSON, non-string non-null values) is a malformed payload.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            LedgerError::MalformedConfirmation(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            ))
        })?;

        let mut map = ConfirmationMap::new();
        for (input, decision) in object {
            match decision {
                serde_json::Value::String(name) => map.confirm(input, name),
                serde_json::Value::Null => map.skip(input),
                other => {
                    return Err(LedgerError::MalformedConfirmation(format!(
                        "decision for {:?} must be a string or null, got {}",
                        input,
                        json_type_name(other)
                    )));
                }
            }
        }
        Ok(map)
    }

    pub fn from_json_str(payload: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| LedgerError::MalformedConfirmation(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Every confirmed name must exist in the registry; a decision that
    /// points at an unknown canonical name aborts the batch before any
    /// ledger work happens.
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        for (input, decision) in &self.mappings {
            if let Some(name) = decision {
                if !registry.contains(name) {
                    return Err(LedgerError::MalformedConfirmation(format!(
                        "{:?} maps to {:?}, which is not in the registry",
                        input, name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
