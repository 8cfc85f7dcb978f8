// 📇 Identity Registry - Canonical names supplied per request
//
// The registry is request data, not module state: callers build one from
// whatever roster they hold and pass it into each resolution run. Nothing
// here is shared or mutated across batches.

use serde::{Deserialize, Serialize};

// ============================================================================
// IDENTITY KIND
// ============================================================================

/// What kind of identity a canonical name describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    /// A person on the roster
    Employee,

    /// A work region / site
    Region,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Employee => "employee",
            IdentityKind::Region => "region",
        }
    }
}

// ============================================================================
// REGISTRY ENTRY
// ============================================================================

/// One canonical name with its kind tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The authoritative spelling for this identity
    pub name: String,

    pub kind: IdentityKind,
}

impl RegistryEntry {
    pub fn employee(name: &str) -> Self {
        RegistryEntry {
            name: name.to_string(),
            kind: IdentityKind::Employee,
        }
    }

    pub fn region(name: &str) -> Self {
        RegistryEntry {
            name: name.to_string(),
            kind: IdentityKind::Region,
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Candidate lists for one resolution run, partitioned by kind.
///
/// Entry order is preserved within each kind; the match engine uses it as
/// the tie-break for equal scores. Uniqueness of names within a kind is
/// the caller's responsibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    employees: Vec<String>,
    regions: Vec<String>,
}

impl Registry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        let mut registry = Registry::default();
        for entry in entries {
            match entry.kind {
                IdentityKind::Employee => registry.employees.push(entry.name),
                IdentityKind::Region => registry.regions.push(entry.name),
            }
        }
        registry
    }

    /// Candidates for one kind, in registration order
    pub fn candidates(&self, kind: IdentityKind) -> &[String] {
        match kind {
            IdentityKind::Employee => &self.employees,
            IdentityKind::Region => &self.regions,
        }
    }

    /// Whether a canonical name exists under any kind (exact match)
    pub fn contains(&self, name: &str) -> bool {
        self.employees.iter().any(|n| n == name) || self.regions.iter().any(|n| n == name)
    }

    pub fn is_empty(&self, kind: IdentityKind) -> bool {
        self.candidates(kind).is_empty()
    }

    pub fn len(&self) -> usize {
        self.employees.len() + self.regions.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
