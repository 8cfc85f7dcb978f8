// 📒 Time Ledger Models - Entries, per-identity ledgers, report totals

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// TIME CATEGORY
// ============================================================================

/// What kind of hours a time entry records
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TimeCategory {
    Regular,
    Overtime,
    Travel,
    Holiday,
}

impl TimeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeCategory::Regular => "REGULAR",
            TimeCategory::Overtime => "OVERTIME",
            TimeCategory::Travel => "TRAVEL",
            TimeCategory::Holiday => "HOLIDAY",
        }
    }
}

// ============================================================================
// TIME ENTRIES
// ============================================================================

/// One raw time row as extracted by the caller, before aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryInput {
    pub date: NaiveDate,

    pub region: String,

    pub category: TimeCategory,

    /// Hours worked; non-positive rows are dropped during aggregation
    pub hours: f64,

    /// Pay multiplier carried onto overtime entries split from this row
    pub overtime_rate: Option<f64>,
}

/// A raw row already attributed to a resolved identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRow {
    /// Canonical identity the row belongs to
    pub identity: String,

    pub entry: TimeEntryInput,
}

/// One consolidated ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub identity: String,
    pub date: NaiveDate,
    pub region: String,
    pub category: TimeCategory,
    pub hours: f64,
    pub overtime_rate: Option<f64>,
}

// ============================================================================
// IDENTITY LEDGER
// ============================================================================

/// All consolidated entries for one identity, plus derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityLedger {
    pub identity: String,

    pub entries: Vec<TimeEntry>,

    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub travel_hours: f64,
    pub holiday_hours: f64,
    pub total_hours: f64,

    /// Distinct regions worked, sorted
    pub regions: Vec<String>,
}

impl IdentityLedger {
    /// Build a ledger from already-allocated entries, deriving the totals
    pub fn from_entries(identity: String, entries: Vec<TimeEntry>) -> Self {
        let mut regular_hours = 0.0;
        let mut overtime_hours = 0.0;
        let mut travel_hours = 0.0;
        let mut holiday_hours = 0.0;
        let mut regions: Vec<String> = Vec::new();

        for entry in &entries {
            match entry.category {
                TimeCategory::Regular => regular_hours += entry.hours,
                TimeCategory::Overtime => overtime_hours += entry.hours,
                TimeCategory::Travel => travel_hours += entry.hours,
                TimeCategory::Holiday => holiday_hours += entry.hours,
            }
            if !regions.contains(&entry.region) {
                regions.push(entry.region.clone());
            }
        }
        regions.sort();

        IdentityLedger {
            identity,
            total_hours: regular_hours + overtime_hours + travel_hours + holiday_hours,
            entries,
            regular_hours,
            overtime_hours,
            travel_hours,
            holiday_hours,
            regions,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {:.2}h total ({:.2} regular, {:.2} overtime, {:.2} travel, {:.2} holiday) across {} region(s)",
            self.identity,
            self.total_hours,
            self.regular_hours,
            self.overtime_hours,
            self.travel_hours,
            self.holiday_hours,
            self.regions.len()
        )
    }
}

// ============================================================================
// CONSOLIDATION REPORT
// ============================================================================

/// Final output of a consolidation pass: one ledger per identity plus
/// per-region totals across all identities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub ledgers: BTreeMap<String, IdentityLedger>,

    /// Total hours per region, all categories included
    pub region_hours: BTreeMap<String, f64>,
}

impl ConsolidationReport {
    pub fn identity(&self, name: &str) -> Option<&IdentityLedger> {
        self.ledgers.get(name)
    }

    pub fn total_hours(&self) -> f64 {
        self.ledgers.values().map(|l| l.total_hours).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} identities, {} regions, {:.2}h total",
            self.ledgers.len(),
            self.region_hours.len(),
            self.total_hours()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
