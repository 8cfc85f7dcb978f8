// ⏱️ Overtime Allocation - Weekly threshold on regular hours
//
// Regular hours above the weekly threshold (default 40) become overtime,
// drained from the most recent entries of the week first. Travel and
// holiday hours never participate in the threshold; whether travel
// should count toward it is a business-policy decision, and the current
// policy excludes it.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{LedgerError, Result};
use crate::ledger::{TimeCategory, TimeEntry};

const HOURS_EPSILON: f64 = 1e-9;

/// Tolerance for the hour-conservation check
const CONSERVATION_TOLERANCE: f64 = 1e-6;

// ============================================================================
// OVERTIME ALLOCATOR
// ============================================================================

pub struct OvertimeAllocator {
    /// Weekly regular-hour threshold (default: 40.0)
    pub weekly_threshold: f64,
}

impl OvertimeAllocator {
    pub fn new() -> Self {
        OvertimeAllocator {
            weekly_threshold: 40.0,
        }
    }

    pub fn with_threshold(weekly_threshold: f64) -> Self {
        OvertimeAllocator { weekly_threshold }
    }

    /// Monday-anchored start of the week containing `date`
    pub fn week_start(date: NaiveDate) -> NaiveDate {
        let days_from_monday = date.weekday().number_from_monday() as i64 - 1;
        date - Duration::days(days_from_monday)
    }

    /// Redistribute regular hours above the weekly threshold into overtime.
    ///
    /// Per identity and week: excess = total - threshold is drained from
    /// the week's entries latest date first; each drained amount becomes a
    /// new overtime entry with the same date, region, and overtime rate.
    /// Regular entries drained to zero are removed. Hours are conserved;
    /// a conservation failure is a defect and aborts the run.
    pub fn allocate(&self, entries: Vec<TimeEntry>) -> Result<Vec<TimeEntry>> {
        let mut entries = entries;
        let mut created: Vec<TimeEntry> = Vec::new();

        // Weekly buckets of regular-entry indices, keyed for determinism
        let mut buckets: BTreeMap<(String, NaiveDate), Vec<usize>> = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if entry.category == TimeCategory::Regular {
                let key = (entry.identity.clone(), Self::week_start(entry.date));
                buckets.entry(key).or_default().push(i);
            }
        }

        for ((identity, week), mut indices) in buckets {
            let before: f64 = indices.iter().map(|&i| entries[i].hours).sum();
            if before <= self.weekly_threshold + HOURS_EPSILON {
                continue;
            }

            let mut remaining = before - self.weekly_threshold;
            let mut converted = 0.0;

            // Latest work first: the most recent entries are the ones that
            // pushed the week over the threshold
            indices.sort_by(|&a, &b| entries[b].date.cmp(&entries[a].date));

            for &i in &indices {
                if remaining <= HOURS_EPSILON {
                    break;
                }

                let delta = entries[i].hours.min(remaining);
                if delta <= HOURS_EPSILON {
                    continue;
                }

                entries[i].hours -= delta;
                remaining -= delta;
                converted += delta;

                created.push(TimeEntry {
                    identity: entries[i].identity.clone(),
                    date: entries[i].date,
                    region: entries[i].region.clone(),
                    category: TimeCategory::Overtime,
                    hours: delta,
                    overtime_rate: entries[i].overtime_rate,
                });
            }

            if remaining > CONSERVATION_TOLERANCE {
                return Err(LedgerError::InvariantViolation(format!(
                    "{:.4}h of excess could not be absorbed for {} in week of {}",
                    remaining, identity, week
                )));
            }

            let after: f64 = indices.iter().map(|&i| entries[i].hours).sum();
            if (after + converted - before).abs() > CONSERVATION_TOLERANCE {
                return Err(LedgerError::InvariantViolation(format!(
                    "hours not conserved for {} in week of {}: {:.4} before, {:.4} after",
                    identity,
                    week,
                    before,
                    after + converted
                )));
            }
        }

        entries.extend(created);
        entries.retain(|e| !(e.category == TimeCategory::Regular && e.hours <= HOURS_EPSILON));

        entries.sort_by(|a, b| {
            (a.identity.as_str(), a.date, a.region.as_str(), a.category).cmp(&(
                b.identity.as_str(),
                b.date,
                b.region.as_str(),
                b.category,
            ))
        });

        Ok(entries)
    }
}

impl Default for OvertimeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
