// 🧮 Entry Aggregation - Merge raw time rows into unique ledger entries
//
// Multiple observations of the same work collapse to one entry per
// (identity, date, region, category); duplicate keys add their hours.
// Holiday markers are the exception: a holiday either happened on a date
// or it didn't, so repeats are ignored rather than summed.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::{ResolvedRow, TimeCategory, TimeEntry};

/// Hours at or below this are treated as zero
const HOURS_EPSILON: f64 = 1e-9;

type AggregationKey = (String, NaiveDate, String, TimeCategory);

// ============================================================================
// ENTRY AGGREGATOR
// ============================================================================

#[derive(Debug, Default)]
pub struct EntryAggregator;

impl EntryAggregator {
    pub fn new() -> Self {
        EntryAggregator
    }

    /// Merge raw rows into at most one entry per key.
    ///
    /// Output is deterministic: sorted by identity, date, region, category.
    /// Entries whose merged hours are not strictly positive are dropped.
    pub fn aggregate(&self, rows: &[ResolvedRow]) -> Vec<TimeEntry> {
        let mut merged: BTreeMap<AggregationKey, TimeEntry> = BTreeMap::new();

        for row in rows {
            let key = (
                row.identity.clone(),
                row.entry.date,
                row.entry.region.clone(),
                row.entry.category,
            );

            match merged.get_mut(&key) {
                Some(existing) => {
                    // A repeated holiday marker is the same holiday, not more hours
                    if row.entry.category != TimeCategory::Holiday {
                        existing.hours += row.entry.hours;
                        if existing.overtime_rate.is_none() {
                            existing.overtime_rate = row.entry.overtime_rate;
                        }
                    }
                }
                None => {
                    merged.insert(
                        key,
                        TimeEntry {
                            identity: row.identity.clone(),
                            date: row.entry.date,
                            region: row.entry.region.clone(),
                            category: row.entry.category,
                            hours: row.entry.hours,
                            overtime_rate: row.entry.overtime_rate,
                        },
                    );
                }
            }
        }

        merged
            .into_values()
            .filter(|entry| entry.hours > HOURS_EPSILON)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        identity: &str,
        date: (i32, u32, u32),
        region: &str,
        category: TimeCategory,
        hours: f64,
    ) -> ResolvedRow {
        ResolvedRow {
            identity: identity.to_string(),
            entry: crate::ledger::TimeEntryInput {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                region: region.to_string(),
                category,
                hours,
                overtime_rate: None,
            },
        }
    }

    #[test]
    fn test_duplicate_rows_merge_additively() {
        let aggregator = EntryAggregator::new();

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 3.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 4.0),
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 7.0);
        assert_eq!(entries[0].region, "North");
        assert_eq!(entries[0].category, TimeCategory::Regular);
    }

    #[test]
    fn test_distinct_keys_stay_separate() {
        let aggregator = EntryAggregator::new();

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 8.0),
            row("Jack Allan", (2025, 6, 3), "North", TimeCategory::Regular, 8.0),
            row("Jack Allan", (2025, 6, 2), "South", TimeCategory::Regular, 2.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Travel, 1.0),
            row("Maria Lopez", (2025, 6, 2), "North", TimeCategory::Regular, 8.0),
        ]);

        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_holiday_recorded_at_most_once() {
        let aggregator = EntryAggregator::new();

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Holiday, 8.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Holiday, 8.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Holiday, 8.0),
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 8.0);
    }

    #[test]
    fn test_holiday_on_different_dates_are_separate() {
        let aggregator = EntryAggregator::new();

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Holiday, 8.0),
            row("Jack Allan", (2025, 6, 3), "North", TimeCategory::Holiday, 8.0),
        ]);

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_zero_hour_rows_are_dropped() {
        let aggregator = EntryAggregator::new();

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 0.0),
            row("Jack Allan", (2025, 6, 3), "North", TimeCategory::Regular, 8.0),
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 8.0);
    }

    #[test]
    fn test_output_is_sorted_and_deterministic() {
        let aggregator = EntryAggregator::new();

        let rows = vec![
            row("Maria Lopez", (2025, 6, 3), "South", TimeCategory::Regular, 8.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 8.0),
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Travel, 1.0),
        ];

        let entries = aggregator.aggregate(&rows);

        assert_eq!(entries[0].identity, "Jack Allan");
        assert_eq!(entries[0].category, TimeCategory::Regular);
        assert_eq!(entries[1].category, TimeCategory::Travel);
        assert_eq!(entries[2].identity, "Maria Lopez");

        let mut reversed = rows;
        reversed.reverse();
        assert_eq!(aggregator.aggregate(&reversed).len(), 3);
    }

    #[test]
    fn test_overtime_rate_kept_from_first_row_that_has_one() {
        let aggregator = EntryAggregator::new();

        let mut with_rate = row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 3.0);
        with_rate.entry.overtime_rate = Some(1.5);

        let entries = aggregator.aggregate(&[
            row("Jack Allan", (2025, 6, 2), "North", TimeCategory::Regular, 4.0),
            with_rate,
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 7.0);
        assert_eq!(entries[0].overtime_rate, Some(1.5));
    }
}
