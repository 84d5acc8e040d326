use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use network_core::models::{ConnectionRecord, ConnectionTable};
use network_core::stats::median_of_counts;
use network_core::time_utils::{days_before, is_anniversary, start_of_year};

/// Trailing window, in days, for the "added recently" KPI.
pub const RECENT_WINDOW_DAYS: u64 = 30;

/// Default length of the latest connections list.
pub const DEFAULT_LATEST: usize = 25;

// ── KPI record ────────────────────────────────────────────────────────────────

/// Headline numbers for a connection table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KpiMetrics {
    pub total: usize,
    pub added_30: usize,
    pub added_year: usize,
    pub median_per_month: f64,
    pub longest_streak: usize,
}

/// Compute [`KpiMetrics`] relative to `today`.
///
/// Date metrics only consider non-null dates and stay at zero when the table
/// has no Connected On column.
pub fn kpi_metrics(table: &ConnectionTable, today: NaiveDate) -> KpiMetrics {
    let mut kpis = KpiMetrics {
        total: table.len(),
        ..KpiMetrics::default()
    };
    if !table.has_connected_on() {
        debug!("no Connected On column, date metrics left at zero");
        return kpis;
    }

    let recent_cutoff = days_before(today, RECENT_WINDOW_DAYS);
    let year_start = start_of_year(today);

    for date in table.connection_dates() {
        if date >= recent_cutoff {
            kpis.added_30 += 1;
        }
        if date >= year_start {
            kpis.added_year += 1;
        }
    }
    kpis.median_per_month = median_of_counts(monthly_counts(table).into_values());
    kpis.longest_streak = longest_connection_streak(table);
    kpis
}

/// Connections per (year, month), only for months with at least one.
pub fn monthly_counts(table: &ConnectionTable) -> BTreeMap<(i32, u32), usize> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for date in table.connection_dates() {
        *months.entry((date.year(), date.month())).or_insert(0) += 1;
    }
    months
}

// ── Streak / anniversary / latest ─────────────────────────────────────────────

/// Longest run of consecutive calendar days with at least one connection.
///
/// ```
/// use chrono::NaiveDate;
/// use network_core::models::{ConnectionRecord, ConnectionTable};
/// use network_data::timeline::longest_connection_streak;
///
/// let dated = |d: u32| {
///     ConnectionRecord::new("A", "B", "Acme", "Engineer", NaiveDate::from_ymd_opt(2024, 1, d))
/// };
/// let table = ConnectionTable::new(vec![dated(1), dated(2), dated(3), dated(10)]);
/// assert_eq!(longest_connection_streak(&table), 3);
/// ```
pub fn longest_connection_streak(table: &ConnectionTable) -> usize {
    let days: BTreeSet<NaiveDate> = table.connection_dates().collect();

    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        current = match previous.and_then(|p| p.succ_opt()) {
            Some(next) if next == day => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }
    longest
}

/// Records connected on today's month and day in any year, oldest first.
pub fn connection_anniversary(table: &ConnectionTable, today: NaiveDate) -> Vec<ConnectionRecord> {
    let mut matches: Vec<(NaiveDate, &ConnectionRecord)> = table
        .dated_records()
        .filter(|(_, date)| is_anniversary(*date, today))
        .map(|(record, date)| (date, record))
        .collect();
    matches.sort_by_key(|(date, _)| *date);
    matches.into_iter().map(|(_, r)| r.clone()).collect()
}

/// The `n` most recent connections, newest first.
///
/// Undated records sort after every dated one. Records sharing a date keep
/// their table order.
pub fn latest_connections(table: &ConnectionTable, n: usize) -> Vec<ConnectionRecord> {
    let mut records: Vec<&ConnectionRecord> = table.iter().collect();
    records.sort_by(|a, b| match (a.connected_on, b.connected_on) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    records.into_iter().take(n).cloned().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(first: &str, connected_on: Option<NaiveDate>) -> ConnectionRecord {
        ConnectionRecord::new(first, "Doe", "Acme", "Engineer", connected_on)
    }

    fn table_of(dates: &[Option<NaiveDate>]) -> ConnectionTable {
        ConnectionTable::new(
            dates
                .iter()
                .enumerate()
                .map(|(i, d)| person(&format!("P{i}"), *d))
                .collect(),
        )
    }

    fn first_names(records: &[ConnectionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.first_name.as_str()).collect()
    }

    // ── kpi_metrics ───────────────────────────────────────────────────────────

    #[test]
    fn test_kpi_metrics_counts_windows() {
        let today = date(2024, 6, 15);
        let table = table_of(&[
            Some(date(2024, 6, 10)),  // recent + this year
            Some(date(2024, 5, 16)),  // exactly 30 days back
            Some(date(2024, 5, 15)),  // 31 days back
            Some(date(2024, 1, 1)),   // this year
            Some(date(2023, 12, 31)), // last year
            None,
        ]);

        let kpis = kpi_metrics(&table, today);
        assert_eq!(kpis.total, 6);
        assert_eq!(kpis.added_30, 2);
        assert_eq!(kpis.added_year, 4);
    }

    #[test]
    fn test_kpi_metrics_median_per_month() {
        // Months: 2024-01 → 3, 2024-02 → 1, 2024-04 → 2. Empty March is ignored.
        let table = table_of(&[
            Some(date(2024, 1, 3)),
            Some(date(2024, 1, 9)),
            Some(date(2024, 1, 20)),
            Some(date(2024, 2, 1)),
            Some(date(2024, 4, 7)),
            Some(date(2024, 4, 8)),
        ]);
        let kpis = kpi_metrics(&table, date(2024, 6, 1));
        assert!((kpis.median_per_month - 2.0).abs() < 1e-9);
        assert_eq!(kpis.longest_streak, 2);
    }

    #[test]
    fn test_kpi_metrics_median_even_month_count() {
        let table = table_of(&[
            Some(date(2024, 1, 3)),
            Some(date(2024, 2, 1)),
            Some(date(2024, 2, 5)),
            Some(date(2024, 2, 9)),
            Some(date(2024, 2, 11)),
        ]);
        let kpis = kpi_metrics(&table, date(2024, 6, 1));
        assert!((kpis.median_per_month - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_kpi_metrics_without_connected_on_column() {
        let table = ConnectionTable::without_connected_on(vec![
            person("A", Some(date(2024, 6, 1))),
            person("B", None),
        ]);
        let kpis = kpi_metrics(&table, date(2024, 6, 2));
        assert_eq!(
            kpis,
            KpiMetrics {
                total: 2,
                ..KpiMetrics::default()
            }
        );
    }

    #[test]
    fn test_kpi_metrics_all_dates_null() {
        let kpis = kpi_metrics(&table_of(&[None, None]), date(2024, 6, 2));
        assert_eq!(kpis.total, 2);
        assert_eq!(kpis.added_30, 0);
        assert_eq!(kpis.added_year, 0);
        assert_eq!(kpis.median_per_month, 0.0);
        assert_eq!(kpis.longest_streak, 0);
    }

    #[test]
    fn test_kpi_metrics_empty_table() {
        let kpis = kpi_metrics(&ConnectionTable::default(), date(2024, 6, 2));
        assert_eq!(kpis, KpiMetrics::default());
    }

    // ── monthly_counts ────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_counts_groups_by_year_and_month() {
        let table = table_of(&[
            Some(date(2023, 3, 1)),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 30)),
            None,
        ]);
        let months = monthly_counts(&table);
        assert_eq!(months.len(), 2);
        assert_eq!(months[&(2023, 3)], 1);
        assert_eq!(months[&(2024, 3)], 2);
    }

    // ── longest_connection_streak ─────────────────────────────────────────────

    #[test]
    fn test_streak_basic() {
        let table = table_of(&[
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 2)),
            Some(date(2024, 1, 3)),
            Some(date(2024, 1, 10)),
        ]);
        assert_eq!(longest_connection_streak(&table), 3);
    }

    #[test]
    fn test_streak_no_dates_and_single_date() {
        assert_eq!(longest_connection_streak(&table_of(&[])), 0);
        assert_eq!(longest_connection_streak(&table_of(&[None])), 0);
        assert_eq!(
            longest_connection_streak(&table_of(&[Some(date(2024, 1, 1))])),
            1
        );
    }

    #[test]
    fn test_streak_ignores_duplicates_and_order() {
        let table = table_of(&[
            Some(date(2024, 3, 2)),
            Some(date(2024, 2, 29)),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 1)),
            None,
        ]);
        assert_eq!(longest_connection_streak(&table), 3);
    }

    #[test]
    fn test_streak_crosses_year_boundary() {
        let table = table_of(&[Some(date(2023, 12, 31)), Some(date(2024, 1, 1))]);
        assert_eq!(longest_connection_streak(&table), 2);
    }

    // ── connection_anniversary ────────────────────────────────────────────────

    #[test]
    fn test_anniversary_matches_month_and_day() {
        let today = date(2024, 6, 15);
        let table = ConnectionTable::new(vec![
            person("Late", Some(date(2022, 6, 15))),
            person("Other", Some(date(2022, 6, 16))),
            person("Early", Some(date(2019, 6, 15))),
            person("Today", Some(date(2024, 6, 15))),
            person("Undated", None),
        ]);

        let found = connection_anniversary(&table, today);
        assert_eq!(first_names(&found), vec!["Early", "Late", "Today"]);
    }

    #[test]
    fn test_anniversary_none_found() {
        let table = table_of(&[Some(date(2022, 1, 1)), None]);
        assert!(connection_anniversary(&table, date(2024, 6, 15)).is_empty());
    }

    // ── latest_connections ────────────────────────────────────────────────────

    #[test]
    fn test_latest_descending_with_null_last() {
        let table = ConnectionTable::new(vec![
            person("Undated", None),
            person("Old", Some(date(2020, 1, 1))),
            person("New", Some(date(2024, 1, 1))),
        ]);
        let latest = latest_connections(&table, DEFAULT_LATEST);
        assert_eq!(first_names(&latest), vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_latest_ties_keep_row_order() {
        let same = Some(date(2024, 1, 1));
        let table = ConnectionTable::new(vec![
            person("First", same),
            person("Second", same),
            person("Newest", Some(date(2024, 2, 1))),
            person("Third", same),
        ]);
        let latest = latest_connections(&table, 3);
        assert_eq!(first_names(&latest), vec!["Newest", "First", "Second"]);
    }

    #[test]
    fn test_latest_fewer_records_than_requested() {
        let table = table_of(&[Some(date(2024, 1, 1))]);
        assert_eq!(latest_connections(&table, 25).len(), 1);
        assert!(latest_connections(&table, 0).is_empty());
    }
}
