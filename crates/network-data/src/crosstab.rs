//! Two-dimensional count tables: the year × month heatmap and the company ×
//! position bucket tables.

use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;

use network_core::models::{ConnectionTable, PositionBucket};
use network_core::tabular::CountMatrix;

use crate::frequency::{buckets, company_frequency};

/// Default number of companies in the seniority pivot.
pub const DEFAULT_PIVOT_COMPANIES: usize = 25;

/// Calendar months, the fixed heatmap columns.
const MONTHS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Year × month connection counts.
///
/// Rows are the years that have a dated record, ascending; columns are always
/// months 1 through 12. Returns an empty matrix when no record is dated.
pub fn connections_heatmap(table: &ConnectionTable) -> CountMatrix<i32, u32> {
    let years: BTreeSet<i32> = table.connection_dates().map(|d| d.year()).collect();
    if years.is_empty() {
        return CountMatrix::empty();
    }

    let row_of: HashMap<i32, usize> = years.iter().enumerate().map(|(i, y)| (*y, i)).collect();
    let mut heatmap = CountMatrix::zeros(years.into_iter().collect(), MONTHS.to_vec());
    for date in table.connection_dates() {
        let month_idx = date.month0() as usize;
        if let Some(&row) = row_of.get(&date.year()) {
            heatmap.increment(row, month_idx);
        }
    }
    heatmap
}

/// Company × position bucket counts over every record.
///
/// Rows are companies in ascending name order. Columns are the buckets that
/// occur at least once, in canonical bucket order.
pub fn company_position_matrix(table: &ConnectionTable) -> CountMatrix<String, PositionBucket> {
    let record_buckets = buckets(table);

    let companies: BTreeSet<&str> = table.iter().map(|r| r.company.as_str()).collect();
    let present: Vec<PositionBucket> = PositionBucket::ALL
        .iter()
        .copied()
        .filter(|b| record_buckets.contains(b))
        .collect();

    let row_of: HashMap<&str, usize> = companies.iter().enumerate().map(|(i, c)| (*c, i)).collect();
    let col_of: HashMap<PositionBucket, usize> =
        present.iter().enumerate().map(|(i, b)| (*b, i)).collect();

    let rows: Vec<String> = companies.iter().map(|c| c.to_string()).collect();
    let mut matrix = CountMatrix::zeros(rows, present);
    for (record, bucket) in table.iter().zip(&record_buckets) {
        if let (Some(&row), Some(&col)) = (row_of.get(record.company.as_str()), col_of.get(bucket)) {
            matrix.increment(row, col);
        }
    }
    matrix
}

/// Bucket counts for the `top_n` most connected companies.
///
/// Always has the five bucket columns in canonical order. Rows ascend by
/// their total, ties ascending by company name.
pub fn seniority_by_company_pivot(
    table: &ConnectionTable,
    top_n: usize,
) -> CountMatrix<String, PositionBucket> {
    let mut top: Vec<String> = company_frequency(table)
        .head(top_n)
        .keys()
        .cloned()
        .collect();
    top.sort();

    let row_of: HashMap<&str, usize> = top
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();
    let record_buckets = buckets(table);

    let mut pivot = CountMatrix::zeros(top.clone(), PositionBucket::ALL.to_vec());
    for (record, bucket) in table.iter().zip(&record_buckets) {
        if let Some(&row) = row_of.get(record.company.as_str()) {
            pivot.increment(row, bucket_index(*bucket));
        }
    }
    pivot.sort_rows_by_key(|_, cells| cells.iter().sum::<usize>());
    pivot
}

fn bucket_index(bucket: PositionBucket) -> usize {
    PositionBucket::ALL
        .iter()
        .position(|b| *b == bucket)
        .unwrap_or(PositionBucket::ALL.len() - 1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use network_core::models::ConnectionRecord;

    use crate::frequency::add_position_bucket_column;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn at(company: &str, position: &str) -> ConnectionRecord {
        ConnectionRecord::new("A", "B", company, position, None)
    }

    fn dated(d: Option<NaiveDate>) -> ConnectionRecord {
        ConnectionRecord::new("A", "B", "Acme", "Engineer", d)
    }

    // ── connections_heatmap ───────────────────────────────────────────────────

    #[test]
    fn test_heatmap_shape_and_counts() {
        let table = ConnectionTable::new(vec![
            dated(date(2022, 3, 1)),
            dated(date(2024, 3, 9)),
            dated(date(2024, 3, 20)),
            dated(date(2024, 12, 31)),
            dated(None),
        ]);
        let heatmap = connections_heatmap(&table);

        assert_eq!(heatmap.rows(), &[2022, 2024]);
        assert_eq!(heatmap.columns(), &MONTHS);
        assert_eq!(heatmap.get(&2024, &3), Some(2));
        assert_eq!(heatmap.get(&2024, &12), Some(1));
        assert_eq!(heatmap.get(&2022, &12), Some(0));
        assert_eq!(heatmap.get(&2023, &1), None);
    }

    #[test]
    fn test_heatmap_sums_to_dated_records() {
        let table = ConnectionTable::new(vec![
            dated(date(2021, 1, 1)),
            dated(date(2021, 7, 4)),
            dated(date(2023, 2, 2)),
            dated(None),
        ]);
        let heatmap = connections_heatmap(&table);
        assert_eq!(heatmap.total(), 3);
        assert!(heatmap.iter_rows().all(|(_, cells)| cells.len() == 12));
    }

    #[test]
    fn test_heatmap_empty_without_dates() {
        let table = ConnectionTable::new(vec![dated(None)]);
        assert!(connections_heatmap(&table).is_empty());
        assert!(connections_heatmap(&ConnectionTable::default()).is_empty());
    }

    // ── company_position_matrix ───────────────────────────────────────────────

    #[test]
    fn test_company_position_matrix_rows_and_columns() {
        let table = ConnectionTable::new(vec![
            at("Zeta", "CEO"),
            at("Acme", "Engineering Manager"),
            at("Acme", "Engineer"),
            at("Acme", "Account Manager"),
        ]);
        let matrix = company_position_matrix(&table);

        assert_eq!(matrix.rows(), &["Acme".to_string(), "Zeta".to_string()]);
        assert_eq!(
            matrix.columns(),
            &[
                PositionBucket::Executive,
                PositionBucket::Manager,
                PositionBucket::Other
            ]
        );
        assert_eq!(matrix.row(0), &[0, 2, 1]);
        assert_eq!(matrix.row(1), &[1, 0, 0]);
        assert_eq!(matrix.total(), table.len());
    }

    #[test]
    fn test_company_position_matrix_uses_existing_annotation() {
        let table = add_position_bucket_column(&ConnectionTable::new(vec![at("Acme", "CEO")]))
            .map_records(|mut r| {
                r.position_bucket = Some(PositionBucket::Director);
                r
            });
        let matrix = company_position_matrix(&table);
        assert_eq!(matrix.columns(), &[PositionBucket::Director]);
        assert_eq!(matrix.get(&"Acme".to_string(), &PositionBucket::Director), Some(1));
    }

    #[test]
    fn test_company_position_matrix_empty_table() {
        let matrix = company_position_matrix(&ConnectionTable::default());
        assert!(matrix.is_empty());
        assert!(matrix.columns().is_empty());
    }

    // ── seniority_by_company_pivot ────────────────────────────────────────────

    fn pivot_table() -> ConnectionTable {
        ConnectionTable::new(vec![
            at("Acme", "CEO"),
            at("Acme", "Director of Sales"),
            at("Acme", "Engineer"),
            at("Beta", "VP Marketing"),
            at("Beta", "Engineer"),
            at("Gamma", "Sales Manager"),
            at("Delta", "Engineer"),
            at("Delta", "Engineer"),
        ])
    }

    #[test]
    fn test_pivot_has_five_fixed_columns() {
        let pivot = seniority_by_company_pivot(&pivot_table(), DEFAULT_PIVOT_COMPANIES);
        assert_eq!(pivot.columns(), &PositionBucket::ALL);
        assert!(pivot.iter_rows().all(|(_, cells)| cells.len() == 5));
    }

    #[test]
    fn test_pivot_rows_ascend_by_total_ties_by_name() {
        let pivot = seniority_by_company_pivot(&pivot_table(), DEFAULT_PIVOT_COMPANIES);
        let rows: Vec<&str> = pivot.rows().iter().map(String::as_str).collect();
        assert_eq!(rows, vec!["Gamma", "Beta", "Delta", "Acme"]);

        let totals: Vec<usize> = (0..pivot.rows().len()).map(|i| pivot.row_total(i)).collect();
        assert_eq!(totals, vec![1, 2, 2, 3]);
        assert_eq!(pivot.get(&"Acme".to_string(), &PositionBucket::Director), Some(1));
        assert_eq!(pivot.get(&"Beta".to_string(), &PositionBucket::Vp), Some(1));
    }

    #[test]
    fn test_pivot_limits_to_top_companies() {
        let pivot = seniority_by_company_pivot(&pivot_table(), 2);
        let rows: Vec<&str> = pivot.rows().iter().map(String::as_str).collect();
        assert_eq!(rows, vec!["Beta", "Acme"]);
    }

    #[test]
    fn test_pivot_empty_table_keeps_columns() {
        let pivot = seniority_by_company_pivot(&ConnectionTable::default(), 5);
        assert!(pivot.is_empty());
        assert_eq!(pivot.columns().len(), 5);
    }
}
