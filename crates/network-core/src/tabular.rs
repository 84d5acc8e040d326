//! Small in-memory result shapes shared by the analysis functions.
//!
//! [`CountSeries`] is an ordered label → count mapping and [`CountMatrix`] a
//! dense two-dimensional table of counts with labelled rows and columns.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

// ── CountSeries ───────────────────────────────────────────────────────────────

/// Ordered mapping of label to count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountSeries<K> {
    entries: Vec<(K, usize)>,
}

impl<K> CountSeries<K> {
    /// Wrap pre-ordered entries as-is.
    pub fn from_entries(entries: Vec<(K, usize)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, usize)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Labels in series order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Keep only the first `n` entries.
    pub fn head(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

impl<K: PartialEq> CountSeries<K> {
    /// Count for `key`, or `None` when the label never occurred.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, n)| *n)
    }
}

impl<K: Eq + Hash + Clone> CountSeries<K> {
    /// Count occurrences of each item, most frequent first.
    ///
    /// Labels are grouped in first-encountered order and then stably sorted
    /// by descending count, so equal counts keep their first-seen order.
    pub fn value_counts<I>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<(K, usize)> = Vec::new();

        for item in items {
            match index.get(&item) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(item.clone(), entries.len());
                    entries.push((item, 1));
                }
            }
        }

        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }
}

impl<K> Default for CountSeries<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<'a, K> IntoIterator for &'a CountSeries<K> {
    type Item = &'a (K, usize);
    type IntoIter = std::slice::Iter<'a, (K, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── CountMatrix ───────────────────────────────────────────────────────────────

/// Dense table of counts with labelled rows and columns.
///
/// `cells[r][c]` is the count at row label `rows[r]` and column label
/// `columns[c]`. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMatrix<R, C> {
    rows: Vec<R>,
    columns: Vec<C>,
    cells: Vec<Vec<usize>>,
}

impl<R, C> CountMatrix<R, C> {
    /// A matrix with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Zero-filled matrix over the given labels.
    pub fn zeros(rows: Vec<R>, columns: Vec<C>) -> Self {
        let cells = vec![vec![0; columns.len()]; rows.len()];
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    /// Cells of the row at `row_idx`, in column order.
    pub fn row(&self, row_idx: usize) -> &[usize] {
        &self.cells[row_idx]
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> usize {
        self.cells[row_idx][col_idx]
    }

    /// Add one to the cell at (`row_idx`, `col_idx`).
    pub fn increment(&mut self, row_idx: usize, col_idx: usize) {
        self.cells[row_idx][col_idx] += 1;
    }

    pub fn row_total(&self, row_idx: usize) -> usize {
        self.cells[row_idx].iter().sum()
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// `true` when the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row labels paired with their cells, in row order.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&R, &[usize])> {
        self.rows
            .iter()
            .zip(self.cells.iter().map(|c| c.as_slice()))
    }

    /// Reorder rows by a key computed from each row's label and cells.
    /// The sort is stable.
    pub fn sort_rows_by_key<K: Ord>(&mut self, mut key: impl FnMut(&R, &[usize]) -> K) {
        let rows = std::mem::take(&mut self.rows);
        let cells = std::mem::take(&mut self.cells);
        let mut paired: Vec<(R, Vec<usize>)> = rows.into_iter().zip(cells).collect();
        paired.sort_by_key(|(label, row)| key(label, row.as_slice()));
        let (rows, cells): (Vec<R>, Vec<Vec<usize>>) = paired.into_iter().unzip();
        self.rows = rows;
        self.cells = cells;
    }
}

impl<R: PartialEq, C: PartialEq> CountMatrix<R, C> {
    /// Count at the given labels, `None` when either label is absent.
    pub fn get(&self, row: &R, column: &C) -> Option<usize> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.cells[r][c])
    }
}

impl<R, C> Default for CountMatrix<R, C> {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── CountSeries ───────────────────────────────────────────────────────────

    #[test]
    fn test_value_counts_descending() {
        let series = CountSeries::value_counts(["b", "a", "a", "c", "a", "b"]);
        assert_eq!(series.entries(), &[("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_value_counts_ties_keep_first_seen_order() {
        let series = CountSeries::value_counts(["z", "y", "x", "y", "z", "x"]);
        let keys: Vec<&&str> = series.keys().collect();
        assert_eq!(keys, vec![&"z", &"y", &"x"]);
    }

    #[test]
    fn test_value_counts_empty() {
        let series: CountSeries<String> = CountSeries::value_counts(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.total(), 0);
    }

    #[test]
    fn test_head_truncates() {
        let series = CountSeries::value_counts(["a", "b", "b", "c"]).head(2);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&"c"), None);
    }

    #[test]
    fn test_series_serializes_as_pairs() {
        let series = CountSeries::value_counts(["a", "a", "b"]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"[["a",2],["b",1]]"#);
    }

    // ── CountMatrix ───────────────────────────────────────────────────────────

    #[test]
    fn test_zeros_and_increment() {
        let mut m = CountMatrix::zeros(vec!["r1", "r2"], vec![1, 2, 3]);
        m.increment(1, 2);
        m.increment(1, 2);
        assert_eq!(m.get(&"r2", &3), Some(2));
        assert_eq!(m.get(&"r1", &3), Some(0));
        assert_eq!(m.get(&"r9", &3), None);
        assert_eq!(m.total(), 2);
        assert_eq!(m.row_total(1), 2);
    }

    #[test]
    fn test_sort_rows_by_key_is_stable() {
        let mut m = CountMatrix::zeros(vec!["a", "b", "c"], vec!["x"]);
        m.increment(0, 0);
        m.increment(0, 0);
        m.increment(2, 0);
        m.increment(2, 0);
        m.sort_rows_by_key(|_, row| row.iter().sum::<usize>());
        assert_eq!(m.rows(), &["b", "a", "c"]);
        assert_eq!(m.row(0), &[0]);
    }

    #[test]
    fn test_empty_matrix() {
        let m: CountMatrix<i32, u32> = CountMatrix::empty();
        assert!(m.is_empty());
        assert!(m.columns().is_empty());
        assert_eq!(m.total(), 0);
    }
}
