// ── Median ────────────────────────────────────────────────────────────────────

/// Median of a set of counts in any order.
///
/// An even number of counts averages the two middle values. Returns `0.0`
/// for an empty input.
///
/// ```
/// use network_core::stats::median_of_counts;
///
/// assert_eq!(median_of_counts([3, 1, 2]), 2.0);
/// assert_eq!(median_of_counts([1, 4]), 2.5);
/// ```
pub fn median_of_counts(counts: impl IntoIterator<Item = usize>) -> f64 {
    let mut sorted: Vec<usize> = counts.into_iter().collect();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[mid] as f64,
        _ => (sorted[mid - 1] + sorted[mid]) as f64 / 2.0,
    }
}
