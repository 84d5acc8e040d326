//! Frequency counts and title annotations.
//!
//! Annotation never touches the caller's table: each `add_*_column` function
//! returns a new table with the annotation recomputed on every record.

use std::borrow::Cow;

use network_core::classifier::{bucket_position, classify_seniority};
use network_core::models::{ConnectionTable, PositionBucket, SeniorityLevel};
use network_core::tabular::CountSeries;

/// Company → connection count, most frequent first.
pub fn company_frequency(table: &ConnectionTable) -> CountSeries<String> {
    CountSeries::value_counts(table.iter().map(|r| r.company.clone()))
}

/// Position → connection count, most frequent first.
pub fn position_frequency(table: &ConnectionTable) -> CountSeries<String> {
    CountSeries::value_counts(table.iter().map(|r| r.position.clone()))
}

/// Copy of `table` with a [`SeniorityLevel`] attached to every record.
///
/// Existing annotations are overwritten, so applying this twice yields the
/// same values as applying it once.
pub fn add_seniority_column(table: &ConnectionTable) -> ConnectionTable {
    table.map_records(|mut record| {
        record.seniority = Some(classify_seniority(record.position.as_str()));
        record
    })
}

/// Copy of `table` with a [`PositionBucket`] attached to every record.
pub fn add_position_bucket_column(table: &ConnectionTable) -> ConnectionTable {
    table.map_records(|mut record| {
        record.position_bucket = Some(bucket_position(record.position.as_str()));
        record
    })
}

/// Seniority level → connection count, most frequent first.
///
/// An unannotated table is annotated on a private copy first.
pub fn seniority_distribution(table: &ConnectionTable) -> CountSeries<SeniorityLevel> {
    let annotated = with_seniority(table);
    CountSeries::value_counts(annotated.iter().filter_map(|r| r.seniority))
}

/// `table` itself when fully annotated with seniority, otherwise an annotated copy.
pub(crate) fn with_seniority(table: &ConnectionTable) -> Cow<'_, ConnectionTable> {
    if table.has_seniority() {
        Cow::Borrowed(table)
    } else {
        Cow::Owned(add_seniority_column(table))
    }
}

/// `table` itself when fully bucketed, otherwise a bucketed copy.
pub(crate) fn with_position_bucket(table: &ConnectionTable) -> Cow<'_, ConnectionTable> {
    if table.has_position_bucket() {
        Cow::Borrowed(table)
    } else {
        Cow::Owned(add_position_bucket_column(table))
    }
}

/// Bucket of every record, in table order.
pub(crate) fn buckets(table: &ConnectionTable) -> Vec<PositionBucket> {
    with_position_bucket(table)
        .iter()
        .map(|r| r.position_bucket.unwrap_or(PositionBucket::Other))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
