//! Report pipeline for network-insight.
//!
//! Annotates a loaded table once, runs every metric over it and bundles the
//! results into a serializable [`NetworkReport`].

use std::path::Path;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use network_core::error::Result;
use network_core::models::{ConnectionRecord, ConnectionTable, PositionBucket, SeniorityLevel};
use network_core::tabular::{CountMatrix, CountSeries};

use crate::crosstab::{
    company_position_matrix, connections_heatmap, seniority_by_company_pivot,
    DEFAULT_PIVOT_COMPANIES,
};
use crate::frequency::{
    add_position_bucket_column, add_seniority_column, company_frequency, position_frequency,
    seniority_distribution,
};
use crate::loader::load_connections;
use crate::timeline::{
    connection_anniversary, kpi_metrics, latest_connections, KpiMetrics, DEFAULT_LATEST,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for [`analyze_connections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Reference date for the KPI windows and the anniversary lookup.
    pub today: NaiveDate,
    /// Companies in the seniority-by-company pivot.
    pub pivot_companies: usize,
    /// Length of the latest connections list.
    pub latest: usize,
}

impl AnalysisOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            pivot_companies: DEFAULT_PIVOT_COMPANIES,
            latest: DEFAULT_LATEST,
        }
    }
}

/// Metadata produced alongside a report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    pub reference_date: NaiveDate,
    pub records_processed: usize,
    /// Records with a usable connection date.
    pub dated_records: usize,
    /// Wall-clock seconds spent reading the CSV; zero for in-memory tables.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent computing the metrics.
    pub analysis_time_seconds: f64,
}

/// Every metric for one connection table.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub metadata: AnalysisMetadata,
    pub kpis: KpiMetrics,
    pub company_frequency: CountSeries<String>,
    pub position_frequency: CountSeries<String>,
    pub seniority_distribution: CountSeries<SeniorityLevel>,
    pub heatmap: CountMatrix<i32, u32>,
    pub seniority_by_company: CountMatrix<String, PositionBucket>,
    pub company_position_matrix: CountMatrix<String, PositionBucket>,
    pub anniversaries: Vec<ConnectionRecord>,
    pub latest_connections: Vec<ConnectionRecord>,
}

impl NetworkReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The short listing printed by default: totals plus the top companies,
/// top positions and the full seniority distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub total: usize,
    pub top_companies: CountSeries<String>,
    pub top_positions: CountSeries<String>,
    pub seniority_distribution: CountSeries<SeniorityLevel>,
}

impl NetworkSummary {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Build the [`NetworkSummary`] with `top` rows per listing.
pub fn summarize(table: &ConnectionTable, top: usize) -> NetworkSummary {
    NetworkSummary {
        total: table.len(),
        top_companies: company_frequency(table).head(top),
        top_positions: position_frequency(table).head(top),
        seniority_distribution: seniority_distribution(table),
    }
}

/// Run every metric over `table`.
///
/// 1. Annotate a private copy with seniority and position buckets.
/// 2. Compute frequencies, KPIs and cross-tabulations on the copy.
/// 3. Collect the anniversary and latest lists.
/// 4. Return a [`NetworkReport`].
pub fn analyze_connections(table: &ConnectionTable, options: &AnalysisOptions) -> NetworkReport {
    let start = Instant::now();

    // ── Step 1: Annotate ──────────────────────────────────────────────────────
    let annotated = add_position_bucket_column(&add_seniority_column(table));
    debug!("annotated {} records", annotated.len());

    // ── Step 2: Aggregates ────────────────────────────────────────────────────
    let kpis = kpi_metrics(&annotated, options.today);
    let company_frequency = company_frequency(&annotated);
    let position_frequency = position_frequency(&annotated);
    let seniority_distribution = seniority_distribution(&annotated);
    let heatmap = connections_heatmap(&annotated);
    let seniority_by_company = seniority_by_company_pivot(&annotated, options.pivot_companies);
    let company_position_matrix = company_position_matrix(&annotated);

    // ── Step 3: Record lists ──────────────────────────────────────────────────
    let anniversaries = connection_anniversary(&annotated, options.today);
    let latest_connections = latest_connections(&annotated, options.latest);

    // ── Step 4: Build report ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        reference_date: options.today,
        records_processed: annotated.len(),
        dated_records: annotated.connection_dates().count(),
        load_time_seconds: 0.0,
        analysis_time_seconds: start.elapsed().as_secs_f64(),
    };
    debug!(
        "analysis finished in {:.3}s ({} dated of {} records)",
        metadata.analysis_time_seconds, metadata.dated_records, metadata.records_processed
    );

    NetworkReport {
        metadata,
        kpis,
        company_frequency,
        position_frequency,
        seniority_distribution,
        heatmap,
        seniority_by_company,
        company_position_matrix,
        anniversaries,
        latest_connections,
    }
}

/// Load `path` and analyze it, recording the load time in the metadata.
pub fn analyze_file(
    path: &Path,
    skip_rows: usize,
    options: &AnalysisOptions,
) -> Result<NetworkReport> {
    let load_start = Instant::now();
    let table = load_connections(path, skip_rows)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let mut report = analyze_connections(&table, options);
    report.metadata.load_time_seconds = load_time;
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
