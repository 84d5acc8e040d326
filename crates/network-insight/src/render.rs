//! Plain-text rendering of summaries and reports for stdout.

use std::fmt::{Display, Write};

use network_core::formatting::{format_count, format_days, format_number, truncate_label};
use network_core::models::ConnectionRecord;
use network_core::tabular::{CountMatrix, CountSeries};
use network_data::analysis::{NetworkReport, NetworkSummary};

/// Widest label printed before it is cut with `…`.
const LABEL_WIDTH: usize = 40;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Public renderers ──────────────────────────────────────────────────────────

/// The default listing: total, top companies, top positions and the
/// seniority distribution.
pub fn render_summary(summary: &NetworkSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total connections: {}\n", format_count(summary.total));
    push_series(&mut out, "Top Companies", &summary.top_companies, None);
    out.push('\n');
    push_series(&mut out, "Position Frequency", &summary.top_positions, None);
    out.push('\n');
    push_series(
        &mut out,
        "Seniority Distribution",
        &summary.seniority_distribution,
        None,
    );
    out
}

/// Every section of a [`NetworkReport`], listings cut to `top` rows.
pub fn render_full(report: &NetworkReport, top: usize) -> String {
    let mut out = String::new();
    let kpis = &report.kpis;

    let _ = writeln!(out, "Network Overview (as of {})\n", report.metadata.reference_date);
    let _ = writeln!(out, "Total connections:     {}", format_count(kpis.total));
    let _ = writeln!(out, "Added last 30 days:    {}", format_count(kpis.added_30));
    let _ = writeln!(out, "Added this year:       {}", format_count(kpis.added_year));
    let _ = writeln!(
        out,
        "Median per month:      {}",
        format_number(kpis.median_per_month, 1)
    );
    let _ = writeln!(out, "Longest streak:        {}", format_days(kpis.longest_streak));
    out.push('\n');

    push_series(&mut out, "Top Companies", &report.company_frequency, Some(top));
    out.push('\n');
    push_series(&mut out, "Position Frequency", &report.position_frequency, Some(top));
    out.push('\n');
    push_series(
        &mut out,
        "Seniority Distribution",
        &report.seniority_distribution,
        None,
    );
    out.push('\n');

    out.push_str("Connections Heatmap:\n\n");
    if report.heatmap.is_empty() {
        out.push_str("(no dated connections)\n");
    } else {
        push_matrix(&mut out, "Year", &report.heatmap, |m| {
            MONTH_ABBR
                .get((*m as usize).wrapping_sub(1))
                .map(|s| s.to_string())
                .unwrap_or_else(|| m.to_string())
        });
    }
    out.push('\n');

    out.push_str("Seniority by Company:\n\n");
    if report.seniority_by_company.is_empty() {
        out.push_str("(no companies)\n");
    } else {
        push_matrix(&mut out, "Company", &report.seniority_by_company, |b| {
            b.to_string()
        });
    }
    out.push('\n');

    push_records(&mut out, "Connection Anniversaries Today", &report.anniversaries);
    out.push('\n');
    push_records(&mut out, "Latest Connections", &report.latest_connections);
    out
}

// ── Section helpers ───────────────────────────────────────────────────────────

/// Two-column listing: label padded to the widest label, count right-aligned.
fn push_series<K: Display>(
    out: &mut String,
    title: &str,
    series: &CountSeries<K>,
    limit: Option<usize>,
) {
    let _ = writeln!(out, "{title}:\n");
    let shown = limit.unwrap_or(series.len());
    let rows: Vec<(String, String)> = series
        .iter()
        .take(shown)
        .map(|(k, n)| (truncate_label(&k.to_string(), LABEL_WIDTH), format_count(*n)))
        .collect();
    if rows.is_empty() {
        out.push_str("(none)\n");
        return;
    }

    let label_w = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let count_w = rows.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
    for (label, count) in rows {
        let _ = writeln!(out, "{label:<label_w$}  {count:>count_w$}");
    }
}

/// Grid with a header row, one line per matrix row.
fn push_matrix<R: Display, C>(
    out: &mut String,
    corner: &str,
    matrix: &CountMatrix<R, C>,
    column_label: impl Fn(&C) -> String,
) {
    let labels: Vec<String> = matrix
        .rows()
        .iter()
        .map(|r| truncate_label(&r.to_string(), LABEL_WIDTH))
        .collect();
    let headers: Vec<String> = matrix.columns().iter().map(column_label).collect();

    let label_w = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(corner.len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            matrix
                .iter_rows()
                .map(|(_, cells)| format_count(cells[col]).len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let _ = write!(out, "{corner:<label_w$}");
    for (header, w) in headers.iter().zip(widths.iter().copied()) {
        let _ = write!(out, "  {header:>w$}");
    }
    out.push('\n');

    for (label, (_, cells)) in labels.iter().zip(matrix.iter_rows()) {
        let _ = write!(out, "{label:<label_w$}");
        for (cell, w) in cells.iter().zip(widths.iter().copied()) {
            let _ = write!(out, "  {:>w$}", format_count(*cell));
        }
        out.push('\n');
    }
}

fn push_records(out: &mut String, title: &str, records: &[ConnectionRecord]) {
    let _ = writeln!(out, "{title}:\n");
    if records.is_empty() {
        out.push_str("(none)\n");
        return;
    }
    for record in records {
        let date = record
            .connected_on
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "{date:<10}  {}, {} @ {}",
            record.full_name(),
            record.position,
            record.company
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
