//! CSV loading for contacts exports.
//!
//! Reads a LinkedIn-style `Connections.csv`, validates its header and returns
//! a [`ConnectionTable`] that the analysis functions can trust: Company and
//! Position are never blank and Connected On is a parsed date or `None`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use network_core::error::{NetworkError, Result};
use network_core::models::{ConnectionRecord, ConnectionTable, UNKNOWN_FIELD};
use network_core::time_utils::parse_connection_date;
use tracing::debug;

/// Leading lines LinkedIn puts above the header (a notes block and a blank line).
pub const DEFAULT_SKIP_ROWS: usize = 3;

/// Columns that must be present after header trimming.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "First Name",
    "Last Name",
    "Company",
    "Position",
    "Connected On",
];

/// Optional column, defaulted to an empty string when absent.
pub const EMAIL_COLUMN: &str = "Email Address";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a contacts export from `path`, skipping `skip_rows` leading lines.
///
/// Fails with [`NetworkError::FileNotFound`] for a missing file,
/// [`NetworkError::FileRead`] when the file cannot be read, and
/// [`NetworkError::MissingColumns`] naming every required column absent from
/// the header.
pub fn load_connections(path: &Path, skip_rows: usize) -> Result<ConnectionTable> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => NetworkError::FileNotFound(path.to_path_buf()),
        _ => NetworkError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let table = load_connections_from_reader(BufReader::new(file), skip_rows).map_err(
        |e| match e {
            NetworkError::Io(source) => NetworkError::FileRead {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        },
    )?;

    debug!(
        "Loaded {} connections from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Load a contacts export from any buffered source, e.g. an uploaded file
/// held in memory.
pub fn load_connections_from_reader<R: BufRead>(
    mut reader: R,
    skip_rows: usize,
) -> Result<ConnectionTable> {
    let mut discarded = String::new();
    for _ in 0..skip_rows {
        discarded.clear();
        if reader.read_line(&mut discarded)? == 0 {
            break;
        }
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(clean_header)
        .collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut undated = 0usize;

    for row in csv_reader.records() {
        let row = row?;

        let connected_on = parse_connection_date(cell(&row, Some(columns.connected_on)));
        if connected_on.is_none() {
            undated += 1;
        }

        records.push(
            ConnectionRecord::new(
                cell(&row, Some(columns.first_name)),
                cell(&row, Some(columns.last_name)),
                or_unknown(cell(&row, Some(columns.company))),
                or_unknown(cell(&row, Some(columns.position))),
                connected_on,
            )
            .with_email(cell(&row, columns.email_address)),
        );
    }

    debug!(
        "Parsed {} rows, {} without a usable Connected On date",
        records.len(),
        undated
    );

    Ok(ConnectionTable::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the known columns within a header row.
#[derive(Debug)]
struct ColumnIndex {
    first_name: usize,
    last_name: usize,
    company: usize,
    position: usize,
    connected_on: usize,
    email_address: Option<usize>,
}

impl ColumnIndex {
    /// Locate every required column, reporting all missing ones at once.
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|&name| find(name)).collect();

        match found.as_slice() {
            [Some(first_name), Some(last_name), Some(company), Some(position), Some(connected_on)] => {
                Ok(Self {
                    first_name: *first_name,
                    last_name: *last_name,
                    company: *company,
                    position: *position,
                    connected_on: *connected_on,
                    email_address: find(EMAIL_COLUMN),
                })
            }
            _ => Err(NetworkError::MissingColumns(
                REQUIRED_COLUMNS
                    .iter()
                    .zip(&found)
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            )),
        }
    }
}

/// The cell at `idx`, or `""` when the column is absent or the row is short.
fn cell(row: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).unwrap_or("")
}

/// Trim surrounding whitespace and a UTF-8 byte-order mark from a header.
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        value.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
