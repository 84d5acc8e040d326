use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder written into Company/Position when the export leaves them blank.
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Fine-grained seniority of a job title.
///
/// Variants are declared in classification priority order, followed by the
/// catch-all [`SeniorityLevel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeniorityLevel {
    #[serde(rename = "Entry-Level/Intern")]
    EntryLevel,
    #[serde(rename = "Junior/Associate")]
    Junior,
    #[serde(rename = "Mid-Level/Specialist")]
    MidLevel,
    #[serde(rename = "Senior/Lead/Principal")]
    SeniorLead,
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Senior Manager")]
    SeniorManager,
    #[serde(rename = "Director")]
    Director,
    #[serde(rename = "Senior Director")]
    SeniorDirector,
    #[serde(rename = "VP/SVP/EVP")]
    VicePresident,
    #[serde(rename = "Executive")]
    Executive,
    #[serde(rename = "Other/Uncategorized")]
    Other,
}

impl SeniorityLevel {
    /// Every level, catch-all last.
    pub const ALL: [SeniorityLevel; 11] = [
        SeniorityLevel::EntryLevel,
        SeniorityLevel::Junior,
        SeniorityLevel::MidLevel,
        SeniorityLevel::SeniorLead,
        SeniorityLevel::Manager,
        SeniorityLevel::SeniorManager,
        SeniorityLevel::Director,
        SeniorityLevel::SeniorDirector,
        SeniorityLevel::VicePresident,
        SeniorityLevel::Executive,
        SeniorityLevel::Other,
    ];

    /// Human-readable label, identical to the serialised form.
    pub fn label(self) -> &'static str {
        match self {
            SeniorityLevel::EntryLevel => "Entry-Level/Intern",
            SeniorityLevel::Junior => "Junior/Associate",
            SeniorityLevel::MidLevel => "Mid-Level/Specialist",
            SeniorityLevel::SeniorLead => "Senior/Lead/Principal",
            SeniorityLevel::Manager => "Manager",
            SeniorityLevel::SeniorManager => "Senior Manager",
            SeniorityLevel::Director => "Director",
            SeniorityLevel::SeniorDirector => "Senior Director",
            SeniorityLevel::VicePresident => "VP/SVP/EVP",
            SeniorityLevel::Executive => "Executive",
            SeniorityLevel::Other => "Other/Uncategorized",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse five-way bucket of a job title, used by the company pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PositionBucket {
    Executive,
    #[serde(rename = "VP")]
    Vp,
    Director,
    Manager,
    Other,
}

impl PositionBucket {
    /// Canonical column order for every bucket-keyed table.
    pub const ALL: [PositionBucket; 5] = [
        PositionBucket::Executive,
        PositionBucket::Vp,
        PositionBucket::Director,
        PositionBucket::Manager,
        PositionBucket::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PositionBucket::Executive => "Executive",
            PositionBucket::Vp => "VP",
            PositionBucket::Director => "Director",
            PositionBucket::Manager => "Manager",
            PositionBucket::Other => "Other",
        }
    }
}

impl fmt::Display for PositionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a contacts export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub first_name: String,
    pub last_name: String,
    /// Never empty after loading; blank values become [`UNKNOWN_FIELD`].
    pub company: String,
    /// Never empty after loading; blank values become [`UNKNOWN_FIELD`].
    pub position: String,
    /// `None` when the source value was missing or unparseable.
    pub connected_on: Option<NaiveDate>,
    #[serde(default)]
    pub email_address: String,
    /// Fine classification of `position`, present once the table is annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<SeniorityLevel>,
    /// Coarse bucket of `position`, present once the table is annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_bucket: Option<PositionBucket>,
}

impl ConnectionRecord {
    /// Build an unannotated record with an empty email address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        company: impl Into<String>,
        position: impl Into<String>,
        connected_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: company.into(),
            position: position.into(),
            connected_on,
            email_address: String::new(),
            seniority: None,
            position_bucket: None,
        }
    }

    pub fn with_email(mut self, email_address: impl Into<String>) -> Self {
        self.email_address = email_address.into();
        self
    }

    /// `"First Last"`, trimmed when either half is blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// An ordered, validated table of connection records.
///
/// Rows keep source file order and may repeat. The table also remembers
/// whether the Connected On column was part of its schema: a table built
/// without it yields zero for every date-derived metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTable {
    records: Vec<ConnectionRecord>,
    has_connected_on: bool,
}

impl ConnectionTable {
    /// Table whose schema includes the Connected On column.
    pub fn new(records: Vec<ConnectionRecord>) -> Self {
        Self {
            records,
            has_connected_on: true,
        }
    }

    /// Table whose schema lacks the Connected On column. Any dates carried by
    /// `records` are discarded.
    pub fn without_connected_on(mut records: Vec<ConnectionRecord>) -> Self {
        for record in &mut records {
            record.connected_on = None;
        }
        Self {
            records,
            has_connected_on: false,
        }
    }

    pub fn records(&self) -> &[ConnectionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConnectionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_connected_on(&self) -> bool {
        self.has_connected_on
    }

    /// Records paired with their non-null connection date, in table order.
    pub fn dated_records(&self) -> impl Iterator<Item = (&ConnectionRecord, NaiveDate)> {
        self.records
            .iter()
            .filter_map(|r| r.connected_on.map(|d| (r, d)))
    }

    /// Every non-null connection date, in table order (duplicates kept).
    pub fn connection_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().filter_map(|r| r.connected_on)
    }

    /// `true` when every record carries a seniority annotation.
    pub fn has_seniority(&self) -> bool {
        self.records.iter().all(|r| r.seniority.is_some())
    }

    /// `true` when every record carries a position bucket annotation.
    pub fn has_position_bucket(&self) -> bool {
        self.records.iter().all(|r| r.position_bucket.is_some())
    }

    /// Return a new table with `f` applied to a copy of every record.
    /// The schema flag is carried over; `self` is left untouched.
    pub fn map_records(&self, f: impl FnMut(ConnectionRecord) -> ConnectionRecord) -> Self {
        Self {
            records: self.records.iter().cloned().map(f).collect(),
            has_connected_on: self.has_connected_on,
        }
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a ConnectionTable {
    type Item = &'a ConnectionRecord;
    type IntoIter = std::slice::Iter<'a, ConnectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
