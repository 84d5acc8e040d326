use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::{NetworkError, Result};
use crate::time_utils;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyze a LinkedIn Connections.csv export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "network-insight",
    about = "Analyze your LinkedIn Connections.csv export",
    version
)]
pub struct Settings {
    /// Path to Connections.csv
    pub csv: PathBuf,

    /// Informational lines to skip before the header row
    #[arg(long, default_value = "3", env = "NETWORK_INSIGHT_SKIP_ROWS")]
    pub skip_rows: usize,

    /// Rows shown in the company and position listings
    #[arg(long, default_value = "20")]
    pub top: usize,

    /// Companies included in the seniority-by-company pivot
    #[arg(long, default_value = "25")]
    pub pivot_companies: usize,

    /// Rows shown in the latest connections list
    #[arg(long, default_value = "25")]
    pub latest: usize,

    /// Report view
    #[arg(long, default_value = "summary", value_parser = ["summary", "full"])]
    pub view: String,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Timezone used to decide today's date (auto-detected if not specified)
    #[arg(long, default_value = "auto", env = "NETWORK_INSIGHT_TIMEZONE")]
    pub timezone: String,

    /// Reference date (YYYY-MM-DD) overriding today's date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, apply the `--debug` override and
    /// validate the result.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but over an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make a report section meaningless.
    pub fn validate(&self) -> Result<()> {
        for (flag, value) in [
            ("--top", self.top),
            ("--pivot-companies", self.pivot_companies),
            ("--latest", self.latest),
        ] {
            if value == 0 {
                return Err(NetworkError::Config(format!("{flag} must be at least 1")));
            }
        }
        if !time_utils::validate_timezone(&self.timezone) {
            return Err(NetworkError::Config(format!(
                "unknown timezone \"{}\"",
                self.timezone
            )));
        }
        Ok(())
    }

    /// The reference date for wall-clock metrics: `--today` when given,
    /// otherwise the current date in the configured timezone.
    pub fn reference_date(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| time_utils::today_in(time_utils::resolve_timezone(&self.timezone)))
    }

    pub fn is_full_view(&self) -> bool {
        self.view == "full"
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
