use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a configured timezone name into a [`Tz`].
///
/// `"auto"` resolves to the system timezone. Unknown names fall back to UTC
/// and log a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    let name = if tz_name.eq_ignore_ascii_case("auto") {
        get_system_timezone()
    } else {
        tz_name.to_string()
    };

    name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{}\", falling back to UTC", name);
        Tz::UTC
    })
}

/// Validate that `tz_name` is `"auto"` or a recognised IANA identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.eq_ignore_ascii_case("auto") || tz_name.parse::<Tz>().is_ok()
}

// ── Reference dates ───────────────────────────────────────────────────────────

/// The calendar date of `instant` as observed in `tz`.
pub fn date_in(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in(Utc::now(), tz)
}

/// January 1 of the year containing `date`.
pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// `date` shifted back by `days`, saturating at the earliest representable date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(chrono::Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// `true` when `date` falls on the same month and day as `today`.
pub fn is_anniversary(date: NaiveDate, today: NaiveDate) -> bool {
    date.month() == today.month() && date.day() == today.day()
}

// ── Permissive date parsing ───────────────────────────────────────────────────

/// Date-only layouts accepted in the Connected On column, most specific first.
/// The LinkedIn export writes `"15 Jan 2024"`.
const DATE_FORMATS: &[&str] = &[
    "%d %b %Y",
    "%d %B %Y",
    "%d %b %y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d.%m.%Y",
];

/// Smallest year a four-digit layout may yield. `%Y` also accepts one or two
/// digits, so `"06/02/24"` would otherwise parse as year 6 under `%Y/%m/%d`
/// before the `%y` layouts are tried.
const MIN_PLAUSIBLE_YEAR: i32 = 100;

/// Date-time layouts whose time component is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a Connected On cell into a calendar date.
///
/// Accepts the export's native `"15 Jan 2024"` form, ISO dates, US-style
/// slash dates, long month names, and RFC 3339 / naive date-times (time of
/// day is discarded). Returns `None` for blank or unrecognised values rather
/// than failing.
pub fn parse_connection_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let plausible = |date: NaiveDate| date.year() >= MIN_PLAUSIBLE_YEAR;

    let parsed = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .chain(DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.date()),
        )
        .find(|date| plausible(*date));
    if parsed.is_some() {
        return parsed;
    }

    debug!("could not parse connection date \"{}\"", s);
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
