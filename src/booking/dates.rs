//! Booking date strings.
//!
//! Bookings persist their date range as display strings such as
//! "9 Jul 2025". Reading them back can fail on rows written by older
//! builds; malformed values render as a sentinel instead of erroring.

use chrono::NaiveDate;

/// Sentinel shown when a persisted date string cannot be read back.
pub const UNKNOWN_DATE: &str = "Unknown";

const DATE_FMT: &str = "%-d %b %Y";

/// Render a date in the persisted display format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Parse a persisted date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Re-render a persisted date string, mapping malformed input to
/// [`UNKNOWN_DATE`].
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Some(date) => format_date(date),
        None => UNKNOWN_DATE.to_string(),
    }
}
