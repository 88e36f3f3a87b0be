//! Timestamp formatting helpers.

use chrono::NaiveDateTime;

/// Pattern used when timestamps are written to logs in "database style".
pub const DATABASE_STYLE_PATTERN: &str = "%d-%m-%Y %H:%M:%S";

/// Format a local date-time as `dd-MM-yyyy HH:mm:ss`.
pub fn format_database_style(value: &NaiveDateTime) -> String {
    value.format(DATABASE_STYLE_PATTERN).to_string()
}

/// Current local time in `dd-MM-yyyy HH:mm:ss` form.
pub fn now_database_style() -> String {
    format_database_style(&chrono::Local::now().naive_local())
}
