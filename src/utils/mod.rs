//! Utility functions and helpers.

pub mod http;
pub mod log;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Render an instant as local wall-clock time in the given zone.
pub fn format_local(at: DateTime<Utc>, tz: Tz) -> String {
    tz.from_utc_datetime(&at.naive_utc())
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}
