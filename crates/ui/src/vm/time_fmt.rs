use chrono::{DateTime, Utc};
use noun_core::time::relative_time;

/// "3h ago" style label for something that already happened.
#[must_use]
pub fn ago_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    relative_time(at, now)
}

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}
