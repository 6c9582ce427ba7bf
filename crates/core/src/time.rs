use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats how long ago `at` happened relative to `now`.
///
/// Breakpoints: under a minute is "Just now", then minutes, hours,
/// "Yesterday" for exactly one day, days up to a week, weeks up to 30 days
/// and 30-day months beyond that. Timestamps in the future read "Just now".
#[must_use]
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds();
    if secs < MINUTE {
        return "Just now".to_string();
    }
    if secs < HOUR {
        return format!("{}m ago", secs / MINUTE);
    }
    if secs < DAY {
        return format!("{}h ago", secs / HOUR);
    }

    let days = secs / DAY;
    match days {
        1 => "Yesterday".to_string(),
        2..=7 => format!("{days} days ago"),
        8..=30 => plural_ago(days / 7, "week"),
        _ => plural_ago(days / 30, "month"),
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Calendar days from today to `date`, both taken at UTC midnight.
///
/// Negative for dates in the past, zero for later today.
#[must_use]
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (start_of_day(date) - start_of_day(now)).num_days()
}

/// Midnight (UTC) of the day containing `now`.
#[must_use]
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
