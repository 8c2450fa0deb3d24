//! Date window for fetching appointments.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Number of days ahead to fetch when no explicit range is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Half-open fetch window `[from, to)`.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for DateRange {
    /// Default window: `[now, now + DEFAULT_WINDOW_DAYS)`
    fn default() -> Self {
        Self::upcoming(DEFAULT_WINDOW_DAYS)
    }
}

impl DateRange {
    /// Window starting now and extending `days` into the future.
    pub fn upcoming(days: i64) -> Self {
        let now = Utc::now();
        DateRange {
            from: now,
            to: now + Duration::days(days),
        }
    }

    /// Parse CLI arguments into a DateRange.
    /// - `from`: YYYY-MM-DD (start of day), defaults to now
    /// - `to`: YYYY-MM-DD (end of day), defaults to `from + default_days`
    pub fn from_args(
        from: Option<&str>,
        to: Option<&str>,
        default_days: i64,
    ) -> Result<Self, String> {
        let from_dt = match from {
            Some(s) => parse_date_start(s)?,
            None => Utc::now(),
        };

        let to_dt = match to {
            Some(s) => parse_date_end(s)?,
            None => from_dt + Duration::days(default_days),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t < self.to
    }
}

/// Parse YYYY-MM-DD as start of day in UTC
fn parse_date_start(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Parse YYYY-MM-DD as an exclusive end bound: midnight after the named
/// day, so the whole day falls inside the `[from, to)` window.
fn parse_date_end(s: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok((date + Duration::days(1)).and_hms_opt(0, 0, 0).unwrap().and_utc())
}
