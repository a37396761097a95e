//! UTC calendar-day arithmetic and the query ranges the endpoints request.

use chrono::{DateTime, NaiveDateTime, NaiveTime, SecondsFormat, TimeDelta, Utc};

/// Number of calendar days summarized by the energy-mix endpoint.
pub const ENERGY_MIX_DAYS: usize = 3;

/// Span of the charging lookahead, in days after its start.
pub const LOOKAHEAD_DAYS: i64 = 2;

/// Upstream record timestamp format, e.g. `2025-12-01T00:30Z`.
const API_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Returns `base` shifted by `day_offset` whole calendar days.
///
/// The wall-clock time of `base` is preserved; nothing is normalized to
/// midnight. Call [`utc_midnight`] first when day-aligned bounds are needed.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gridmix::mix::calendar::date_with_offset;
///
/// let base = Utc.with_ymd_and_hms(2025, 12, 30, 6, 15, 0).unwrap();
/// let shifted = date_with_offset(base, 5);
/// assert_eq!(shifted, Utc.with_ymd_and_hms(2026, 1, 4, 6, 15, 0).unwrap());
/// ```
pub fn date_with_offset(base: DateTime<Utc>, day_offset: i64) -> DateTime<Utc> {
    // UTC has no DST, so a calendar day is always 24 hours.
    base + TimeDelta::days(day_offset)
}

/// Truncates an instant to 00:00:00.000 UTC of the same date.
pub fn utc_midnight(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats an instant the way the upstream feed writes record bounds.
pub fn format_api_minutes(instant: DateTime<Utc>) -> String {
    instant.format(API_MINUTES_FORMAT).to_string()
}

/// Parses a record timestamp in either RFC 3339 or the upstream `HH:MMZ` form.
///
/// # Errors
///
/// Returns the `chrono` parse error of the upstream form when neither matches.
pub fn parse_api_instant(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, API_MINUTES_FORMAT).map(|naive| naive.and_utc())
}

/// A `from`/`to` instant pair passed to a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl QueryRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Today 00:00 UTC through today+2 days 00:00 UTC.
    pub fn energy_mix(now: DateTime<Utc>) -> Self {
        let today = utc_midnight(now);
        Self::new(today, date_with_offset(today, ENERGY_MIX_DAYS as i64 - 1))
    }

    /// Tomorrow 00:00 UTC through tomorrow+2 days 00:00 UTC.
    pub fn charging_lookahead(now: DateTime<Utc>) -> Self {
        let tomorrow = date_with_offset(utc_midnight(now), 1);
        Self::new(tomorrow, date_with_offset(tomorrow, LOOKAHEAD_DAYS))
    }
}
