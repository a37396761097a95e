//! Sliding-window search for the cleanest charging window.

use std::fmt;

use chrono::{DateTime, Utc};

use super::calendar::format_api_minutes;
use super::types::FuelMixRecord;
use crate::error::{HoursError, WindowError};

/// Records per hour at the feed's half-hour granularity.
pub const RECORDS_PER_HOUR: usize = 2;

/// Shortest charging window accepted, in hours.
pub const MIN_HOURS: u8 = 1;

/// Longest charging window accepted, in hours.
pub const MAX_HOURS: u8 = 6;

/// A validated charging duration in whole hours, within `MIN_HOURS..=MAX_HOURS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChargingHours(u8);

impl ChargingHours {
    /// # Errors
    ///
    /// Returns [`HoursError::OutOfRange`] outside `1..=6`.
    pub fn new(hours: u8) -> Result<Self, HoursError> {
        if (MIN_HOURS..=MAX_HOURS).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(HoursError::OutOfRange(i64::from(hours)))
        }
    }

    /// Parses a raw query value. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Missing, non-integer, and out-of-range values are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, HoursError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(HoursError::Missing)?;
        let value: i64 = raw
            .parse()
            .map_err(|_| HoursError::NotInteger(raw.to_string()))?;
        let hours = u8::try_from(value).map_err(|_| HoursError::OutOfRange(value))?;
        Self::new(hours)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of half-hourly records the window spans.
    pub fn window_len(self) -> usize {
        usize::from(self.0) * RECORDS_PER_HOUR
    }
}

impl fmt::Display for ChargingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The best window found by [`find_optimal_window`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargingWindow {
    /// Start of the first record in the window.
    pub start: DateTime<Utc>,
    /// End of the last record in the window.
    pub end: DateTime<Utc>,
    /// Unrounded mean clean-energy share across the window's records.
    pub average_clean_percent: f64,
}

impl ChargingWindow {
    /// Average rounded to two decimals, half away from zero.
    pub fn rounded_average(&self) -> f64 {
        round_to_hundredths(self.average_clean_percent)
    }
}

impl fmt::Display for ChargingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:.2}% clean)",
            format_api_minutes(self.start),
            format_api_minutes(self.end),
            self.rounded_average()
        )
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Verifies every record starts exactly where the previous one ended.
///
/// # Errors
///
/// Returns [`WindowError::Gap`] at the first discontinuity, including
/// overlapping or out-of-order records.
pub fn check_contiguous(records: &[FuelMixRecord]) -> Result<(), WindowError> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[1].from != pair[0].to {
            return Err(WindowError::Gap {
                index: i + 1,
                expected: pair[0].to,
                found: pair[1].from,
            });
        }
    }
    Ok(())
}

/// Finds the contiguous `hours`-long window with the highest mean clean share.
///
/// `records` must be ordered. Every start position is scanned; windows that
/// straddle a gap (see [`check_contiguous`]) are skipped. A later window
/// replaces the current best only when strictly greater, so ties resolve to
/// the earliest window.
///
/// # Errors
///
/// * [`WindowError::Infeasible`] when fewer records than the window length exist
/// * [`WindowError::Gap`] when every candidate window straddles a gap; the
///   error names the first gap
pub fn find_optimal_window(
    records: &[FuelMixRecord],
    hours: ChargingHours,
) -> Result<ChargingWindow, WindowError> {
    let k = hours.window_len();
    if records.len() < k {
        return Err(WindowError::Infeasible {
            needed: k,
            available: records.len(),
        });
    }

    // breaks_before[j] counts gaps between records[0..=j]
    let mut breaks_before = Vec::with_capacity(records.len());
    let mut breaks = 0usize;
    breaks_before.push(0);
    for pair in records.windows(2) {
        if pair[1].from != pair[0].to {
            breaks += 1;
        }
        breaks_before.push(breaks);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, window) in records.windows(k).enumerate() {
        if breaks_before[i + k - 1] != breaks_before[i] {
            continue;
        }
        let sum: f64 = window.iter().map(FuelMixRecord::clean_percent).sum();
        let avg = sum / k as f64;
        if best.is_none_or(|(_, best_avg)| avg > best_avg) {
            best = Some((i, avg));
        }
    }

    match best {
        Some((i, avg)) => Ok(ChargingWindow {
            start: records[i].from,
            end: records[i + k - 1].to,
            average_clean_percent: avg,
        }),
        None => Err(check_contiguous(records).err().unwrap_or(WindowError::Infeasible {
            needed: k,
            available: records.len(),
        })),
    }
}
