//! Shared stub sources for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};

use gridmix::error::FetchError;
use gridmix::mix::{Fuel, FuelMixRecord, GenerationMix, QueryRange};
use gridmix::source::DataSource;

/// Pinned "now" for every router test (Monday 2025-12-01, mid-morning).
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 9, 30, 0).unwrap()
}

/// Half-hourly slots covering `[range.from, range.to]`, shaped by `wind_at`.
///
/// Wind is the only clean fuel; gas fills the rest.
pub fn curve_records(range: QueryRange, wind_at: fn(DateTime<Utc>) -> f64) -> Vec<FuelMixRecord> {
    let step = TimeDelta::minutes(30);
    let mut out = Vec::new();
    let mut from = range.from;
    while from <= range.to {
        let wind = wind_at(from);
        let mix = GenerationMix::new()
            .with(Fuel::Wind, wind)
            .with(Fuel::Gas, 100.0 - wind);
        out.push(FuelMixRecord::new(from, from + step, mix));
        from += step;
    }
    out
}

/// Windy between 01:00 and 03:00 on 2025-12-02, calm otherwise.
pub fn windy_small_hours(at: DateTime<Utc>) -> f64 {
    let windy_day = Utc.with_ymd_and_hms(2025, 12, 2, 0, 0, 0).unwrap().date_naive();
    if at.date_naive() == windy_day && (1..3).contains(&at.hour()) {
        80.0
    } else {
        20.0
    }
}

/// Generates curve records for any range and counts fetches.
pub struct CurveSource {
    wind_at: fn(DateTime<Utc>) -> f64,
    calls: AtomicUsize,
}

impl CurveSource {
    pub fn new(wind_at: fn(DateTime<Utc>) -> f64) -> Self {
        Self {
            wind_at,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for CurveSource {
    async fn fetch_generation(&self, range: QueryRange) -> Result<Vec<FuelMixRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(curve_records(range, self.wind_at))
    }

    fn name(&self) -> &'static str {
        "curve"
    }
}

/// Always fails as an unavailable upstream would.
pub struct FailingSource;

#[async_trait]
impl DataSource for FailingSource {
    async fn fetch_generation(&self, range: QueryRange) -> Result<Vec<FuelMixRecord>, FetchError> {
        Err(FetchError::Status {
            url: format!("stub://generation/{}/{}", range.from, range.to),
            status: 503,
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
