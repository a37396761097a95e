//! API response and query types.
//!
//! Field names follow the public contract (camelCase where the clients expect it).

use serde::Serialize;

use crate::error::HoursError;
use crate::mix::calendar::{format_api_minutes, format_iso_millis};
use crate::mix::{ChargingHours, ChargingWindow, QueryRange};
use crate::service::{DailyAverage, EnergyMixSummary};

/// `GET /energy-mix` response body.
#[derive(Debug, Serialize)]
pub struct EnergyMixResponse {
    /// Requested range.
    pub period: Period,
    /// One entry per UTC day, ascending.
    pub days: Vec<DayAverages>,
}

/// Requested range in ISO millisecond form.
#[derive(Debug, Serialize)]
pub struct Period {
    pub from: String,
    pub to: String,
}

/// One day of the energy-mix response.
///
/// `averages` is a JSON document encoded as a string, not a nested object.
#[derive(Debug, Serialize)]
pub struct DayAverages {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// JSON string of the nine fuel averages plus `cleanEnergyPercent`.
    pub averages: String,
}

impl From<QueryRange> for Period {
    fn from(range: QueryRange) -> Self {
        Self {
            from: format_iso_millis(range.from),
            to: format_iso_millis(range.to),
        }
    }
}

impl TryFrom<&DailyAverage> for DayAverages {
    type Error = serde_json::Error;

    fn try_from(day: &DailyAverage) -> Result<Self, Self::Error> {
        Ok(Self {
            date: day.date.to_string(),
            averages: serde_json::to_string(&day.mix)?,
        })
    }
}

impl TryFrom<&EnergyMixSummary> for EnergyMixResponse {
    type Error = serde_json::Error;

    fn try_from(summary: &EnergyMixSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            period: Period::from(summary.range),
            days: summary
                .days
                .iter()
                .map(DayAverages::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Query parameters for the charging-window endpoint.
///
/// Built from raw key/value pairs so malformed values, including a repeated
/// `hours` key, reach our own validation instead of the extractor's rejection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChargingWindowQuery {
    pub hours: Option<String>,
}

impl ChargingWindowQuery {
    /// Picks `hours` out of decoded query pairs, ignoring unrelated keys.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::Repeated`] when `hours` appears more than once.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, HoursError> {
        let mut values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "hours")
            .map(|(_, value)| value)
            .collect();
        match values.len() {
            0 | 1 => Ok(Self { hours: values.pop() }),
            n => Err(HoursError::Repeated(n)),
        }
    }
}

/// `GET /optimal-charging-window` response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingWindowResponse {
    /// Requested duration, echoed as a string.
    pub hours: String,
    pub optimal_window: OptimalWindow,
}

/// Best window bounds and its rounded clean-energy average.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalWindow {
    pub start_time: String,
    pub end_time: String,
    pub average_clean_energy_percent: f64,
}

impl ChargingWindowResponse {
    pub fn new(hours: ChargingHours, window: &ChargingWindow) -> Self {
        Self {
            hours: hours.to_string(),
            optimal_window: OptimalWindow {
                start_time: format_api_minutes(window.start),
                end_time: format_api_minutes(window.end),
                average_clean_energy_percent: window.rounded_average(),
            },
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
