//! The two summaries the service computes, independent of transport.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::error::{ChargingError, FetchError, WindowError};
use crate::mix::calendar::{ENERGY_MIX_DAYS, format_iso_millis};
use crate::mix::window::check_contiguous;
use crate::mix::{
    ChargingHours, ChargingWindow, EnergyMix, QueryRange, bucket_by_day, find_optimal_window,
};
use crate::source::DataSource;

/// Averaged mix for one UTC calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAverage {
    pub date: NaiveDate,
    /// Number of records the day was averaged over.
    pub record_count: usize,
    pub mix: EnergyMix,
}

/// Per-day averages over the energy-mix range.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMixSummary {
    pub range: QueryRange,
    pub days: Vec<DailyAverage>,
}

/// Fetches today through today+2 days and averages each UTC day.
///
/// Always yields [`ENERGY_MIX_DAYS`] entries; days without records carry `NaN`
/// averages.
///
/// # Errors
///
/// Propagates the data source's [`FetchError`].
pub async fn energy_mix_summary(
    source: &dyn DataSource,
    now: DateTime<Utc>,
) -> Result<EnergyMixSummary, FetchError> {
    let range = QueryRange::energy_mix(now);
    let records = source.fetch_generation(range).await?;
    debug!(source = source.name(), records = records.len(), "bucketing energy mix");

    let days = bucket_by_day(records, range.from, ENERGY_MIX_DAYS)
        .into_iter()
        .map(|bucket| DailyAverage {
            date: bucket.date,
            record_count: bucket.records.len(),
            mix: bucket.averages(),
        })
        .collect();

    Ok(EnergyMixSummary { range, days })
}

/// Fetches tomorrow through tomorrow+2 days and finds the cleanest window.
///
/// # Errors
///
/// Returns [`ChargingError::Fetch`] when the fetch fails and
/// [`ChargingError::Window`] when no gap-free window fits. Gaps in the feed
/// are logged and the windows straddling them skipped.
pub async fn optimal_charging_window(
    source: &dyn DataSource,
    now: DateTime<Utc>,
    hours: ChargingHours,
) -> Result<ChargingWindow, ChargingError> {
    let range = QueryRange::charging_lookahead(now);
    let records = source.fetch_generation(range).await?;
    debug!(source = source.name(), records = records.len(), %hours, "scanning charging windows");
    if let Err(WindowError::Gap { index, expected, found }) = check_contiguous(&records) {
        warn!(
            source = source.name(),
            index,
            %expected,
            %found,
            "generation feed has a gap, skipping windows across it"
        );
    }
    Ok(find_optimal_window(&records, hours)?)
}

impl fmt::Display for EnergyMixSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Energy mix {} .. {} ---",
            format_iso_millis(self.range.from),
            format_iso_millis(self.range.to)
        )?;
        for (i, day) in self.days.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} ({:>2} records): {}", day.date, day.record_count, day.mix)?;
        }
        Ok(())
    }
}
