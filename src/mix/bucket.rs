//! Grouping of records into UTC calendar-day buckets.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::accumulator::EnergyMix;
use super::calendar::date_with_offset;
use super::types::FuelMixRecord;

/// Records that started on one UTC calendar date, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub records: Vec<FuelMixRecord>,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    /// Averaged mix of this day's records (`NaN` values when empty).
    pub fn averages(&self) -> EnergyMix {
        EnergyMix::from_records(&self.records)
    }
}

/// Groups `records` into `day_count` consecutive UTC days starting at `start`'s date.
///
/// Every day is present in the output, ascending, even when it received no
/// records. Each record lands in the bucket of its own `from` date; records
/// dated outside the seeded days are dropped.
pub fn bucket_by_day(
    records: impl IntoIterator<Item = FuelMixRecord>,
    start: DateTime<Utc>,
    day_count: usize,
) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = (0..day_count)
        .map(|offset| DayBucket::new(date_with_offset(start, offset as i64).date_naive()))
        .collect();

    let first = start.date_naive();
    for record in records {
        let offset = (record.date() - first).num_days();
        match usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) {
            Some(bucket) => bucket.records.push(record),
            None => debug!(date = %record.date(), "dropping record outside requested days"),
        }
    }

    buckets
}
