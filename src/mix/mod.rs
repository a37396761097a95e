//! Generation-mix analytics: calendar ranges, averaging, bucketing, and window search.

pub mod accumulator;
/// UTC day arithmetic and endpoint query ranges.
pub mod calendar;
/// Calendar-day grouping of records.
pub mod bucket;
pub mod types;
pub mod window;

pub use accumulator::EnergyMix;
pub use bucket::{DayBucket, bucket_by_day};
pub use calendar::QueryRange;
pub use types::{Fuel, FuelMixRecord, GenerationMix};
pub use window::{ChargingHours, ChargingWindow, find_optimal_window};
