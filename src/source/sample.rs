//! Deterministic synthetic generation mix for offline runs.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Timelike, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::DataSource;
use crate::error::FetchError;
use crate::mix::{Fuel, FuelMixRecord, GenerationMix, QueryRange};

/// Length of one synthetic interval.
const INTERVAL_MINUTES: i64 = 30;

/// A seeded stand-in for the national generation feed.
///
/// Emits one half-hourly record for every slot starting in `[from, to]`,
/// mirroring the upstream feed which includes the period starting at `to`.
/// Solar follows a half-sine between 06:00 and 18:00 UTC; wind drifts as an
/// AR(1) process; nuclear, biomass, hydro, imports and other sit near fixed
/// levels; gas and coal fill the remainder so each record sums to 100.
///
/// The same seed and range always produce the same records.
#[derive(Debug, Clone, Copy)]
pub struct SampleSource {
    seed: u64,
}

impl SampleSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generates the records for `range` without going through the trait.
    pub fn generate(&self, range: QueryRange) -> Vec<FuelMixRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ range.from.timestamp() as u64);
        let step = TimeDelta::minutes(INTERVAL_MINUTES);
        let mut wind = 28.0 + gaussian_noise(&mut rng, 6.0);
        let mut records = Vec::new();

        let mut from = range.from;
        while from <= range.to {
            wind = (0.92 * wind + 0.08 * 28.0 + gaussian_noise(&mut rng, 2.5)).clamp(2.0, 60.0);
            let mix = sample_mix(&mut rng, from, wind);
            records.push(FuelMixRecord::new(from, from + step, mix));
            from += step;
        }
        records
    }
}

#[async_trait]
impl DataSource for SampleSource {
    async fn fetch_generation(&self, range: QueryRange) -> Result<Vec<FuelMixRecord>, FetchError> {
        Ok(self.generate(range))
    }

    fn name(&self) -> &'static str {
        "sample"
    }
}

fn sample_mix(rng: &mut StdRng, at: DateTime<Utc>, wind: f64) -> GenerationMix {
    let hour = f64::from(at.hour()) + f64::from(at.minute()) / 60.0;
    let solar = (solar_fraction(hour) * (11.0 + gaussian_noise(rng, 2.0))).max(0.0);

    let mut mix = GenerationMix::new()
        .with(Fuel::Wind, wind)
        .with(Fuel::Solar, solar)
        .with(Fuel::Nuclear, 14.5 + gaussian_noise(rng, 0.5))
        .with(Fuel::Biomass, 6.0 + gaussian_noise(rng, 0.8))
        .with(Fuel::Hydro, 1.8 + gaussian_noise(rng, 0.3))
        .with(Fuel::Imports, 11.0 + gaussian_noise(rng, 2.0))
        .with(Fuel::Other, 0.6 + gaussian_noise(rng, 0.1));
    for fuel in Fuel::ALL {
        mix.set(fuel, mix.get(fuel).max(0.0));
    }

    let allocated: f64 = mix.iter().map(|(_, perc)| perc).sum();
    if allocated > 100.0 {
        let scale = 100.0 / allocated;
        for fuel in Fuel::ALL {
            mix.set(fuel, mix.get(fuel) * scale);
        }
    } else {
        let remainder = 100.0 - allocated;
        mix.set(Fuel::Gas, remainder * 0.97);
        mix.set(Fuel::Coal, remainder * 0.03);
    }

    // The live feed publishes one decimal place.
    for fuel in Fuel::ALL {
        mix.set(fuel, (mix.get(fuel) * 10.0).round() / 10.0);
    }
    mix
}

/// Half-sine daylight profile between 06:00 and 18:00, zero at night.
fn solar_fraction(hour: f64) -> f64 {
    if !(6.0..18.0).contains(&hour) {
        return 0.0;
    }
    (std::f64::consts::PI * (hour - 6.0) / 12.0).sin()
}

/// Gaussian noise via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-9, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::mix::window::check_contiguous;

    fn range() -> QueryRange {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap();
        QueryRange::energy_mix(now)
    }

    #[test]
    fn covers_range_inclusive_of_end_slot() {
        let records = SampleSource::new(42).generate(range());
        // two full days plus the slot starting at `to`
        assert_eq!(records.len(), 97);
        assert_eq!(records[0].from, range().from);
        assert_eq!(records[96].from, range().to);
    }

    #[test]
    fn records_are_contiguous_half_hours() {
        let records = SampleSource::new(7).generate(range());
        assert!(check_contiguous(&records).is_ok());
        assert!(
            records
                .iter()
                .all(|r| r.duration() == TimeDelta::minutes(30))
        );
    }

    #[test]
    fn shares_are_non_negative_and_sum_to_about_100() {
        for r in SampleSource::new(3).generate(range()) {
            let total: f64 = r.mix.iter().map(|(_, p)| p).sum();
            assert!((total - 100.0).abs() < 1.0, "total {total}");
            assert!(r.mix.iter().all(|(_, p)| p >= 0.0));
        }
    }

    #[test]
    fn no_solar_at_night() {
        let records = SampleSource::new(11).generate(range());
        for r in records.iter().filter(|r| r.from.hour() < 6 || r.from.hour() >= 18) {
            assert_eq!(r.mix.get(Fuel::Solar), 0.0);
        }
    }

    #[test]
    fn deterministic_for_seed_and_range() {
        let a = SampleSource::new(42).generate(range());
        let b = SampleSource::new(42).generate(range());
        let c = SampleSource::new(43).generate(range());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
