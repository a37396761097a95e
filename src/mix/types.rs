//! Fuel categories and half-hourly generation-mix records.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One of the nine fuel categories reported by the national generation feed.
///
/// Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    Gas,
    Coal,
    Biomass,
    Nuclear,
    Hydro,
    Imports,
    Other,
    Wind,
    Solar,
}

impl Fuel {
    /// All categories in canonical order.
    pub const ALL: [Fuel; 9] = [
        Fuel::Gas,
        Fuel::Coal,
        Fuel::Biomass,
        Fuel::Nuclear,
        Fuel::Hydro,
        Fuel::Imports,
        Fuel::Other,
        Fuel::Wind,
        Fuel::Solar,
    ];

    /// Categories counted towards the clean-energy share.
    pub const CLEAN: [Fuel; 5] = [
        Fuel::Biomass,
        Fuel::Nuclear,
        Fuel::Hydro,
        Fuel::Wind,
        Fuel::Solar,
    ];

    /// Wire name used by the upstream feed.
    pub fn as_str(self) -> &'static str {
        match self {
            Fuel::Gas => "gas",
            Fuel::Coal => "coal",
            Fuel::Biomass => "biomass",
            Fuel::Nuclear => "nuclear",
            Fuel::Hydro => "hydro",
            Fuel::Imports => "imports",
            Fuel::Other => "other",
            Fuel::Wind => "wind",
            Fuel::Solar => "solar",
        }
    }

    /// Looks up a category by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fuel| fuel.as_str() == name)
    }

    pub fn is_clean(self) -> bool {
        Self::CLEAN.contains(&self)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage share of each fuel for one interval.
///
/// Categories absent from the source read as `0.0`. Shares are trusted to
/// sum to roughly 100; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationMix {
    perc: [f64; 9],
}

impl GenerationMix {
    /// Creates a mix with every category at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, fuel: Fuel) -> f64 {
        self.perc[fuel.index()]
    }

    pub fn set(&mut self, fuel: Fuel, perc: f64) {
        self.perc[fuel.index()] = perc;
    }

    /// Builder-style variant of [`GenerationMix::set`].
    pub fn with(mut self, fuel: Fuel, perc: f64) -> Self {
        self.set(fuel, perc);
        self
    }

    /// Sum of the five clean categories.
    pub fn clean_percent(&self) -> f64 {
        Fuel::CLEAN.iter().map(|&fuel| self.get(fuel)).sum()
    }

    /// Iterates `(fuel, percentage)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Fuel, f64)> + '_ {
        Fuel::ALL.into_iter().map(|fuel| (fuel, self.get(fuel)))
    }
}

impl FromIterator<(Fuel, f64)> for GenerationMix {
    fn from_iter<I: IntoIterator<Item = (Fuel, f64)>>(iter: I) -> Self {
        let mut mix = Self::new();
        for (fuel, perc) in iter {
            mix.set(fuel, perc);
        }
        mix
    }
}

/// A single half-hourly generation-mix record covering `[from, to)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelMixRecord {
    /// Interval start (inclusive).
    pub from: DateTime<Utc>,
    /// Interval end (exclusive).
    pub to: DateTime<Utc>,
    /// Per-fuel percentages for the interval.
    pub mix: GenerationMix,
}

impl FuelMixRecord {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, mix: GenerationMix) -> Self {
        Self { from, to, mix }
    }

    /// UTC calendar date of the interval start.
    pub fn date(&self) -> NaiveDate {
        self.from.date_naive()
    }

    pub fn duration(&self) -> TimeDelta {
        self.to - self.from
    }

    /// Clean-energy share of this interval.
    pub fn clean_percent(&self) -> f64 {
        self.mix.clean_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_names_round_trip() {
        for fuel in Fuel::ALL {
            assert_eq!(Fuel::from_name(fuel.as_str()), Some(fuel));
        }
        assert_eq!(Fuel::from_name("oil"), None);
        assert_eq!(Fuel::from_name("Gas"), None);
    }

    #[test]
    fn clean_set_is_exactly_five_categories() {
        let clean: Vec<Fuel> = Fuel::ALL.into_iter().filter(|f| f.is_clean()).collect();
        assert_eq!(clean, Fuel::CLEAN.to_vec());
        assert!(!Fuel::Gas.is_clean());
        assert!(!Fuel::Imports.is_clean());
    }

    #[test]
    fn missing_categories_default_to_zero() {
        let mix = GenerationMix::new().with(Fuel::Wind, 40.0);
        assert_eq!(mix.get(Fuel::Wind), 40.0);
        assert_eq!(mix.get(Fuel::Gas), 0.0);
    }

    #[test]
    fn clean_percent_ignores_fossil_and_imports() {
        let mix: GenerationMix = [
            (Fuel::Gas, 30.0),
            (Fuel::Coal, 5.0),
            (Fuel::Imports, 10.0),
            (Fuel::Other, 5.0),
            (Fuel::Wind, 25.0),
            (Fuel::Nuclear, 15.0),
            (Fuel::Solar, 10.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(mix.clean_percent(), 50.0);
    }

    #[test]
    fn record_date_uses_interval_start() {
        let from = "2025-12-01T23:30:00Z".parse().unwrap();
        let to = "2025-12-02T00:00:00Z".parse().unwrap();
        let record = FuelMixRecord::new(from, to, GenerationMix::new());
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(record.duration(), TimeDelta::minutes(30));
    }
}
