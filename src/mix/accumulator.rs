//! Per-fuel averaging over a set of generation-mix records.

use std::fmt;

use serde::Serialize;

use super::types::{Fuel, FuelMixRecord};

/// Averaged generation mix for one calendar day (or any record set).
///
/// Created zeroed, populated once by [`EnergyMix::accumulate`], then
/// completed by [`EnergyMix::derive_clean`]. Serializes with camelCase keys
/// in canonical fuel order followed by `cleanEnergyPercent`. Values are never
/// rounded; a `NaN` from an empty record set serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyMix {
    pub gas: f64,
    pub coal: f64,
    pub biomass: f64,
    pub nuclear: f64,
    pub hydro: f64,
    pub imports: f64,
    pub other: f64,
    pub wind: f64,
    pub solar: f64,
    /// Sum of the five clean categories after averaging.
    pub clean_energy_percent: f64,
}

impl EnergyMix {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Averages `records` and derives the clean share in one step.
    pub fn from_records(records: &[FuelMixRecord]) -> Self {
        let mut mix = Self::new();
        mix.accumulate(records);
        mix.derive_clean();
        mix
    }

    pub fn get(&self, fuel: Fuel) -> f64 {
        match fuel {
            Fuel::Gas => self.gas,
            Fuel::Coal => self.coal,
            Fuel::Biomass => self.biomass,
            Fuel::Nuclear => self.nuclear,
            Fuel::Hydro => self.hydro,
            Fuel::Imports => self.imports,
            Fuel::Other => self.other,
            Fuel::Wind => self.wind,
            Fuel::Solar => self.solar,
        }
    }

    pub fn set(&mut self, fuel: Fuel, value: f64) {
        let slot = match fuel {
            Fuel::Gas => &mut self.gas,
            Fuel::Coal => &mut self.coal,
            Fuel::Biomass => &mut self.biomass,
            Fuel::Nuclear => &mut self.nuclear,
            Fuel::Hydro => &mut self.hydro,
            Fuel::Imports => &mut self.imports,
            Fuel::Other => &mut self.other,
            Fuel::Wind => &mut self.wind,
            Fuel::Solar => &mut self.solar,
        };
        *slot = value;
    }

    /// Sets every category to its arithmetic mean across `records`.
    ///
    /// An empty slice is not an error: every category becomes `NaN` (0 / 0),
    /// which downstream JSON encodes as `null`.
    pub fn accumulate(&mut self, records: &[FuelMixRecord]) {
        let count = records.len() as f64;
        for fuel in Fuel::ALL {
            let sum: f64 = records.iter().map(|r| r.mix.get(fuel)).sum();
            self.set(fuel, sum / count);
        }
    }

    /// Sets `clean_energy_percent` from the already-averaged categories.
    pub fn derive_clean(&mut self) {
        self.clean_energy_percent = self.biomass + self.nuclear + self.hydro + self.wind + self.solar;
    }

    /// `false` when the mix was averaged over zero records.
    pub fn has_data(&self) -> bool {
        !self.clean_energy_percent.is_nan()
    }
}

impl fmt::Display for EnergyMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_data() {
            return write!(f, "no data");
        }
        for fuel in Fuel::ALL {
            write!(f, "{fuel} {:.1}% ", self.get(fuel))?;
        }
        write!(f, "| clean {:.1}%", self.clean_energy_percent)
    }
}
