//! CSV export for daily energy-mix averages.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::mix::Fuel;
use crate::service::DailyAverage;

/// Column header for the daily averages export.
const HEADER: &str = "date,gas,coal,biomass,nuclear,hydro,imports,other,wind,solar,\
                      clean_energy_percent";

/// Exports daily averages to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_daily_csv(days: &[DailyAverage], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_daily_csv(days, buf)
}

/// Writes daily averages as CSV to any writer.
///
/// One row per day with four decimals; days without data have empty cells.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_daily_csv(days: &[DailyAverage], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for day in days {
        let mut row = Vec::with_capacity(Fuel::ALL.len() + 2);
        row.push(day.date.to_string());
        for fuel in Fuel::ALL {
            row.push(format_cell(day.mix.get(fuel)));
        }
        row.push(format_cell(day.mix.clean_energy_percent));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn format_cell(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        String::new()
    }
}
