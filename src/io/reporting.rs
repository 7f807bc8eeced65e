// src/io/reporting.rs

use crate::simulation::engine::HistoryRecord;
use std::io::Write;
use std::path::Path;

/// Writes the per-distance scenario rows to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "breakeven_scenario.csv").
/// * `data` - The rows produced by `SimulationOutcome::history`.
pub fn write_scenario_csv<P: AsRef<Path>>(
    file_path: P,
    data: &[HistoryRecord],
) -> Result<(), csv::Error> {
    let path = file_path.as_ref();
    let wtr = csv::Writer::from_path(path)?;
    write_records(wtr, data)?;

    log::info!("exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}

/// Same as [`write_scenario_csv`] but into any writer.
pub fn write_scenario<W: Write>(writer: W, data: &[HistoryRecord]) -> Result<(), csv::Error> {
    write_records(csv::Writer::from_writer(writer), data)
}

fn write_records<W: Write>(mut wtr: csv::Writer<W>, data: &[HistoryRecord]) -> Result<(), csv::Error> {
    for record in data {
        wtr.serialize(record)?;
    }
    // Flush so a short run is not left in the buffer
    wtr.flush()?;
    Ok(())
}
