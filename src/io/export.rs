//! CSV and JSON export for committed tick records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::kpi::RunKpis;
use crate::sim::types::TickRecord;

/// Column header for CSV telemetry export.
const HEADER: &str = "tick,time_of_day,solar_mw,wind_mw,demand_mw,\
                      storage_charge_mwh,storage_flow_mwh,\
                      classical_cost,classical_curtailment_mwh,classical_efficiency_pct,\
                      classical_emissions_t,classical_compute_ms,\
                      quantum_cost,quantum_curtailment_mwh,quantum_efficiency_pct,\
                      quantum_emissions_t,quantum_compute_ms";

/// Exports tick records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per tick. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[TickRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes tick records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[TickRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        let (c, q) = (&r.classical, &r.quantum);
        wtr.write_record(&[
            r.tick.to_string(),
            format!("{:.2}", r.time_of_day),
            format!("{:.4}", r.solar_mw),
            format!("{:.4}", r.wind_mw),
            format!("{:.4}", r.demand_mw),
            format!("{:.4}", r.storage_charge_mwh),
            format!("{:.4}", r.storage_flow_mwh),
            format!("{:.2}", c.total_cost),
            format!("{:.4}", c.curtailment_mwh),
            format!("{:.4}", c.efficiency_pct),
            format!("{:.4}", c.emissions_t),
            format!("{:.2}", c.compute_time_ms),
            format!("{:.2}", q.total_cost),
            format!("{:.4}", q.curtailment_mwh),
            format!("{:.4}", q.efficiency_pct),
            format!("{:.4}", q.emissions_t),
            format!("{:.2}", q.compute_time_ms),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Run summary plus per-tick records, as written by [`write_json`].
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub kpis: &'a RunKpis,
    pub records: &'a [TickRecord],
}

/// Exports the KPIs and tick records to a pretty-printed JSON file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization or writing fails.
pub fn export_json(kpis: &RunKpis, records: &[TickRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_json(kpis, records, io::BufWriter::new(file))
}

/// Writes the KPIs and tick records as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(kpis: &RunKpis, records: &[TickRecord], mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &RunReport { kpis, records })?;
    writer.write_all(b"\n")?;
    writer.flush()
}
