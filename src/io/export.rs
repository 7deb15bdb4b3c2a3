//! CSV export for production plans.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::dispatch::ProductionPlan;

/// Column header for CSV plan export.
const HEADER: &str = "name,p,marginal_cost";

/// Exports a plan to a CSV file at the given path.
///
/// Writes a header row followed by one row per plan entry, in plan order.
/// Undispatchable plants carry `inf` as their marginal cost.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(plan: &ProductionPlan, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(plan, buf)
}

/// Writes a plan as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(plan: &ProductionPlan, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for e in &plan.entries {
        wtr.write_record(&[
            e.name.clone(),
            format!("{:.1}", e.power_mw),
            format!("{:.4}", e.marginal_cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
