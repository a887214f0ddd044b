use crate::error::{CliError, Result};
use meshprep::core::io::atomic::write_atomically;
use meshprep::engine::batch::{BatchReport, MoleculeOutcome};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    molecule: &'a str,
    status: &'static str,
    detail: String,
}

fn rows<'a, T>(
    report: &'a BatchReport<T>,
    describe: &impl Fn(&T) -> String,
) -> impl Iterator<Item = BatchRow<'a>> {
    report.results.iter().map(move |result| {
        let (status, detail) = match &result.outcome {
            MoleculeOutcome::Completed(value) => ("completed", describe(value)),
            MoleculeOutcome::Failed(err) => ("failed", err.to_string()),
            MoleculeOutcome::Skipped => ("skipped", String::new()),
        };
        BatchRow {
            molecule: &result.molecule,
            status,
            detail,
        }
    })
}

/// Writes one `molecule,status,detail` row per molecule, in batch order.
pub fn write_batch_report<T>(
    path: &Path,
    report: &BatchReport<T>,
    describe: impl Fn(&T) -> String,
) -> Result<()> {
    write_atomically(path, |writer| {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows(report, &describe) {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()
    })
    .map_err(CliError::Io)?;
    info!("Wrote batch report to '{}'.", path.display());
    Ok(())
}

/// Prints the one-line batch summary and lists failed molecules.
pub fn print_summary<T>(label: &str, report: &BatchReport<T>) {
    println!(
        "{}: {} molecule(s), {} completed, {} failed, {} skipped.",
        label,
        report.len(),
        report.completed(),
        report.failed(),
        report.skipped()
    );
    for (molecule, err) in report.failures() {
        println!("  {}: {}", molecule, err);
    }
}
