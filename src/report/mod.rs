//! Report module
//!
//! Outbound projections of a finished backtest: CSV, Parquet and JSON
//! files, plus the CLI summary table.

mod csv;
mod parquet;

pub use self::csv::{write_ledger_csv, write_ledger_csv_to, LEDGER_COLUMNS};
pub use self::parquet::{ledger_schema, write_ledger_parquet};

use crate::backtest::BacktestReport;
use crate::config::ReportFormat;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write the full report as pretty JSON
pub fn write_report_json(path: &Path, report: &BacktestReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

/// File name for a report in the given format
pub fn report_file_name(report: &BacktestReport, format: ReportFormat) -> Option<String> {
    let extension = match format {
        ReportFormat::Table => return None,
        ReportFormat::Json => "json",
        ReportFormat::Csv => "csv",
        ReportFormat::Parquet => "parquet",
    };
    let strategy: String = report
        .query
        .strategy
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();

    Some(format!(
        "{}_{}_{}.{}",
        report.query.lottery_type,
        strategy,
        report.generated_at.format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Write `report` into `output_dir` in the requested format
///
/// Returns the written path, or `None` for the table format which only
/// prints.
pub fn write_report(
    report: &BacktestReport,
    format: ReportFormat,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(name) = report_file_name(report, format) else {
        return Ok(None);
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;
    let path = output_dir.join(name);

    match format {
        ReportFormat::Table => {}
        ReportFormat::Json => write_report_json(&path, report)?,
        ReportFormat::Csv => write_ledger_csv(&path, &report.ledger)?,
        ReportFormat::Parquet => write_ledger_parquet(&path, &report.ledger)?,
    }

    tracing::info!(path = %path.display(), run_id = %report.run_id, "Report written");
    Ok(Some(path))
}
