//! CSV projection of a ledger
//!
//! One row per period, columns in ledger field order. Values are written
//! exactly as stored; nothing is recomputed here.

use crate::backtest::{Ledger, LedgerEntry};
use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column header shared by all ledger exports
pub const LEDGER_COLUMNS: [&str; 12] = [
    "period_id",
    "omission",
    "is_betting",
    "cycle_index",
    "multiplier",
    "bet_amount",
    "is_hit",
    "period_return",
    "cumulative_invested",
    "cumulative_return",
    "cumulative_profit",
    "cycle_close",
];

/// Write a ledger to any writer as CSV
pub fn write_ledger_csv_to<W: Write>(writer: W, ledger: &Ledger) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(LEDGER_COLUMNS)?;

    for entry in ledger {
        writer.write_record(&row(entry))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a ledger to a CSV file
pub fn write_ledger_csv(path: &Path, ledger: &Ledger) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_ledger_csv_to(file, ledger)?;

    tracing::debug!(path = %path.display(), rows = ledger.len(), "Wrote ledger CSV");
    Ok(())
}

fn row(entry: &LedgerEntry) -> [String; 12] {
    [
        entry.period_id.clone(),
        entry.omission.to_string(),
        entry.is_betting.to_string(),
        entry.cycle_index.map(|i| i.to_string()).unwrap_or_default(),
        entry.multiplier.to_string(),
        entry.bet_amount.to_string(),
        entry.is_hit.to_string(),
        entry.period_return.to_string(),
        entry.cumulative_invested.to_string(),
        entry.cumulative_return.to_string(),
        entry.cumulative_profit.to_string(),
        entry
            .cycle_close
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
    ]
}
