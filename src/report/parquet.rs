//! Parquet projection of a ledger

use super::csv::LEDGER_COLUMNS;
use crate::backtest::{Ledger, LedgerEntry};
use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Ledger schema; money columns are strings to keep decimal precision
pub fn ledger_schema() -> Schema {
    let [
        period_id,
        omission,
        is_betting,
        cycle_index,
        multiplier,
        bet_amount,
        is_hit,
        period_return,
        cumulative_invested,
        cumulative_return,
        cumulative_profit,
        cycle_close,
    ] = LEDGER_COLUMNS;

    Schema::new(vec![
        Field::new(period_id, DataType::Utf8, false),
        Field::new(omission, DataType::UInt32, false),
        Field::new(is_betting, DataType::Boolean, false),
        Field::new(cycle_index, DataType::UInt32, true),
        Field::new(multiplier, DataType::Utf8, false),
        Field::new(bet_amount, DataType::Utf8, false),
        Field::new(is_hit, DataType::Boolean, false),
        Field::new(period_return, DataType::Utf8, false),
        Field::new(cumulative_invested, DataType::Utf8, false),
        Field::new(cumulative_return, DataType::Utf8, false),
        Field::new(cumulative_profit, DataType::Utf8, false),
        Field::new(cycle_close, DataType::Utf8, true),
    ])
}

/// Write a ledger to a Parquet file
pub fn write_ledger_parquet(path: &Path, ledger: &Ledger) -> Result<()> {
    let schema = Arc::new(ledger_schema());
    let file = File::create(path)
        .with_context(|| format!("Failed to create Parquet file: {}", path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let entries = ledger.entries();
    let money = |f: fn(&LedgerEntry) -> Decimal| -> ArrayRef {
        Arc::new(StringArray::from(
            entries.iter().map(|e| f(e).to_string()).collect::<Vec<_>>(),
        ))
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            entries.iter().map(|e| e.period_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            entries.iter().map(|e| e.omission).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            entries.iter().map(|e| e.is_betting).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            entries.iter().map(|e| e.cycle_index).collect::<Vec<_>>(),
        )),
        money(|e| e.multiplier),
        money(|e| e.bet_amount),
        Arc::new(BooleanArray::from(
            entries.iter().map(|e| e.is_hit).collect::<Vec<_>>(),
        )),
        money(|e| e.period_return),
        money(|e| e.cumulative_invested),
        money(|e| e.cumulative_return),
        money(|e| e.cumulative_profit),
        Arc::new(StringArray::from(
            entries
                .iter()
                .map(|e| e.cycle_close.map(|c| c.as_str()))
                .collect::<Vec<_>>(),
        )),
    ];

    let batch = RecordBatch::try_new(schema, columns)?;

    writer.write(&batch)?;
    writer.close()?;

    tracing::debug!(path = %path.display(), rows = ledger.len(), "Wrote ledger Parquet");

    Ok(())
}
