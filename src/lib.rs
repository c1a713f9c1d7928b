//! lotto-stake: progressive-staking backtests for lottery analysis strategies
//!
//! This library provides the core components for:
//! - Validated staking policies (multiplier sequence, stop-loss, odds)
//! - Deterministic period-by-period replay of hit/miss sequences
//! - Per-period ledger and summary statistics in exact decimal money
//! - Outcome sources backed by export files or the dashboard data API
//! - Ledger export to CSV, Parquet and JSON
//! - Logging and Prometheus metrics

pub mod backtest;
pub mod cli;
pub mod config;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod telemetry;
