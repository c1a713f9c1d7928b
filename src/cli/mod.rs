//! CLI interface for lotto-stake
//!
//! Provides subcommands for:
//! - `backtest`: Replay an outcome sequence under a staking policy
//! - `sweep`: Compare several start-omission thresholds on one sequence
//! - `validate`: Check staking parameters without running anything
//! - `config`: Show effective configuration

mod backtest;
mod source;
mod sweep;
mod validate;

pub use backtest::BacktestArgs;
pub use source::{PolicyArgs, SourceArgs};
pub use sweep::SweepArgs;
pub use validate::ValidateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lotto-stake")]
#[command(about = "Progressive-staking backtests over lottery analysis hit/miss sequences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "lotto-stake.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation-betting backtest
    Backtest(BacktestArgs),
    /// Run one sequence against several start-omission thresholds
    Sweep(SweepArgs),
    /// Validate staking parameters
    Validate(ValidateArgs),
    /// Show effective configuration
    Config,
}
