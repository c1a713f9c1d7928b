//! Backtest command implementation

use super::{PolicyArgs, SourceArgs};
use crate::backtest::run_backtest;
use crate::config::{Config, ReportFormat};
use crate::policy::StakingPolicy;
use crate::report;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BacktestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Output directory for exported results
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
}

impl BacktestArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let policy = validated_policy(&self.policy, config)?;
        let query = self.source.query(policy.test_periods());
        let source = self.source.source(config)?;

        tracing::info!(
            source = source.name(),
            lottery_type = %query.lottery_type,
            strategy = %query.strategy,
            periods = query.test_periods,
            "Running simulation betting backtest"
        );

        let report = run_backtest(source.as_ref(), query, policy).await?;

        let format = self.format.unwrap_or(config.report.format);
        if format == ReportFormat::Json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report.summary.format_table());
        }

        // Ledger formats always export; table and JSON only when asked to
        let export = match (format, &self.output) {
            (ReportFormat::Csv | ReportFormat::Parquet, _) => Some(format),
            (_, Some(_)) => Some(ReportFormat::Json),
            (_, None) => None,
        };
        if let Some(export) = export {
            let output_dir = self.output.as_ref().unwrap_or(&config.report.output_dir);
            if let Some(path) = report::write_report(&report, export, output_dir)? {
                println!("Results written to {}", path.display());
            }
        }

        Ok(())
    }
}

/// Validate policy flags over config, warning about held multipliers
pub(crate) fn validated_policy(args: &PolicyArgs, config: &Config) -> anyhow::Result<StakingPolicy> {
    let policy = args
        .params(config)
        .validate()
        .context("Invalid staking policy")?;

    if policy.holds_last_multiplier() {
        tracing::warn!(
            sequence = %policy.sequence_label(),
            stop_loss = policy.stop_loss_count(),
            "Betting sequence is shorter than the stop-loss depth; the last multiplier repeats"
        );
    }

    Ok(policy)
}
