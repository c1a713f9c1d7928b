//! Sweep command implementation

use super::backtest::validated_policy;
use super::{PolicyArgs, SourceArgs};
use crate::backtest::sweep;
use crate::config::Config;
use anyhow::Context;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Start-omission thresholds to compare, e.g. "3,5,8"
    #[arg(long, value_delimiter = ',', required = true)]
    pub start_omissions: Vec<u32>,
}

impl SweepArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let policy = validated_policy(&self.policy, config)?;
        let query = self.source.query(policy.test_periods());
        let source = self.source.source(config)?;

        let outcomes = source
            .fetch(&query)
            .await
            .with_context(|| format!("Failed to fetch outcomes from {} source", source.name()))?;

        tracing::info!(
            periods = outcomes.len(),
            thresholds = self.start_omissions.len(),
            "Running start-omission sweep"
        );

        let points = sweep(Arc::new(outcomes), &policy, &self.start_omissions).await?;

        println!(
            "{:>6} {:>6} {:>5} {:>9} {:>12} {:>12} {:>12}",
            "start", "bets", "hits", "hit rate", "invested", "net profit", "drawdown"
        );
        for point in &points {
            let s = &point.summary;
            println!(
                "{:>6} {:>6} {:>5} {:>8.2}% {:>12.2} {:>+12.2} {:>12.2}",
                point.start_omission,
                s.betting_count,
                s.hit_count,
                s.hit_rate * rust_decimal_macros::dec!(100),
                s.total_invested,
                s.net_profit,
                s.max_drawdown,
            );
        }

        Ok(())
    }
}
