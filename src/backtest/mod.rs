//! Backtesting module
//!
//! Replays a strategy's historical hit/miss sequence under a progressive
//! staking policy and reports the resulting cash flow.

mod analytics;
mod ledger;
mod replay;
mod simulator;
mod types;

pub use analytics::Summary;
pub use ledger::{Ledger, LedgerEntry};
pub use simulator::BacktestEngine;
pub use types::{BacktestError, CycleClose};

pub(crate) use replay::ReplayState;

use crate::outcome::{OutcomeQuery, OutcomeRecord, OutcomeSource};
use crate::policy::StakingPolicy;
use crate::telemetry;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Complete backtest results
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// What was replayed
    pub query: OutcomeQuery,
    /// How it was staked
    pub policy: StakingPolicy,
    /// Summary statistics
    pub summary: Summary,
    /// Per-period ledger
    pub ledger: Ledger,
}

impl BacktestReport {
    /// Wrap an engine result
    pub fn new(query: OutcomeQuery, policy: StakingPolicy, ledger: Ledger, summary: Summary) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            query,
            policy,
            summary,
            ledger,
        }
    }
}

/// Fetch outcomes for `query` and replay them under `policy`
pub async fn run_backtest(
    source: &dyn OutcomeSource,
    query: OutcomeQuery,
    policy: StakingPolicy,
) -> anyhow::Result<BacktestReport> {
    let outcomes = source
        .fetch(&query)
        .await
        .with_context(|| format!("Failed to fetch outcomes from {} source", source.name()))?;

    let engine = BacktestEngine::new(policy);
    let started = Instant::now();

    let (ledger, summary) = match engine.run(&outcomes) {
        Ok(result) => result,
        Err(e) => {
            telemetry::record_failure(&query.strategy, failure_kind(&e));
            tracing::warn!(strategy = %query.strategy, error = %e, "Backtest rejected");
            return Err(e.into());
        }
    };

    telemetry::record_run(&query.strategy, &summary, started.elapsed());
    tracing::info!(
        strategy = %query.strategy,
        lottery_type = %query.lottery_type,
        periods = summary.period_count,
        bets = summary.betting_count,
        hits = summary.hit_count,
        net_profit = %summary.net_profit,
        "Backtest complete"
    );

    Ok(BacktestReport::new(
        query,
        engine.policy().clone(),
        ledger,
        summary,
    ))
}

/// One point of a start-omission sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub start_omission: u32,
    pub summary: Summary,
}

/// Replay one outcome sequence under several start-omission thresholds
///
/// Every threshold runs its own engine on the blocking pool; results come
/// back in the order the thresholds were given. The first failing
/// threshold fails the sweep.
pub async fn sweep(
    outcomes: Arc<Vec<OutcomeRecord>>,
    policy: &StakingPolicy,
    start_omissions: &[u32],
) -> anyhow::Result<Vec<SweepPoint>> {
    let mut handles = Vec::with_capacity(start_omissions.len());
    for &start_omission in start_omissions {
        let engine = BacktestEngine::new(policy.with_start_omission(start_omission)?);
        let outcomes = Arc::clone(&outcomes);
        handles.push(tokio::task::spawn_blocking(move || {
            engine.run(&outcomes).map(|(_, summary)| SweepPoint {
                start_omission,
                summary,
            })
        }));
    }

    let results = futures_util::future::join_all(handles).await;

    let mut points = Vec::with_capacity(results.len());
    for (result, start_omission) in results.into_iter().zip(start_omissions) {
        let point = result
            .context("Sweep task panicked")?
            .with_context(|| format!("Sweep failed at start_omission={}", start_omission))?;
        points.push(point);
    }

    tracing::info!(points = points.len(), "Sweep complete");
    Ok(points)
}

fn failure_kind(error: &BacktestError) -> &'static str {
    match error {
        BacktestError::Configuration(_) => "configuration",
        BacktestError::InsufficientData { .. } => "insufficient_data",
        BacktestError::ArithmeticOverflow { .. } => "overflow",
    }
}
