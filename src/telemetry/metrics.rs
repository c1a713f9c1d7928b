//! Prometheus metrics

use crate::backtest::Summary;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;

pub const RUNS_TOTAL: &str = "lottostake_backtest_runs_total";
pub const RUN_FAILURES_TOTAL: &str = "lottostake_backtest_failures_total";
pub const PERIODS_REPLAYED_TOTAL: &str = "lottostake_periods_replayed_total";
pub const BETS_PLACED_TOTAL: &str = "lottostake_bets_placed_total";
pub const RUN_LATENCY_MS: &str = "lottostake_backtest_latency_ms";
pub const LAST_NET_PROFIT: &str = "lottostake_last_net_profit";

/// Record a completed backtest
pub fn record_run(strategy: &str, summary: &Summary, duration: Duration) {
    let strategy = strategy.to_string();

    metrics::counter!(RUNS_TOTAL, "strategy" => strategy.clone()).increment(1);
    metrics::counter!(PERIODS_REPLAYED_TOTAL).increment(summary.period_count as u64);
    metrics::counter!(BETS_PLACED_TOTAL).increment(summary.betting_count as u64);
    metrics::histogram!(RUN_LATENCY_MS).record(duration.as_secs_f64() * 1000.0);
    metrics::gauge!(LAST_NET_PROFIT, "strategy" => strategy)
        .set(summary.net_profit.to_f64().unwrap_or_default());

    tracing::debug!(
        metric = RUN_LATENCY_MS,
        value_ms = duration.as_millis(),
        "Recording latency"
    );
}

/// Record a backtest that failed before producing a ledger
pub fn record_failure(strategy: &str, kind: &'static str) {
    metrics::counter!(
        RUN_FAILURES_TOTAL,
        "strategy" => strategy.to_string(),
        "kind" => kind
    )
    .increment(1);
}
