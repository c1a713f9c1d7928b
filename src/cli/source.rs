//! Arguments shared by commands that fetch outcomes or take a policy

use crate::config::{Config, SourceKind};
use crate::outcome::{FileOutcomeSource, HttpOutcomeSource, OutcomeQuery, OutcomeSource};
use crate::policy::PolicyParams;
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Where to read outcomes from and what to ask for
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Outcome export file (CSV or JSON); overrides the configured source
    #[arg(long)]
    pub outcomes: Option<PathBuf>,

    /// Data API base URL; overrides the configured source
    #[arg(long, conflicts_with = "outcomes")]
    pub api_url: Option<String>,

    /// Lottery type
    #[arg(long, default_value = "pl3")]
    pub lottery: String,

    /// Analysis strategy identifier
    #[arg(long, default_value = "omission")]
    pub strategy: String,

    /// Strategy selector as key=value (repeatable)
    #[arg(long = "selector", value_parser = parse_selector)]
    pub selectors: Vec<(String, String)>,
}

impl SourceArgs {
    /// Build the outcome query for `test_periods` periods
    pub fn query(&self, test_periods: u32) -> OutcomeQuery {
        self.selectors.iter().fold(
            OutcomeQuery::new(&self.lottery, &self.strategy, test_periods),
            |query, (k, v)| query.with_selector(k, v),
        )
    }

    /// Resolve the outcome source from flags, falling back to config
    pub fn source(&self, config: &Config) -> anyhow::Result<Box<dyn OutcomeSource>> {
        if let Some(path) = &self.outcomes {
            return Ok(Box::new(FileOutcomeSource::new(path)));
        }
        if let Some(url) = &self.api_url {
            let mut http = config.source.http();
            http.base_url = url.clone();
            return Ok(Box::new(HttpOutcomeSource::new(http)?));
        }

        match config.source.kind {
            SourceKind::File => {
                let path = config
                    .source
                    .path
                    .clone()
                    .context("No outcome file given (use --outcomes or [source].path)")?;
                Ok(Box::new(FileOutcomeSource::new(path)))
            }
            SourceKind::Http => Ok(Box::new(HttpOutcomeSource::new(config.source.http())?)),
        }
    }
}

/// Staking policy flags; unset flags fall back to config
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Unit stake at multiplier 1
    #[arg(long)]
    pub base_amount: Option<Decimal>,

    /// Comma-separated multiplier sequence, e.g. "1,2,4"
    #[arg(long)]
    pub sequence: Option<String>,

    /// Maximum bets per cycle before the loss is accepted
    #[arg(long)]
    pub stop_loss: Option<u32>,

    /// Gross payout multiple on a hit
    #[arg(long)]
    pub odds: Option<Decimal>,

    /// Consecutive misses required before betting starts
    #[arg(long)]
    pub start_omission: Option<u32>,

    /// Number of recent periods to replay
    #[arg(long)]
    pub periods: Option<u32>,
}

impl PolicyArgs {
    /// Flags layered over the configured policy
    pub fn params(&self, config: &Config) -> PolicyParams {
        config.effective_policy().merge(PolicyParams {
            base_amount: self.base_amount,
            betting_sequence: self.sequence.clone(),
            stop_loss_count: self.stop_loss,
            odds: self.odds,
            start_omission: self.start_omission,
            test_periods: self.periods,
        })
    }
}

fn parse_selector(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("selector key is empty".to_string());
    }
    Ok((key.to_string(), value.trim().to_string()))
}
