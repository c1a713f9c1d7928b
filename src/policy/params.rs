//! Loosely-typed policy parameters as they arrive at the boundary
//!
//! CLI flags, TOML tables and data-API requests all carry the policy as
//! optional, partly string-typed fields. `PolicyParams` collects them and
//! `validate` is the only way to turn them into a [`StakingPolicy`].

use super::{PolicyError, StakingPolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unvalidated staking parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Unit stake at multiplier 1
    pub base_amount: Option<Decimal>,
    /// Comma-separated multipliers, e.g. "1,2,4"
    pub betting_sequence: Option<String>,
    /// Maximum consecutive bets per cycle
    pub stop_loss_count: Option<u32>,
    /// Gross payout multiple on a hit
    pub odds: Option<Decimal>,
    /// Omission threshold that opens a cycle
    pub start_omission: Option<u32>,
    /// Number of periods to request from the outcome source
    pub test_periods: Option<u32>,
}

impl PolicyParams {
    /// Overlay `other` onto `self`; fields set in `other` win
    pub fn merge(self, other: PolicyParams) -> PolicyParams {
        PolicyParams {
            base_amount: other.base_amount.or(self.base_amount),
            betting_sequence: other.betting_sequence.or(self.betting_sequence),
            stop_loss_count: other.stop_loss_count.or(self.stop_loss_count),
            odds: other.odds.or(self.odds),
            start_omission: other.start_omission.or(self.start_omission),
            test_periods: other.test_periods.or(self.test_periods),
        }
    }

    /// Validate and build the immutable policy
    pub fn validate(&self) -> Result<StakingPolicy, PolicyError> {
        let base_amount = self
            .base_amount
            .ok_or(PolicyError::MissingField("base_amount"))?;
        let raw_sequence = self
            .betting_sequence
            .as_deref()
            .ok_or(PolicyError::MissingField("betting_sequence"))?;
        let betting_sequence = parse_betting_sequence(raw_sequence)?;
        let stop_loss_count = self
            .stop_loss_count
            .ok_or(PolicyError::MissingField("stop_loss_count"))?;
        let odds = self.odds.ok_or(PolicyError::MissingField("odds"))?;
        let start_omission = self
            .start_omission
            .ok_or(PolicyError::MissingField("start_omission"))?;
        let test_periods = self
            .test_periods
            .ok_or(PolicyError::MissingField("test_periods"))?;

        StakingPolicy::new(
            base_amount,
            betting_sequence,
            stop_loss_count,
            odds,
            start_omission,
            test_periods,
        )
    }
}

impl TryFrom<PolicyParams> for StakingPolicy {
    type Error = PolicyError;

    fn try_from(params: PolicyParams) -> Result<Self, Self::Error> {
        params.validate()
    }
}

/// Parse a comma-separated multiplier list
///
/// Whitespace around entries is ignored. Empty entries (e.g. "1,,2" or a
/// trailing comma) are rejected rather than skipped.
pub fn parse_betting_sequence(raw: &str) -> Result<Vec<Decimal>, PolicyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PolicyError::EmptySequence);
    }

    trimmed
        .split(',')
        .map(|part| {
            let part = part.trim();
            Decimal::from_str(part).map_err(|_| PolicyError::Parse {
                field: "betting_sequence",
                value: part.to_string(),
            })
        })
        .collect()
}
