//! Backtest engine

use super::{BacktestError, Ledger, ReplayState, Summary};
use crate::outcome::OutcomeRecord;
use crate::policy::{PolicyParams, StakingPolicy};

/// Replays an outcome sequence under a staking policy
///
/// Pure and synchronous: no I/O, no logging, no shared state. Independent
/// engines can run on separate threads without coordination.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    policy: StakingPolicy,
}

impl BacktestEngine {
    /// Create an engine for a validated policy
    pub fn new(policy: StakingPolicy) -> Self {
        Self { policy }
    }

    /// Validate boundary parameters and create an engine
    pub fn from_params(params: &PolicyParams) -> Result<Self, BacktestError> {
        Ok(Self::new(params.validate()?))
    }

    pub fn policy(&self) -> &StakingPolicy {
        &self.policy
    }

    /// Shortest outcome sequence this engine accepts
    pub fn minimum_periods(&self) -> usize {
        self.policy.minimum_periods()
    }

    /// Replay `outcomes` and derive the summary
    pub fn run(&self, outcomes: &[OutcomeRecord]) -> Result<(Ledger, Summary), BacktestError> {
        let ledger = self.replay(outcomes)?;
        let summary = Summary::from_ledger(&ledger);
        Ok((ledger, summary))
    }

    /// Replay `outcomes` into a ledger, oldest period first
    pub fn replay(&self, outcomes: &[OutcomeRecord]) -> Result<Ledger, BacktestError> {
        let required = self.minimum_periods();
        if outcomes.len() < required {
            return Err(BacktestError::InsufficientData {
                required,
                actual: outcomes.len(),
            });
        }

        let mut state = ReplayState::new();
        let mut entries = Vec::with_capacity(outcomes.len());

        for record in outcomes {
            let entry = state.step(&self.policy, record).map_err(|_| {
                BacktestError::ArithmeticOverflow {
                    period_id: record.period_id.clone(),
                }
            })?;
            entries.push(entry);
        }

        Ok(Ledger::from_entries(entries))
    }
}
