//! Staking policy module
//!
//! Validated, immutable description of how a backtest stakes money:
//! when a cycle opens, how stakes escalate, and when a cycle is abandoned.

mod params;
mod types;

pub use params::{parse_betting_sequence, PolicyParams};
pub use types::PolicyError;

use rust_decimal::Decimal;
use serde::Serialize;

/// Validated staking configuration for one backtest run
///
/// Only constructible through [`StakingPolicy::new`] or
/// [`PolicyParams::validate`], so every instance satisfies:
/// - `base_amount > 0`
/// - `betting_sequence` non-empty, every multiplier `> 0`
/// - `stop_loss_count >= 1`, `start_omission >= 1`, `test_periods >= 1`
/// - `odds >= 1`
/// - `test_periods >= start_omission + 1`, see [`minimum_periods`]
///
/// When a cycle lasts longer than `betting_sequence`, the last multiplier
/// is held for the remaining bets. Check [`holds_last_multiplier`] to
/// detect policies where that happens.
///
/// [`holds_last_multiplier`]: StakingPolicy::holds_last_multiplier
/// [`minimum_periods`]: StakingPolicy::minimum_periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakingPolicy {
    base_amount: Decimal,
    betting_sequence: Vec<Decimal>,
    stop_loss_count: u32,
    odds: Decimal,
    start_omission: u32,
    test_periods: u32,
}

impl StakingPolicy {
    /// Validate raw values and build a policy
    pub fn new(
        base_amount: Decimal,
        betting_sequence: Vec<Decimal>,
        stop_loss_count: u32,
        odds: Decimal,
        start_omission: u32,
        test_periods: u32,
    ) -> Result<Self, PolicyError> {
        if base_amount <= Decimal::ZERO {
            return Err(PolicyError::NonPositiveBaseAmount(base_amount));
        }
        if betting_sequence.is_empty() {
            return Err(PolicyError::EmptySequence);
        }
        if let Some((index, value)) = betting_sequence
            .iter()
            .enumerate()
            .find(|(_, m)| **m <= Decimal::ZERO)
        {
            return Err(PolicyError::InvalidMultiplier {
                index,
                value: *value,
            });
        }
        if stop_loss_count == 0 {
            return Err(PolicyError::ZeroStopLoss);
        }
        if odds < Decimal::ONE {
            return Err(PolicyError::OddsBelowOne(odds));
        }
        if start_omission == 0 {
            return Err(PolicyError::ZeroStartOmission);
        }
        if test_periods == 0 {
            return Err(PolicyError::ZeroTestPeriods);
        }
        let required = start_omission.saturating_add(1);
        if test_periods < required {
            return Err(PolicyError::TestPeriodsBelowMinimum {
                start_omission,
                required,
                actual: test_periods,
            });
        }

        Ok(Self {
            base_amount,
            betting_sequence,
            stop_loss_count,
            odds,
            start_omission,
            test_periods,
        })
    }

    pub fn base_amount(&self) -> Decimal {
        self.base_amount
    }

    pub fn betting_sequence(&self) -> &[Decimal] {
        &self.betting_sequence
    }

    pub fn stop_loss_count(&self) -> u32 {
        self.stop_loss_count
    }

    pub fn odds(&self) -> Decimal {
        self.odds
    }

    pub fn start_omission(&self) -> u32 {
        self.start_omission
    }

    pub fn test_periods(&self) -> u32 {
        self.test_periods
    }

    /// Shortest sequence holding one full omission window plus a period
    /// on which a bet could be placed
    pub fn minimum_periods(&self) -> usize {
        self.start_omission as usize + 1
    }

    /// Multiplier for the bet at `cycle_position` (0-based)
    ///
    /// Positions past the end of the sequence reuse the last multiplier.
    pub fn multiplier_at(&self, cycle_position: u32) -> Decimal {
        let last = self.betting_sequence.len() - 1;
        let index = (cycle_position as usize).min(last);
        self.betting_sequence[index]
    }

    /// True when a full-length cycle would repeat the last multiplier
    pub fn holds_last_multiplier(&self) -> bool {
        self.stop_loss_count as usize > self.betting_sequence.len()
    }

    /// Total staked by a cycle that loses every bet up to the stop-loss
    ///
    /// Returns `None` if the sum does not fit in a `Decimal`.
    pub fn max_cycle_exposure(&self) -> Option<Decimal> {
        (0..self.stop_loss_count).try_fold(Decimal::ZERO, |acc, position| {
            let stake = self.base_amount.checked_mul(self.multiplier_at(position))?;
            acc.checked_add(stake)
        })
    }

    /// Copy of this policy with a different activation threshold
    pub fn with_start_omission(&self, start_omission: u32) -> Result<Self, PolicyError> {
        Self::new(
            self.base_amount,
            self.betting_sequence.clone(),
            self.stop_loss_count,
            self.odds,
            start_omission,
            self.test_periods,
        )
    }

    /// Render the multiplier list the way it is accepted on input
    pub fn sequence_label(&self) -> String {
        self.betting_sequence
            .iter()
            .map(|m| m.normalize().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
