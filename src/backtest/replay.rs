//! Replay state machine
//!
//! Carries the counters that survive from one period to the next and
//! turns a single outcome into a ledger entry.

use super::{CycleClose, LedgerEntry};
use crate::outcome::OutcomeRecord;
use crate::policy::StakingPolicy;
use rust_decimal::Decimal;

/// Marker for an out-of-range counter or amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overflow;

/// State carried across periods during one replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReplayState {
    /// Consecutive misses since the last hit, independent of betting
    omission: u32,
    /// Whether a betting cycle is open
    in_cycle: bool,
    /// Bets already placed in the open cycle
    cycle_position: u32,
    invested: Decimal,
    returned: Decimal,
}

impl ReplayState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn omission(&self) -> u32 {
        self.omission
    }

    #[cfg(test)]
    pub(crate) fn in_cycle(&self) -> bool {
        self.in_cycle
    }

    #[cfg(test)]
    pub(crate) fn cycle_position(&self) -> u32 {
        self.cycle_position
    }

    /// Apply one period and return its ledger entry
    pub(crate) fn step(
        &mut self,
        policy: &StakingPolicy,
        record: &OutcomeRecord,
    ) -> Result<LedgerEntry, Overflow> {
        let omission = self.omission;

        let is_betting = self.in_cycle || omission >= policy.start_omission();
        if is_betting && !self.in_cycle {
            self.in_cycle = true;
            self.cycle_position = 0;
        }

        let (cycle_index, multiplier, bet_amount) = if is_betting {
            let multiplier = policy.multiplier_at(self.cycle_position);
            let bet_amount = policy
                .base_amount()
                .checked_mul(multiplier)
                .ok_or(Overflow)?;
            (Some(self.cycle_position), multiplier, bet_amount)
        } else {
            (None, Decimal::ZERO, Decimal::ZERO)
        };
        self.invested = self.invested.checked_add(bet_amount).ok_or(Overflow)?;

        let mut period_return = Decimal::ZERO;
        let mut cycle_close = None;

        if record.is_hit {
            if is_betting {
                period_return = bet_amount.checked_mul(policy.odds()).ok_or(Overflow)?;
                self.returned = self.returned.checked_add(period_return).ok_or(Overflow)?;
                cycle_close = Some(CycleClose::Won);
                self.close_cycle();
            }
            self.omission = 0;
        } else {
            self.omission = self.omission.checked_add(1).ok_or(Overflow)?;
            if is_betting {
                self.cycle_position += 1;
                if self.cycle_position >= policy.stop_loss_count() {
                    // Loss accepted; a new cycle opens as soon as the
                    // omission threshold holds again.
                    cycle_close = Some(CycleClose::StopLoss);
                    self.close_cycle();
                }
            }
        }

        let cumulative_profit = self.returned.checked_sub(self.invested).ok_or(Overflow)?;

        Ok(LedgerEntry {
            period_id: record.period_id.clone(),
            omission,
            is_betting,
            cycle_index,
            multiplier,
            bet_amount,
            is_hit: record.is_hit,
            period_return,
            cumulative_invested: self.invested,
            cumulative_return: self.returned,
            cumulative_profit,
            cycle_close,
        })
    }

    fn close_cycle(&mut self) {
        self.in_cycle = false;
        self.cycle_position = 0;
    }
}
