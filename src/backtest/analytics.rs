//! Backtest summary statistics
//!
//! Derived from a finished ledger only, never from replay internals.

use super::{CycleClose, Ledger};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over one ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of replayed periods
    pub period_count: usize,
    /// Sum of all stakes
    pub total_invested: Decimal,
    /// Sum of all payouts
    pub total_return: Decimal,
    /// `total_return - total_invested`
    pub net_profit: Decimal,
    /// Periods with a stake placed
    pub betting_count: usize,
    /// Betting periods that hit
    pub hit_count: usize,
    /// `hit_count / betting_count`, zero without bets
    pub hit_rate: Decimal,
    /// Longest run of consecutive misses in the sequence
    pub max_continuous_miss: u32,
    /// Cycles opened
    pub cycles_opened: usize,
    /// Cycles closed by a hit
    pub cycles_won: usize,
    /// Cycles abandoned at the stop-loss depth
    pub cycles_stopped: usize,
    /// Largest single stake
    pub max_bet_amount: Decimal,
    /// Largest fall of cumulative profit from its running peak
    pub max_drawdown: Decimal,
    /// Lowest cumulative profit reached, zero if never negative
    pub lowest_profit: Decimal,
    /// `net_profit / total_invested`, zero without bets
    pub return_on_investment: Decimal,
}

impl Summary {
    /// Compute the summary of a ledger
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut summary = Summary {
            period_count: ledger.len(),
            ..Default::default()
        };

        let mut peak = Decimal::ZERO;

        for entry in ledger {
            summary.max_continuous_miss = summary.max_continuous_miss.max(entry.omission_after());

            peak = peak.max(entry.cumulative_profit);
            summary.max_drawdown = summary.max_drawdown.max(peak - entry.cumulative_profit);
            summary.lowest_profit = summary.lowest_profit.min(entry.cumulative_profit);

            match entry.cycle_close {
                Some(CycleClose::Won) => summary.cycles_won += 1,
                Some(CycleClose::StopLoss) => summary.cycles_stopped += 1,
                None => {}
            }

            if !entry.is_betting {
                continue;
            }
            summary.betting_count += 1;
            if entry.is_hit {
                summary.hit_count += 1;
            }
            if entry.cycle_index == Some(0) {
                summary.cycles_opened += 1;
            }
            summary.max_bet_amount = summary.max_bet_amount.max(entry.bet_amount);
        }

        if let Some(last) = ledger.last() {
            summary.total_invested = last.cumulative_invested;
            summary.total_return = last.cumulative_return;
            summary.net_profit = last.cumulative_profit;
        }

        if summary.betting_count > 0 {
            summary.hit_rate =
                Decimal::from(summary.hit_count) / Decimal::from(summary.betting_count);
        }
        if summary.total_invested > Decimal::ZERO {
            summary.return_on_investment = summary.net_profit / summary.total_invested;
        }

        summary
    }

    /// Cycles still open when the sequence ended (zero or one)
    pub fn open_cycles(&self) -> usize {
        self.cycles_opened
            .saturating_sub(self.cycles_won + self.cycles_stopped)
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               SIMULATION BETTING RESULTS
══════════════════════════════════════════════════════

PROFIT
───────────────────────────────────────────────────────
Total Invested:   {:.2}
Total Return:     {:.2}
Net Profit:       {:+.2} ({:+.2}%)
Max Drawdown:     {:.2}
Lowest Profit:    {:+.2}

ACTIVITY
───────────────────────────────────────────────────────
Periods:          {}
Bets Placed:      {}
Hits:             {}
Hit Rate:         {:.2}%
Max Miss Streak:  {}
Max Stake:        {:.2}

CYCLES
───────────────────────────────────────────────────────
Opened:           {}
Won:              {}
Stopped Out:      {}
Still Open:       {}
══════════════════════════════════════════════════════
"#,
            self.total_invested,
            self.total_return,
            self.net_profit,
            self.return_on_investment * dec!(100),
            self.max_drawdown,
            self.lowest_profit,
            self.period_count,
            self.betting_count,
            self.hit_count,
            self.hit_rate * dec!(100),
            self.max_continuous_miss,
            self.max_bet_amount,
            self.cycles_opened,
            self.cycles_won,
            self.cycles_stopped,
            self.open_cycles(),
        )
    }
}
