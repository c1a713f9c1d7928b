//! Per-period ledger produced by a replay

use super::CycleClose;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One replayed period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Draw period identifier
    pub period_id: String,
    /// Consecutive misses before this period's outcome was applied
    pub omission: u32,
    /// Whether a stake was placed this period
    pub is_betting: bool,
    /// 0-based bet position within the current cycle, when betting
    pub cycle_index: Option<u32>,
    /// Applied multiplier, zero when not betting
    pub multiplier: Decimal,
    /// `base_amount * multiplier`, zero when not betting
    pub bet_amount: Decimal,
    /// Ground-truth outcome of the period
    pub is_hit: bool,
    /// Payout received this period
    pub period_return: Decimal,
    pub cumulative_invested: Decimal,
    pub cumulative_return: Decimal,
    /// `cumulative_return - cumulative_invested`
    pub cumulative_profit: Decimal,
    /// Set on the period that closed a cycle
    pub cycle_close: Option<CycleClose>,
}

impl LedgerEntry {
    /// Omission counter after this period's outcome is applied
    pub fn omission_after(&self) -> u32 {
        if self.is_hit {
            0
        } else {
            self.omission.saturating_add(1)
        }
    }
}

/// Ordered, immutable record of a full replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub(crate) fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Final entry, carrying the run's closing totals
    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(omission: u32, is_hit: bool) -> LedgerEntry {
        LedgerEntry {
            period_id: "1".to_string(),
            omission,
            is_betting: true,
            cycle_index: Some(0),
            multiplier: dec!(2),
            bet_amount: dec!(200),
            is_hit,
            period_return: if is_hit { dec!(400) } else { dec!(0) },
            cumulative_invested: dec!(200),
            cumulative_return: dec!(0),
            cumulative_profit: dec!(-200),
            cycle_close: None,
        }
    }

    #[test]
    fn test_omission_after() {
        assert_eq!(entry(4, false).omission_after(), 5);
        assert_eq!(entry(4, true).omission_after(), 0);
    }

    #[test]
    fn test_ledger_serializes_as_array() {
        let ledger = Ledger::from_entries(vec![entry(0, false)]);
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["cycle_index"], 0);
        assert_eq!(json[0]["cycle_close"], serde_json::Value::Null);
    }
}
