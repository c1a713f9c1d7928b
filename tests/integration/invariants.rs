//! Ledger invariants checked over every outcome sequence of a fixed length

use super::from_mask;
use lotto_stake::backtest::{BacktestEngine, CycleClose, Ledger, Summary};
use lotto_stake::policy::StakingPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LEN: usize = 12;

fn policies() -> Vec<StakingPolicy> {
    vec![
        StakingPolicy::new(dec!(100), vec![dec!(1), dec!(2), dec!(4)], 3, dec!(2.0), 2, 12).unwrap(),
        StakingPolicy::new(dec!(2), vec![dec!(1)], 4, dec!(9.8), 1, 12).unwrap(),
        StakingPolicy::new(dec!(0.5), vec![dec!(1.5), dec!(3)], 1, dec!(1), 3, 12).unwrap(),
        StakingPolicy::new(dec!(10), vec![dec!(1), dec!(3), dec!(9)], 6, dec!(3.33), 4, 12).unwrap(),
    ]
}

fn for_all_sequences(mut check: impl FnMut(&StakingPolicy, &Ledger)) {
    for policy in policies() {
        let engine = BacktestEngine::new(policy.clone());
        for mask in 0..(1u32 << LEN) {
            let ledger = engine.replay(&from_mask(mask, LEN)).unwrap();
            check(&policy, &ledger);
        }
    }
}

#[test]
fn test_omission_tracks_outcomes() {
    for_all_sequences(|_, ledger| {
        let e = ledger.entries();
        assert_eq!(e[0].omission, 0);
        for pair in e.windows(2) {
            let expected = if pair[0].is_hit { 0 } else { pair[0].omission + 1 };
            assert_eq!(pair[1].omission, expected);
        }
    });
}

#[test]
fn test_cumulative_consistency() {
    for_all_sequences(|policy, ledger| {
        let mut invested = Decimal::ZERO;
        let mut returned = Decimal::ZERO;
        for entry in ledger {
            invested += entry.bet_amount;
            returned += entry.period_return;
            assert_eq!(entry.cumulative_invested, invested);
            assert_eq!(entry.cumulative_return, returned);
            assert_eq!(entry.cumulative_profit, returned - invested);

            if entry.is_betting {
                assert_eq!(entry.bet_amount, policy.base_amount() * entry.multiplier);
            } else {
                assert_eq!(entry.bet_amount, Decimal::ZERO);
            }
            if entry.is_betting && entry.is_hit {
                assert_eq!(entry.period_return, entry.bet_amount * policy.odds());
            } else {
                assert_eq!(entry.period_return, Decimal::ZERO);
            }
        }
    });
}

#[test]
fn test_cycle_bound() {
    for_all_sequences(|policy, ledger| {
        let mut run = 0u32;
        for entry in ledger {
            if !entry.is_betting {
                assert_eq!(run, 0, "idle period inside an open cycle");
                continue;
            }
            assert_eq!(entry.cycle_index, Some(run));
            run += 1;
            assert!(run <= policy.stop_loss_count());

            match entry.cycle_close {
                Some(CycleClose::Won) => {
                    assert!(entry.is_hit);
                    run = 0;
                }
                Some(CycleClose::StopLoss) => {
                    assert!(!entry.is_hit);
                    assert_eq!(run, policy.stop_loss_count());
                    run = 0;
                }
                None => assert!(!entry.is_hit),
            }
        }
    });
}

#[test]
fn test_betting_starts_at_threshold() {
    for_all_sequences(|policy, ledger| {
        for entry in ledger {
            if entry.cycle_index == Some(0) {
                assert!(entry.omission >= policy.start_omission());
            }
        }
    });
}

#[test]
fn test_summary_depends_only_on_ledger() {
    for_all_sequences(|_, ledger| {
        let copy = Ledger::clone(ledger);
        let summary = Summary::from_ledger(ledger);
        assert_eq!(summary, Summary::from_ledger(&copy));

        assert!(summary.hit_count <= summary.betting_count);
        assert!(summary.open_cycles() <= 1);
        if summary.betting_count == 0 {
            assert_eq!(summary.hit_rate, Decimal::ZERO);
        }
    });
}
