//! Reference staking scenarios

use super::outcomes;
use lotto_stake::backtest::{BacktestEngine, CycleClose};
use lotto_stake::policy::PolicyParams;
use rust_decimal_macros::dec;

fn params(sequence: &str, stop_loss: u32) -> PolicyParams {
    PolicyParams {
        base_amount: Some(dec!(100)),
        betting_sequence: Some(sequence.to_string()),
        stop_loss_count: Some(stop_loss),
        odds: Some(dec!(2.0)),
        start_omission: Some(5),
        test_periods: Some(10),
    }
}

#[test]
fn test_all_misses_stop_loss_then_reopen() {
    let engine = BacktestEngine::from_params(&params("1,2,4", 3)).unwrap();
    let (ledger, summary) = engine.run(&outcomes(&[], 10)).unwrap();
    let e = ledger.entries();

    // Betting opens on period 6, when omission reaches 5
    assert!(e[..5].iter().all(|x| !x.is_betting));
    assert_eq!(e[5].omission, 5);
    let stakes: Vec<_> = e[5..8].iter().map(|x| x.bet_amount).collect();
    assert_eq!(stakes, vec![dec!(100), dec!(200), dec!(400)]);
    assert_eq!(e[7].cycle_close, Some(CycleClose::StopLoss));

    // 700 is the total through period 8, where the first cycle is abandoned
    assert_eq!(e[7].cumulative_invested, dec!(700));
    assert_eq!(e[7].cumulative_profit, dec!(-700));
    assert_eq!(summary.hit_count, 0);
    assert_eq!(summary.cycles_stopped, 1);

    // Omission never reset, so periods 9-10 open a fresh cycle staking 100 + 200.
    // The full-run total of 1000 includes that second cycle.
    assert_eq!(e[8].cycle_index, Some(0));
    assert_eq!(e[9].bet_amount, dec!(200));
    assert_eq!(summary.total_invested, dec!(1000));
    assert_eq!(summary.net_profit, dec!(-1000));
    assert_eq!(summary.open_cycles(), 1);
}

#[test]
fn test_hit_closes_cycle() {
    let engine = BacktestEngine::from_params(&params("1,2,4", 3)).unwrap();
    let (ledger, summary) = engine.run(&outcomes(&[7], 10)).unwrap();
    let e = ledger.entries();

    assert_eq!(e[6].bet_amount, dec!(200));
    assert_eq!(e[6].period_return, dec!(400));
    assert_eq!(e[6].cycle_close, Some(CycleClose::Won));
    assert_eq!(e[7].omission, 0);

    assert_eq!(summary.total_invested, dec!(300));
    assert_eq!(summary.total_return, dec!(400));
    assert_eq!(summary.net_profit, dec!(100));
    assert_eq!(summary.betting_count, 2);
    assert_eq!(summary.hit_count, 1);
    assert_eq!(summary.hit_rate, dec!(0.5));
    // Omission only reaches 2 after the hit
    assert!(e[7..].iter().all(|x| !x.is_betting));
}

#[test]
fn test_single_multiplier_repeats() {
    for stop_loss in [1, 2, 5, 50] {
        let engine = BacktestEngine::from_params(&params("1", stop_loss)).unwrap();
        let (ledger, _) = engine.run(&outcomes(&[12, 30], 40)).unwrap();

        for entry in ledger.iter().filter(|e| e.is_betting) {
            assert_eq!(entry.multiplier, dec!(1));
            assert_eq!(entry.bet_amount, dec!(100));
        }
    }
}

#[test]
fn test_threshold_never_reached() {
    let engine = BacktestEngine::from_params(&params("1,2,4", 3)).unwrap();
    let (ledger, summary) = engine.run(&outcomes(&[4, 8, 12], 14)).unwrap();

    assert!(ledger.iter().all(|e| !e.is_betting));
    assert_eq!(summary.betting_count, 0);
    assert_eq!(summary.hit_rate, dec!(0));
    assert_eq!(summary.total_invested, dec!(0));
    assert_eq!(summary.net_profit, dec!(0));
    assert_eq!(summary.max_continuous_miss, 3);
}

#[test]
fn test_open_cycle_left_unsettled() {
    let engine = BacktestEngine::from_params(&params("1,2,4", 3)).unwrap();
    let (ledger, summary) = engine.run(&outcomes(&[], 7)).unwrap();

    let last = ledger.last().unwrap();
    assert!(last.is_betting);
    assert_eq!(last.cycle_close, None);
    assert_eq!(summary.total_invested, dec!(300));
    assert_eq!(summary.open_cycles(), 1);
}
