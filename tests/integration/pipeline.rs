//! File source through engine to exported ledger

use lotto_stake::backtest::{run_backtest, BacktestError};
use lotto_stake::outcome::{FileOutcomeSource, OutcomeQuery};
use lotto_stake::policy::PolicyParams;
use lotto_stake::report::{write_ledger_csv, LEDGER_COLUMNS};
use rust_decimal_macros::dec;
use std::io::Write;

fn policy_params() -> PolicyParams {
    PolicyParams {
        base_amount: Some(dec!(2)),
        betting_sequence: Some("1,2,4".to_string()),
        stop_loss_count: Some(3),
        odds: Some(dec!(9.8)),
        start_omission: Some(3),
        test_periods: Some(8),
    }
}

#[tokio::test]
async fn test_csv_file_to_ledger_csv() {
    let mut input = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(input, "period_id,is_hit").unwrap();
    // Two older periods fall outside test_periods
    for (id, flag) in [
        ("2024001", "hit"),
        ("2024002", "hit"),
        ("2024003", "miss"),
        ("2024004", "miss"),
        ("2024005", "miss"),
        ("2024006", "miss"),
        ("2024007", "hit"),
        ("2024008", "miss"),
        ("2024009", "miss"),
        ("2024010", "miss"),
    ] {
        writeln!(input, "{},{}", id, flag).unwrap();
    }

    let policy = policy_params().validate().unwrap();
    let source = FileOutcomeSource::new(input.path());
    let query = OutcomeQuery::new("pl3", "cold-number", policy.test_periods())
        .with_selector("position", "1");

    let report = run_backtest(&source, query, policy).await.unwrap();
    assert_eq!(report.ledger.len(), 8);
    assert_eq!(report.ledger.entries()[0].period_id, "2024003");

    // 2024006 bets 2, 2024007 hits with 4
    let summary = &report.summary;
    assert_eq!(summary.betting_count, 2);
    assert_eq!(summary.hit_count, 1);
    assert_eq!(summary.total_invested, dec!(6));
    assert_eq!(summary.total_return, dec!(39.2));
    assert_eq!(summary.net_profit, dec!(33.2));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    write_ledger_csv(&out, &report.ledger).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, LEDGER_COLUMNS);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 8);
    assert_eq!(&rows[4][0], "2024007");
    assert_eq!(&rows[4][10], "33.2");
    assert_eq!(&rows[4][11], "won");
}

#[tokio::test]
async fn test_too_short_file_is_rejected() {
    let mut input = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(input, r#"[{{"period_id": 1, "is_hit": false}}, {{"period_id": 2, "is_hit": false}}]"#).unwrap();

    let policy = policy_params().validate().unwrap();
    let source = FileOutcomeSource::new(input.path());
    let query = OutcomeQuery::new("pl3", "cold-number", policy.test_periods());

    let err = run_backtest(&source, query, policy).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<BacktestError>(),
        Some(&BacktestError::InsufficientData {
            required: 4,
            actual: 2
        })
    );
}
