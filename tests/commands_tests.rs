// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use networth::commands::networth::NetWorthReport;
use networth::commands::{accounts, balances, config, doctor, exporter, snapshot};
use networth::errors::LedgerError;
use networth::models::{AccountKind, SnapshotOutcome};
use networth::utils::{fmt_whole, get_currency_symbol};
use networth::{calculator, cli, db, query, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["networth"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("account", sub)) => accounts::handle(conn, sub),
        Some(("balance", sub)) => balances::handle(conn, sub),
        Some(("export", sub)) => exporter::handle(conn, sub),
        Some(("config", sub)) => config::handle(conn, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn account_add_trims_name_and_balance_accepts_negative() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["account", "add", "--name", " CreditCard ", "--kind", "debt"]).unwrap();
    run(
        &conn,
        &[
            "balance", "set", "--account", "CreditCard", "--amount", "-300.50", "--date",
            "2024-01-03",
        ],
    )
    .unwrap();

    let acct = store::get_account(&conn, "CreditCard").unwrap();
    assert_eq!(acct.kind, AccountKind::Debt);
    assert_eq!(
        calculator::current_net_worth(&conn).unwrap(),
        Decimal::new(-30050, 2)
    );
}

#[test]
fn duplicate_account_via_cli_reports_already_exists() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["account", "add", "--name", "Checking", "--kind", "asset"]).unwrap();
    let err = run(&conn, &["account", "add", "--name", "Checking", "--kind", "asset"]).unwrap_err();
    let ledger = err.downcast_ref::<LedgerError>().unwrap();
    assert!(matches!(ledger, LedgerError::AlreadyExists(_)));
    assert_eq!(ledger.user_message(), "Account 'Checking' already exists");
}

#[test]
fn account_rm_then_history_is_not_found() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["account", "add", "--name", "X", "--kind", "asset"]).unwrap();
    run(&conn, &["account", "rm", "--name", "X"]).unwrap();
    let err = run(&conn, &["balance", "history", "--account", "X"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NotFound(_))
    ));
}

#[test]
fn balance_set_rejects_bad_date() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["account", "add", "--name", "Checking", "--kind", "asset"]).unwrap();
    let err = run(
        &conn,
        &["balance", "set", "--account", "Checking", "--amount", "10", "--date", "2024-13-01"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid date"));
    assert!(store::observations_for(&conn, "Checking").unwrap().is_empty());
}

#[test]
fn asset_and_debt_rows_are_split() {
    let conn = db::open_in_memory().unwrap();
    store::create_account(&conn, "Checking", AccountKind::Asset).unwrap();
    store::create_account(&conn, "Mortgage", AccountKind::Debt).unwrap();
    store::append_observation(&conn, "Checking", d(2024, 1, 1), Decimal::new(123456, 2)).unwrap();
    store::append_observation(&conn, "Mortgage", d(2024, 1, 1), Decimal::from(-250000)).unwrap();
    let data = query::accounts_with_latest_balance(&conn).unwrap();

    assert_eq!(
        accounts::rows_for_kind(&data, AccountKind::Asset, "$"),
        vec![vec!["Checking".to_string(), "$1,235".to_string()]]
    );
    assert_eq!(
        accounts::rows_for_kind(&data, AccountKind::Debt, "$"),
        vec![vec!["Mortgage".to_string(), "-$250,000".to_string()]]
    );
}

#[test]
fn whole_unit_formatting() {
    assert_eq!(fmt_whole(&Decimal::from(0), "$"), "$0");
    assert_eq!(fmt_whole(&Decimal::from(999), "$"), "$999");
    assert_eq!(fmt_whole(&Decimal::from(1000), "$"), "$1,000");
    assert_eq!(fmt_whole(&Decimal::from(1234567), "€"), "€1,234,567");
    assert_eq!(fmt_whole(&Decimal::new(-4, 1), "$"), "$0");
    assert_eq!(fmt_whole(&Decimal::new(-2995, 1), "$"), "-$300");
}

#[test]
fn config_symbol_round_trips_through_settings() {
    let conn = db::open_in_memory().unwrap();
    assert_eq!(get_currency_symbol(&conn).unwrap(), "$");
    run(&conn, &["config", "set-symbol", "£"]).unwrap();
    assert_eq!(get_currency_symbol(&conn).unwrap(), "£");
}

#[test]
fn snapshot_command_uses_given_date_and_is_idempotent() {
    let mut conn = db::open_in_memory().unwrap();
    store::create_account(&conn, "Checking", AccountKind::Asset).unwrap();
    store::append_observation(&conn, "Checking", d(2024, 1, 5), Decimal::from(1200)).unwrap();

    let matches = cli::build_cli().get_matches_from(["networth", "snapshot", "--date", "2024-01-05"]);
    let Some(("snapshot", sub)) = matches.subcommand() else {
        panic!("snapshot command not parsed");
    };
    assert!(snapshot::handle(&mut conn, sub).unwrap().is_created());
    assert_eq!(snapshot::handle(&mut conn, sub).unwrap(), SnapshotOutcome::Skipped);
    assert_eq!(query::net_worth_history(&conn).unwrap().len(), 1);
}

#[test]
fn export_networth_json_and_csv() {
    let mut conn = db::open_in_memory().unwrap();
    store::create_account(&conn, "Checking", AccountKind::Asset).unwrap();
    store::append_observation(&conn, "Checking", d(2024, 1, 1), Decimal::from(1000)).unwrap();
    networth::snapshot::record_snapshot_for_today(&mut conn, d(2024, 1, 1)).unwrap();

    let dir = tempdir().unwrap();
    let json_path = dir.path().join("history.json");
    let json_str = json_path.to_string_lossy().to_string();
    run(&conn, &["export", "networth", "--format", "json", "--out", &json_str]).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!([{ "date": "2024-01-01", "total_net_worth": "1000" }])
    );

    let csv_path = dir.path().join("history.csv");
    let csv_str = csv_path.to_string_lossy().to_string();
    run(&conn, &["export", "networth", "--format", "CSV", "--out", &csv_str]).unwrap();
    let contents = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(contents, "date,total_net_worth\n2024-01-01,1000\n");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = db::open_in_memory().unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("history.xml");
    let out_str = out_path.to_string_lossy().to_string();
    assert!(run(&conn, &["export", "networth", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}

#[test]
fn doctor_flags_empty_and_future_accounts() {
    let conn = db::open_in_memory().unwrap();
    store::create_account(&conn, "Idle", AccountKind::Asset).unwrap();
    store::create_account(&conn, "Ahead", AccountKind::Asset).unwrap();
    store::append_observation(&conn, "Ahead", d(2030, 1, 1), Decimal::from(1)).unwrap();

    let rows = doctor::diagnose(&conn, d(2024, 1, 1)).unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["account_without_balance".to_string(), "Idle".to_string()],
            vec!["future_observation".to_string(), "Ahead 2030-01-01".to_string()],
        ]
    );
}

#[test]
fn storage_errors_get_generic_message() {
    let err = LedgerError::StorageFailure(rusqlite::Error::QueryReturnedNoRows);
    assert_eq!(
        err.user_message(),
        "Ledger is temporarily unavailable, please try again later"
    );
}

#[test]
fn skipped_day_stays_success_when_reread_fails() {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch("DROP TABLE networth_snapshots").unwrap();
    let outcome = snapshot::report_outcome(&conn, d(2024, 1, 5), Ok(SnapshotOutcome::Skipped));
    assert_eq!(outcome.unwrap(), SnapshotOutcome::Skipped);
}

#[test]
fn failed_recording_stays_an_error() {
    let conn = db::open_in_memory().unwrap();
    let recorded = Err(LedgerError::InvariantViolation("two rows".into()));
    assert!(snapshot::report_outcome(&conn, d(2024, 1, 5), recorded).is_err());
}

#[test]
fn show_json_reports_net_worth_as_number() {
    let report = NetWorthReport {
        net_worth: Decimal::new(9005, 1),
    };
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value, json!({ "net_worth": 900.5 }));
    assert!(value["net_worth"].is_number());
}
