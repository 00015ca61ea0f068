// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtclip::commands::{debts, oneoffs, settings};
use debtclip::engine::Strategy;
use debtclip::utils::{load_debts, load_one_offs, load_plan_settings};
use debtclip::{cli, db};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["debtclip"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("debt", sub)) => debts::handle(conn, sub),
        Some(("settings", sub)) => settings::handle(conn, sub),
        Some(("oneoff", sub)) => oneoffs::handle(conn, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn add_update_and_exclude_debt() {
    let conn = setup();
    run(
        &conn,
        &["debt", "add", "--name", "Visa", "--balance", "1200.50", "--apr", "19.99", "--min-payment", "35"],
    )
    .unwrap();
    run(&conn, &["debt", "set", "--name", "Visa", "--balance", "1100"]).unwrap();
    run(&conn, &["debt", "exclude", "--name", "Visa"]).unwrap();

    let rows = load_debts(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Visa");
    assert_eq!(rows[0].balance, dec!(1100));
    assert_eq!(rows[0].apr, dec!(19.99));
    assert_eq!(rows[0].min_payment, dec!(35));
    assert!(!rows[0].included);

    run(&conn, &["debt", "include", "--name", "Visa"]).unwrap();
    assert!(load_debts(&conn).unwrap()[0].included);
}

#[test]
fn negative_amounts_are_rejected_at_the_door() {
    let conn = setup();
    let err = run(
        &conn,
        &["debt", "add", "--name", "Loan", "--balance=-5", "--apr", "4", "--min-payment", "10"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
    assert!(load_debts(&conn).unwrap().is_empty());
}

#[test]
fn unknown_debt_is_an_error() {
    let conn = setup();
    assert!(run(&conn, &["debt", "rm", "--name", "Nope"]).is_err());
    assert!(run(&conn, &["debt", "set", "--name", "Nope", "--apr", "3"]).is_err());
}

#[test]
fn stored_garbage_is_coerced_on_load() {
    let conn = setup();
    conn.execute(
        "INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Store','$1,000.00','abc','25')",
        [],
    )
    .unwrap();
    let rows = load_debts(&conn).unwrap();
    assert_eq!(rows[0].balance, dec!(1000.00));
    assert!(rows[0].apr.is_zero());
}

#[test]
fn settings_round_trip_through_storage() {
    let conn = setup();
    run(
        &conn,
        &["settings", "set", "--strategy", "avalanche", "--extra", "150", "--one-time", "500", "--start", "2025-04", "--max-months", "240"],
    )
    .unwrap();
    let s = load_plan_settings(&conn).unwrap();
    assert_eq!(s.strategy, Strategy::Avalanche);
    assert_eq!(s.extra_monthly, dec!(150));
    assert_eq!(s.one_time_extra, dec!(500));
    assert_eq!(s.start_date.unwrap().to_string(), "2025-04-01");
    assert_eq!(s.max_months, Some(240));
}

#[test]
fn month_cap_outside_range_is_rejected_by_cli() {
    for bad in ["0", "1201"] {
        let parsed = cli::build_cli().try_get_matches_from([
            "debtclip", "settings", "set", "--max-months", bad,
        ]);
        assert!(parsed.is_err(), "--max-months {} accepted", bad);
    }
    let parsed = cli::build_cli()
        .try_get_matches_from(["debtclip", "plan", "summary", "--max-months", "1200"]);
    assert!(parsed.is_ok());
}

#[test]
fn defaults_apply_without_settings() {
    let conn = setup();
    let s = load_plan_settings(&conn).unwrap();
    assert_eq!(s.strategy, Strategy::Snowball);
    assert!(s.extra_monthly.is_zero());
    assert!(s.start_date.is_some());
    assert_eq!(s.max_months, None);
}

#[test]
fn one_offs_are_placed_relative_to_start() {
    let conn = setup();
    run(&conn, &["settings", "set", "--start", "2025-04"]).unwrap();
    run(&conn, &["oneoff", "add", "--month", "2025-06", "--amount", "300", "--note", "bonus"]).unwrap();
    run(&conn, &["oneoff", "add", "--month", "2025-01", "--amount", "50"]).unwrap();

    assert_eq!(load_one_offs(&conn).unwrap().len(), 2);
    let s = load_plan_settings(&conn).unwrap();
    // January predates the plan and is skipped.
    assert_eq!(s.one_off_payments.len(), 1);
    assert_eq!(s.one_off_payments[0].month_index, 3);
    assert_eq!(s.one_off_for(3), dec!(300));

    let id = load_one_offs(&conn).unwrap()[0].id.to_string();
    run(&conn, &["oneoff", "rm", "--id", &id]).unwrap();
    assert_eq!(load_one_offs(&conn).unwrap().len(), 1);
    assert!(run(&conn, &["oneoff", "add", "--month", "June", "--amount", "1"]).is_err());
}
