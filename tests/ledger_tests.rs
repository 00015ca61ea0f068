// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use debtclip::ledger::{NewPayment, PaymentLog, SqlitePaymentLog};
use debtclip::{cli, commands::payments, db};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Visa', '1000', '20', '30')",
        [],
    )
    .unwrap();
    conn
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn sqlite_log_groups_by_month() {
    let conn = setup();
    let mut log = SqlitePaymentLog::new(&conn);
    for (d, amt) in [(date(2025, 3, 1), dec!(30)), (date(2025, 3, 31), dec!(45.5)), (date(2025, 4, 1), dec!(30))] {
        log.record(NewPayment {
            date: d,
            debt_id: 1,
            debt_name: "Visa".into(),
            amount: amt,
            note: None,
        })
        .unwrap();
    }
    let march = log.entries_for_month(date(2025, 3, 1)).unwrap();
    assert_eq!(march.len(), 2);
    assert_eq!(march[0].debt_name, "Visa");
    assert_eq!(log.total_for_month(date(2025, 3, 1)).unwrap(), dec!(75.5));
    assert_eq!(log.total_for_month(date(2025, 4, 1)).unwrap(), dec!(30));
    assert_eq!(log.all().unwrap().len(), 3);
}

#[test]
fn pay_log_command_records_entry() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "debtclip", "pay", "log", "--debt", "Visa", "--amount", "55", "--date", "2025-05-10", "--note", "extra",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    payments::handle(&conn, sub).unwrap();

    let log = SqlitePaymentLog::new(&conn);
    let entries = log.all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, dec!(55));
    assert_eq!(entries[0].date, date(2025, 5, 10));
    assert_eq!(entries[0].note.as_deref(), Some("extra"));
}

#[test]
fn pay_log_rejects_unknown_debt() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "debtclip", "pay", "log", "--debt", "Amex", "--amount", "10",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(payments::handle(&conn, sub).is_err());
}

#[test]
fn removing_a_debt_drops_its_payments() {
    let conn = setup();
    let mut log = SqlitePaymentLog::new(&conn);
    log.record(NewPayment {
        date: date(2025, 1, 5),
        debt_id: 1,
        debt_name: "Visa".into(),
        amount: dec!(30),
        note: None,
    })
    .unwrap();
    conn.execute("DELETE FROM debts WHERE name='Visa'", []).unwrap();
    assert!(log.all().unwrap().is_empty());
}
