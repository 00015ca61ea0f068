// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtclip::{cli, commands::importer, db, utils::load_debts};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn import(conn: &mut Connection, csv: &str) -> anyhow::Result<()> {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", csv).unwrap();
    let path = file.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from(["debtclip", "import", "debts", "--path", &path]);
    let (_, sub) = matches.subcommand().unwrap();
    importer::handle(conn, sub)
}

#[test]
fn import_debts_coerces_formatted_values() {
    let mut conn = base_conn();
    import(
        &mut conn,
        "name,balance,apr,min_payment,included\n\
         Visa,\"$1,250.50\",19.99%,35,yes\n\
         Car,8000,4.5,210,no\n\
         Store,oops,0,25\n",
    )
    .unwrap();

    let rows = load_debts(&conn).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Visa");
    assert_eq!(rows[0].balance, dec!(1250.50));
    assert_eq!(rows[0].apr, dec!(19.99));
    assert!(rows[0].included);
    assert!(!rows[1].included);
    assert!(rows[2].balance.is_zero());
    assert!(rows[2].included);
}

#[test]
fn import_updates_existing_debts_by_name() {
    let mut conn = base_conn();
    import(&mut conn, "name,balance,apr,min_payment\nVisa,1000,20,30\n").unwrap();
    import(&mut conn, "name,balance,apr,min_payment\nVisa,900,18,30\n").unwrap();
    let rows = load_debts(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].balance, dec!(900));
    assert_eq!(rows[0].apr, dec!(18));
}

#[test]
fn import_rolls_back_on_bad_row() {
    let mut conn = base_conn();
    let err = import(
        &mut conn,
        "name,balance,apr,min_payment\nVisa,1000,20,30\n,50,1,5\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("name must not be empty"));
    assert!(load_debts(&conn).unwrap().is_empty());
}
