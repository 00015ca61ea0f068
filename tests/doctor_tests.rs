// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtclip::{commands::doctor, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES ('start_month', '2025-06')",
        [],
    )
    .unwrap();
    conn
}

fn codes(conn: &Connection) -> Vec<String> {
    doctor::diagnose(conn)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect()
}

#[test]
fn clean_database_has_only_the_empty_plan_issue() {
    let conn = setup();
    assert_eq!(codes(&conn), vec!["no_active_debts"]);
    conn.execute(
        "INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Visa', '1000', '20', '30')",
        [],
    )
    .unwrap();
    assert!(codes(&conn).is_empty());
}

#[test]
fn doctor_reports_suspicious_values() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Scaled', '1000', '1999', '40');
        INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Stuck', '5000', '24', '50');
        INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Neg', '-10', '5', '10');
        INSERT INTO one_off_payments(month, amount) VALUES ('2025-01', '100');
        "#,
    )
    .unwrap();
    let found = codes(&conn);
    assert!(found.contains(&"apr_scaled".to_string()));
    assert!(found.contains(&"negative_balance".to_string()));
    assert!(found.contains(&"negative_amortization".to_string()));
    assert!(found.contains(&"one_off_before_start".to_string()));
    assert!(!found.contains(&"no_active_debts".to_string()));
}
