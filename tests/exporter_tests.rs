// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtclip::{cli, commands::exporter, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO settings(key, value) VALUES ('start_month', '2025-01');
        INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Card', '300', '0', '100');
        INSERT INTO debts(name, balance, apr, min_payment) VALUES ('Loan', '250', '12', '50');
        "#,
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "debtclip",
        "export",
        "schedule",
        "--format",
        format,
        "--out",
        out,
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(conn, sub)
}

#[test]
fn export_schedule_writes_csv() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("schedule.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, "csv", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "month");
    assert_eq!(&headers[2], "debt");
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[0][1], "2025-01");
    assert_eq!(&records[0][2], "Card");
    assert_eq!(&records[0][6], "0.00");
    assert_eq!(&records[0][9], "200.00");
    assert!(records.iter().any(|r| &r[2] == "Loan" && &r[10] == "true"));
}

#[test]
fn export_schedule_writes_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("schedule.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, "JSON", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.starts_with("[\n"));
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows[0]["debt"], "Card");
    assert_eq!(rows[0]["interest"], "0.00");
    assert_eq!(rows[1]["debt"], "Loan");
    assert_eq!(rows[1]["interest"], "2.50");
}

#[test]
fn unknown_format_writes_nothing() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("schedule.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = export(&conn, "xml", &out_str).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}
