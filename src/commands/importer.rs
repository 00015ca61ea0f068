// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::normalize::coerce_amount;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use log::debug;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("debts", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let n = import_debts(conn, path)?;
            println!("Imported {} debts", n);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn parse_included(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "n" | "excluded"
    )
}

/// Upsert debts by name from a CSV with header
/// `name,balance,apr,min_payment[,included]`. Amounts such as `$1,200.50`
/// or `19.99%` are coerced; anything unparseable becomes zero.
pub fn import_debts(conn: &mut Connection, path: &str) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let name = rec.get(0).context("name missing")?.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!("Row {}: debt name must not be empty", line + 2));
        }
        let balance_raw = rec.get(1).context("balance missing")?;
        let apr_raw = rec.get(2).context("apr missing")?;
        let min_raw = rec.get(3).context("min_payment missing")?;
        let included = rec.get(4).map(parse_included).unwrap_or(true);

        let balance = coerce_amount(balance_raw);
        let apr = coerce_amount(apr_raw);
        let min_payment = coerce_amount(min_raw);

        tx.execute(
            "INSERT INTO debts(name, balance, apr, min_payment, included) VALUES (?1,?2,?3,?4,?5)
             ON CONFLICT(name) DO UPDATE SET balance=excluded.balance, apr=excluded.apr,
                min_payment=excluded.min_payment, included=excluded.included",
            params![
                name,
                balance.to_string(),
                apr.to_string(),
                min_payment.to_string(),
                included as i64
            ],
        )?;
        debug!("imported debt {}", name);
        count += 1;
    }
    tx.commit()?;
    Ok(count)
}
