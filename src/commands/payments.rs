// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{NewPayment, PaymentLog, SqlitePaymentLog};
use crate::utils::{
    fmt_money, id_for_debt, maybe_print_json, month_start, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut log = SqlitePaymentLog::new(conn);
    match m.subcommand() {
        Some(("log", sub)) => {
            let debt_name = sub.get_one::<String>("debt").unwrap().trim().to_string();
            let debt_id = id_for_debt(conn, &debt_name)?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d.trim())?,
                None => Utc::now().date_naive(),
            };
            let note = sub
                .get_one::<String>("note")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());
            let id = log.record(NewPayment {
                date,
                debt_id,
                debt_name: debt_name.clone(),
                amount,
                note,
            })?;
            println!(
                "Logged payment #{}: {} to '{}' on {}",
                id,
                fmt_money(&amount),
                debt_name,
                date
            );
        }
        Some(("list", sub)) => {
            let entries = match sub.get_one::<String>("month") {
                Some(mo) => log.entries_for_month(month_start(mo.trim())?)?,
                None => log.all()?,
            };
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
                return Ok(());
            }
            let rows = entries
                .into_iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.date.to_string(),
                        e.debt_name,
                        fmt_money(&e.amount),
                        e.note.unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["ID", "Date", "Debt", "Amount", "Note"], rows)
            );
        }
        _ => {}
    }
    Ok(())
}
