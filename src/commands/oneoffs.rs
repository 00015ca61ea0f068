// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{fmt_money, load_one_offs, maybe_print_json, parse_amount, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
            let note = sub
                .get_one::<String>("note")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());
            conn.execute(
                "INSERT INTO one_off_payments(month, amount, note) VALUES (?1,?2,?3)",
                params![month, amount.to_string(), note],
            )?;
            println!("Scheduled one-off payment of {} in {}", amount, month);
        }
        Some(("list", sub)) => {
            let items = load_one_offs(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .into_iter()
                    .map(|o| {
                        vec![
                            o.id.to_string(),
                            o.month,
                            fmt_money(&o.amount),
                            o.note.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Month", "Amount", "Note"], rows));
            }
        }
        Some(("rm", sub)) => {
            let raw = sub.get_one::<String>("id").unwrap();
            let id = raw.trim().parse::<i64>()?;
            let n = conn.execute("DELETE FROM one_off_payments WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("One-off payment {} not found", id));
            }
            println!("Removed one-off payment {}", id);
        }
        _ => {}
    }
    Ok(())
}
