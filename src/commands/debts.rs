// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::normalize;
use crate::utils::{
    fmt_money, id_for_debt, load_debts, maybe_print_json, parse_amount, pretty_table,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("set", sub)) => update(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let n = conn.execute("DELETE FROM debts WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Debt '{}' not found", name));
            }
            println!("Removed debt '{}'", name);
        }
        Some(("include", sub)) => set_included(conn, sub, true)?,
        Some(("exclude", sub)) => set_included(conn, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let balance = parse_amount(sub.get_one::<String>("balance").unwrap().trim())?;
    let apr = parse_amount(sub.get_one::<String>("apr").unwrap().trim())?;
    let min_payment = parse_amount(sub.get_one::<String>("min_payment").unwrap().trim())?;
    let included = !sub.get_flag("exclude");
    if name.is_empty() {
        return Err(anyhow!("Debt name must not be empty"));
    }
    conn.execute(
        "INSERT INTO debts(name, balance, apr, min_payment, included) VALUES (?1,?2,?3,?4,?5)",
        params![
            name,
            balance.to_string(),
            apr.to_string(),
            min_payment.to_string(),
            included as i64
        ],
    )?;
    println!(
        "Added debt '{}' ({} at {}%, min {}){}",
        name,
        balance,
        apr,
        min_payment,
        if included { "" } else { " [excluded]" }
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let id = id_for_debt(conn, name)?;
    let mut changed = Vec::new();
    for (arg, column) in [
        ("balance", "balance"),
        ("apr", "apr"),
        ("min_payment", "min_payment"),
    ] {
        if let Some(raw) = sub.get_one::<String>(arg) {
            let value = parse_amount(raw.trim())?;
            conn.execute(
                &format!("UPDATE debts SET {}=?1 WHERE id=?2", column),
                params![value.to_string(), id],
            )?;
            changed.push(format!("{}={}", column, value));
        }
    }
    if changed.is_empty() {
        println!("Nothing to update for '{}'", name);
    } else {
        println!("Updated '{}': {}", name, changed.join(", "));
    }
    Ok(())
}

fn set_included(conn: &Connection, sub: &clap::ArgMatches, included: bool) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let id = id_for_debt(conn, name)?;
    conn.execute(
        "UPDATE debts SET included=?1 WHERE id=?2",
        params![included as i64, id],
    )?;
    println!(
        "{} '{}'",
        if included { "Included" } else { "Excluded" },
        name
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let debts = load_debts(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &debts)? {
        return Ok(());
    }
    // Show what the planner will actually simulate.
    let inputs: Vec<_> = debts.iter().map(|d| d.to_input()).collect();
    let normalized = normalize(&inputs);
    let rows = normalized
        .active
        .iter()
        .chain(normalized.excluded.iter())
        .map(|d| {
            vec![
                d.name.clone(),
                fmt_money(&d.balance),
                format!("{}%", d.apr),
                fmt_money(&d.min_payment),
                fmt_money(&d.monthly_interest()),
                if d.included { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Name", "Balance", "APR", "Min Payment", "Interest/mo", "In Plan"],
            rows
        )
    );
    println!(
        "Total in plan: {} across {} debt(s)",
        fmt_money(&normalized.total_balance()),
        normalized.active.len()
    );
    Ok(())
}
