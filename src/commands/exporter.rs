// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::plan::{ScheduleRow, build_input, schedule_rows};
use crate::engine::compute_debt_plan;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => export_schedule(conn, sub),
        _ => Ok(()),
    }
}

fn export_schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let plan = compute_debt_plan(&build_input(conn, sub)?);
    let rows = schedule_rows(&plan, None, None);
    write_schedule(&rows, &fmt, out)?;
    println!("Exported {} schedule rows to {}", rows.len(), out);
    if plan.is_capped() {
        eprintln!(
            "Warning: plan is not paid off within {} months",
            plan.months.len()
        );
    }
    Ok(())
}

pub fn write_schedule(rows: &[ScheduleRow], fmt: &str, out: &str) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "month",
                "date",
                "debt",
                "starting_balance",
                "interest",
                "min_applied",
                "extra_applied",
                "total_paid",
                "principal",
                "ending_balance",
                "closed",
            ])?;
            for r in rows {
                wtr.write_record([
                    r.month.to_string(),
                    r.date.clone(),
                    r.debt.clone(),
                    r.starting_balance.clone(),
                    r.interest.clone(),
                    r.min_applied.clone(),
                    r.extra_applied.clone(),
                    r.total_paid.clone(),
                    r.principal.clone(),
                    r.ending_balance.clone(),
                    r.closed.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}
