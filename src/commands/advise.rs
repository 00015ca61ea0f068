// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::plan::build_input;
use crate::engine::advice::{Severity, advise};
use crate::engine::compute_debt_plan;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let input = build_input(conn, m)?;
    let plan = compute_debt_plan(&input);
    let items = advise(&plan, &input.debts, &input.settings)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("✅ advise: plan looks good");
        return Ok(());
    }
    let rows = items
        .into_iter()
        .map(|a| {
            let level = match a.severity {
                Severity::Critical => "CRITICAL",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            vec![level.to_string(), a.code.to_string(), a.message]
        })
        .collect();
    println!("{}", pretty_table(&["Level", "Code", "Advice"], rows));
    Ok(())
}
