// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    KEY_EXTRA_MONTHLY, KEY_MAX_MONTHS, KEY_ONE_TIME_EXTRA, KEY_START_MONTH, KEY_STRATEGY,
    fmt_money, load_plan_settings, maybe_print_json, parse_amount, parse_month, pretty_table,
    set_setting,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut changed = Vec::new();
    if let Some(s) = sub.get_one::<String>("strategy") {
        set_setting(conn, KEY_STRATEGY, s)?;
        changed.push(format!("strategy={}", s));
    }
    if let Some(raw) = sub.get_one::<String>("extra") {
        let v = parse_amount(raw.trim())?;
        set_setting(conn, KEY_EXTRA_MONTHLY, &v.to_string())?;
        changed.push(format!("extra={}", v));
    }
    if let Some(raw) = sub.get_one::<String>("one_time") {
        let v = parse_amount(raw.trim())?;
        set_setting(conn, KEY_ONE_TIME_EXTRA, &v.to_string())?;
        changed.push(format!("one-time={}", v));
    }
    if let Some(raw) = sub.get_one::<String>("start") {
        let month = parse_month(raw.trim())?;
        set_setting(conn, KEY_START_MONTH, &month)?;
        changed.push(format!("start={}", month));
    }
    if let Some(n) = sub.get_one::<u32>("max_months") {
        set_setting(conn, KEY_MAX_MONTHS, &n.to_string())?;
        changed.push(format!("max-months={}", n));
    }
    if changed.is_empty() {
        println!("No settings changed");
    } else {
        println!("Settings updated: {}", changed.join(", "));
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = load_plan_settings(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Strategy".into(), settings.strategy.to_string()],
        vec!["Extra monthly".into(), fmt_money(&settings.extra_monthly)],
        vec!["One-time extra".into(), fmt_money(&settings.one_time_extra)],
        vec![
            "Start month".into(),
            settings
                .start_date
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default(),
        ],
        vec![
            "Max months".into(),
            settings
                .max_months
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("{} (default)", crate::engine::DEFAULT_MAX_MONTHS)),
        ],
        vec![
            "One-off payments".into(),
            settings.one_off_payments.len().to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
