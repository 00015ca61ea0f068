// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::plan::build_input;
use crate::engine::{Comparison, PlanResult, compare_minimum_only, compare_strategies};
use crate::utils::{fmt_date, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn months_cell(plan: &PlanResult) -> String {
    if plan.is_capped() {
        format!("{}+ (capped)", plan.months.len())
    } else {
        plan.totals.months_to_debt_free.to_string()
    }
}

pub fn comparison_rows(cmp: &Comparison) -> Vec<Vec<String>> {
    vec![
        vec![
            "Months to debt free".into(),
            months_cell(&cmp.a),
            months_cell(&cmp.b),
            cmp.delta_months.to_string(),
        ],
        vec![
            "Total interest".into(),
            fmt_money(&cmp.a.totals.interest),
            fmt_money(&cmp.b.totals.interest),
            fmt_money(&cmp.delta_interest),
        ],
        vec![
            "Monthly outflow".into(),
            fmt_money(&cmp.a.totals.outflow_monthly),
            fmt_money(&cmp.b.totals.outflow_monthly),
            fmt_money(&(cmp.b.totals.outflow_monthly - cmp.a.totals.outflow_monthly)),
        ],
        vec![
            "Debt free".into(),
            fmt_date(cmp.a.debt_free_date()),
            fmt_date(cmp.b.debt_free_date()),
            String::new(),
        ],
    ]
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let input = build_input(conn, m)?;
    let against = m
        .get_one::<String>("against")
        .map(|s| s.as_str())
        .unwrap_or("strategy");
    let (cmp, a_label, b_label) = match against {
        "minimum" => (
            compare_minimum_only(&input.debts, &input.settings)?,
            "Minimums only".to_string(),
            format!("{} + extra", input.settings.strategy),
        ),
        _ => (
            compare_strategies(&input.debts, &input.settings)?,
            "snowball".to_string(),
            "avalanche".to_string(),
        ),
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &cmp.rounded())? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Metric", a_label.as_str(), b_label.as_str(), "Delta (B - A)"],
            comparison_rows(&cmp)
        )
    );
    if !cmp.both_converged() {
        println!("Note: a capped plan never reaches debt free; month deltas are a lower bound.");
    } else if cmp.interest_saved() > Decimal::ZERO {
        println!(
            "{} saves {} in interest and {} months over {}",
            b_label,
            fmt_money(&cmp.interest_saved()),
            cmp.months_saved(),
            a_label
        );
    }
    Ok(())
}
