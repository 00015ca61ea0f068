// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::series::{balance_series, calendar, debt_shares};
use crate::engine::{PlanInput, PlanResult, PlanSettings, PlanStatus, compute_debt_plan};
use crate::ledger::{PaymentLog, SqlitePaymentLog};
use crate::utils::{
    fmt_date, fmt_money, load_debt_inputs, load_plan_settings, maybe_print_json, month_start,
    one_off_payments_from, parse_amount, parse_strategy, pretty_table,
};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("schedule", sub)) => schedule(conn, sub)?,
        Some(("calendar", sub)) => calendar_view(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Stored debts and settings with the command's overrides applied.
/// `sub` must carry the plan override args.
pub fn build_input(conn: &Connection, sub: &clap::ArgMatches) -> Result<PlanInput> {
    let debts = load_debt_inputs(conn)?;
    let mut settings = load_plan_settings(conn)?;
    apply_overrides(conn, &mut settings, sub)?;
    Ok(PlanInput::new(debts, settings))
}

pub fn apply_overrides(
    conn: &Connection,
    settings: &mut PlanSettings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    if let Some(s) = sub.get_one::<String>("strategy") {
        settings.strategy = parse_strategy(s)?;
    }
    if let Some(raw) = sub.get_one::<String>("extra") {
        settings.extra_monthly = parse_amount(raw.trim())?;
    }
    if let Some(raw) = sub.get_one::<String>("one_time") {
        settings.one_time_extra = parse_amount(raw.trim())?;
    }
    if let Some(raw) = sub.get_one::<String>("start") {
        let start = month_start(raw.trim())?;
        settings.start_date = Some(start);
        // One-offs are stored by calendar month; re-place them for the new start.
        settings.one_off_payments = one_off_payments_from(conn, start)?;
    }
    if let Some(n) = sub.get_one::<u32>("max_months") {
        settings.max_months = Some(*n);
    }
    Ok(())
}

fn status_line(plan: &PlanResult) -> String {
    match plan.status {
        PlanStatus::Converged => format!(
            "debt free in {} months ({})",
            plan.totals.months_to_debt_free,
            fmt_date(plan.debt_free_date())
        ),
        PlanStatus::Capped => format!(
            "NOT paid off after {} months; raise the extra payment",
            plan.months.len()
        ),
    }
}

/// One row per active debt, in the order they close.
pub fn summary_rows(plan: &PlanResult) -> Vec<Vec<String>> {
    plan.debts
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let payoff = plan.payoff_for(&d.id);
            vec![
                (i + 1).to_string(),
                d.name.clone(),
                fmt_money(&d.balance),
                format!("{}%", d.apr),
                fmt_money(&d.min_payment),
                payoff
                    .and_then(|p| p.month)
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".into()),
                fmt_date(payoff.and_then(|p| p.date)),
            ]
        })
        .collect()
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let plan = compute_debt_plan(&build_input(conn, sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plan.rounded())? {
        return Ok(());
    }
    if plan.is_empty() {
        println!("No active debts to plan. Add one with `debt add`.");
        return Ok(());
    }
    println!("Strategy: {} | {}", plan.strategy, status_line(&plan));
    println!(
        "{}",
        pretty_table(
            &["#", "Debt", "Balance", "APR", "Min", "Paid Off (month)", "Paid Off"],
            summary_rows(&plan)
        )
    );
    let t = &plan.totals;
    let totals = vec![
        vec!["Monthly outflow".into(), fmt_money(&t.outflow_monthly)],
        vec!["One-time applied".into(), fmt_money(&t.one_time_applied)],
        vec!["Total interest".into(), fmt_money(&t.interest)],
        vec!["Total principal".into(), fmt_money(&t.principal)],
        vec!["Months".into(), plan.months.len().to_string()],
    ];
    println!("{}", pretty_table(&["Total", "Value"], totals));
    if !plan.excluded.is_empty() {
        let rows = plan
            .excluded
            .iter()
            .map(|d| vec![d.name.clone(), fmt_money(&d.balance), format!("{}%", d.apr)])
            .collect();
        println!("Excluded from the plan:");
        println!("{}", pretty_table(&["Debt", "Balance", "APR"], rows));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub date: String,
    pub debt: String,
    pub starting_balance: String,
    pub interest: String,
    pub min_applied: String,
    pub extra_applied: String,
    pub total_paid: String,
    pub principal: String,
    pub ending_balance: String,
    pub closed: bool,
}

/// Flattened month x debt rows, optionally for one debt (by name) and the
/// first `limit` months.
pub fn schedule_rows(plan: &PlanResult, debt: Option<&str>, limit: Option<usize>) -> Vec<ScheduleRow> {
    let mut out = Vec::new();
    for month in plan.months.iter().take(limit.unwrap_or(usize::MAX)) {
        for p in &month.payments {
            let name = plan
                .debts
                .iter()
                .find(|d| d.id == p.debt_id)
                .map(|d| d.name.as_str())
                .unwrap_or(p.debt_id.as_str());
            if debt.is_some_and(|want| want != name) {
                continue;
            }
            out.push(ScheduleRow {
                month: month.month_index,
                date: month.date.format("%Y-%m").to_string(),
                debt: name.to_string(),
                starting_balance: fmt_money(&p.starting_balance),
                interest: fmt_money(&p.interest_accrued),
                min_applied: fmt_money(&p.min_applied),
                extra_applied: fmt_money(&p.extra_applied),
                total_paid: fmt_money(&p.total_paid),
                principal: fmt_money(&p.principal),
                ending_balance: fmt_money(&p.ending_balance),
                closed: p.closed_this_month,
            });
        }
    }
    out
}

fn schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let plan = compute_debt_plan(&build_input(conn, sub)?);
    let debt = sub.get_one::<String>("debt").map(|s| s.trim());
    let limit = sub.get_one::<usize>("limit").copied();
    let rows = schedule_rows(&plan, debt, limit);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let table_rows = rows
        .into_iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                r.date,
                r.debt,
                r.starting_balance,
                r.interest,
                r.min_applied,
                r.extra_applied,
                r.ending_balance,
                if r.closed { "paid off".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Date", "Debt", "Start", "Interest", "Min", "Extra", "End", ""],
            table_rows
        )
    );
    if plan.is_capped() {
        println!("Warning: {}", status_line(&plan));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarRow {
    pub month: u32,
    pub date: String,
    pub scheduled: String,
    pub one_off: String,
    pub logged: String,
    pub payments: String,
}

/// Scheduled totals per plan month next to what the payment log holds for
/// the same calendar month.
pub fn calendar_rows(
    plan: &PlanResult,
    log: &dyn PaymentLog,
    limit: Option<usize>,
) -> Result<Vec<CalendarRow>> {
    let mut out = Vec::new();
    for entry in calendar(plan).into_iter().take(limit.unwrap_or(usize::MAX)) {
        let first = entry.date.with_day(1).unwrap_or(entry.date);
        let logged = log.total_for_month(first)?;
        let payments = entry
            .payments
            .iter()
            .map(|p| {
                format!(
                    "{} {}{}",
                    p.name,
                    fmt_money(&p.amount),
                    if p.closes { " (paid off)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        out.push(CalendarRow {
            month: entry.month_index,
            date: entry.date.format("%Y-%m").to_string(),
            scheduled: fmt_money(&entry.total),
            one_off: fmt_money(&entry.one_off),
            logged: fmt_money(&logged),
            payments,
        });
    }
    Ok(out)
}

fn calendar_view(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let plan = compute_debt_plan(&build_input(conn, sub)?);
    let log = SqlitePaymentLog::new(conn);
    let rows = calendar_rows(&plan, &log, sub.get_one::<usize>("limit").copied())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let table_rows = rows
        .into_iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                r.date,
                r.scheduled,
                r.one_off,
                r.logged,
                r.payments,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Date", "Scheduled", "One-off", "Logged", "Payments"],
            table_rows
        )
    );
    Ok(())
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let plan = compute_debt_plan(&build_input(conn, sub)?);
    let series = balance_series(&plan);
    let shares = debt_shares(&plan);
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &json!({ "series": series, "shares": shares }),
    )? {
        return Ok(());
    }
    let rows = series
        .iter()
        .map(|p| {
            vec![
                p.month_index.to_string(),
                p.date.format("%Y-%m").to_string(),
                fmt_money(&p.remaining_balance),
                fmt_money(&p.cumulative_interest),
                fmt_money(&p.cumulative_principal),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Date", "Remaining", "Cum. Interest", "Cum. Principal"],
            rows
        )
    );
    let rows = shares
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                fmt_money(&s.original_balance),
                fmt_money(&s.interest),
                format!("{}%", fmt_money(&(s.balance_share * Decimal::ONE_HUNDRED))),
                format!("{}%", fmt_money(&(s.interest_share * Decimal::ONE_HUNDRED))),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Debt", "Balance", "Interest", "Balance Share", "Interest Share"],
            rows
        )
    );
    Ok(())
}
