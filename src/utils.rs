// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::normalize::coerce_amount;
use crate::engine::{
    DebtInput, OneOffPayment, PlanSettings, Strategy, default_start_date, round_cents,
};
use crate::models::{DebtRow, OneOff};
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const KEY_STRATEGY: &str = "strategy";
pub const KEY_EXTRA_MONTHLY: &str = "extra_monthly";
pub const KEY_ONE_TIME_EXTRA: &str = "one_time_extra";
pub const KEY_START_MONTH: &str = "start_month";
pub const KEY_MAX_MONTHS: &str = "max_months";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    month_start(s)?;
    Ok(s.to_string())
}

/// First day of a YYYY-MM month.
pub fn month_start(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Like [`parse_decimal`] but rejects negative values.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        return Err(anyhow!("Amount '{}' must not be negative", s));
    }
    Ok(d)
}

pub fn parse_strategy(s: &str) -> Result<Strategy> {
    Ok(s.parse::<Strategy>()?)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", round_cents(*d))
}

pub fn fmt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "never".to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_debt(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM debts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Debt '{}' not found", name))?;
    Ok(id)
}

/// Stored debts in insertion order. Values that fail to parse are coerced to
/// zero rather than rejected; the engine normalizes the rest.
pub fn load_debts(conn: &Connection) -> Result<Vec<DebtRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, balance, apr, min_payment, included FROM debts ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, i64>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, balance, apr, min_payment, included) = row?;
        out.push(DebtRow {
            id,
            name,
            balance: coerce_amount(&balance),
            apr: coerce_amount(&apr),
            min_payment: coerce_amount(&min_payment),
            included: included != 0,
        });
    }
    Ok(out)
}

pub fn load_debt_inputs(conn: &Connection) -> Result<Vec<DebtInput>> {
    Ok(load_debts(conn)?.iter().map(DebtRow::to_input).collect())
}

pub fn load_one_offs(conn: &Connection) -> Result<Vec<OneOff>> {
    let mut stmt =
        conn.prepare("SELECT id, month, amount, note FROM one_off_payments ORDER BY month, id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, month, amount_s, note) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid one-off amount '{}' for {}", amount_s, month))?;
        out.push(OneOff {
            id,
            month,
            amount,
            note,
        });
    }
    Ok(out)
}

// Plan settings
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// 1-based plan month of calendar month `month` (YYYY-MM), or `None` when it
/// falls before the plan starts.
pub fn month_index_for(start: NaiveDate, month: &str) -> Result<Option<u32>> {
    let m = month_start(month)?;
    let diff = (m.year() - start.year()) * 12 + m.month() as i32 - start.month() as i32;
    Ok(u32::try_from(diff).ok().map(|d| d + 1))
}

/// Stored one-off payments placed on plan months relative to `start`.
pub fn one_off_payments_from(conn: &Connection, start: NaiveDate) -> Result<Vec<OneOffPayment>> {
    let mut out = Vec::new();
    for o in load_one_offs(conn)? {
        match month_index_for(start, &o.month)? {
            Some(month_index) => out.push(OneOffPayment {
                month_index,
                amount: o.amount,
            }),
            None => debug!("one-off {} in {} predates the plan, skipped", o.id, o.month),
        }
    }
    Ok(out)
}

/// Assemble persisted settings, pinning the start month so one-off payments
/// can be placed on plan months.
pub fn load_plan_settings(conn: &Connection) -> Result<PlanSettings> {
    let strategy = match get_setting(conn, KEY_STRATEGY)? {
        Some(s) => parse_strategy(&s).context("Invalid stored strategy")?,
        None => Strategy::Snowball,
    };
    let extra_monthly = get_setting(conn, KEY_EXTRA_MONTHLY)?
        .map(|s| coerce_amount(&s))
        .unwrap_or(Decimal::ZERO);
    let one_time_extra = get_setting(conn, KEY_ONE_TIME_EXTRA)?
        .map(|s| coerce_amount(&s))
        .unwrap_or(Decimal::ZERO);
    let start_date = match get_setting(conn, KEY_START_MONTH)? {
        Some(m) => month_start(&m).context("Invalid stored start month")?,
        None => default_start_date(),
    };
    let max_months = match get_setting(conn, KEY_MAX_MONTHS)? {
        Some(s) => Some(
            s.trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid stored max months '{}'", s))?,
        ),
        None => None,
    };

    let one_off_payments = one_off_payments_from(conn, start_date)?;

    Ok(PlanSettings {
        strategy,
        extra_monthly,
        one_time_extra,
        start_date: Some(start_date),
        max_months,
        one_off_payments,
    })
}
