// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Log of payments actually made, kept apart from the projection engine.
//! Calendar views read it to compare logged actuals with scheduled amounts.

use crate::models::PaymentEntry;
use crate::utils::parse_date;
use anyhow::{Context, Result, anyhow};
use chrono::{Months, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub date: NaiveDate,
    pub debt_id: i64,
    pub debt_name: String,
    pub amount: Decimal,
    pub note: Option<String>,
}

pub trait PaymentLog {
    fn record(&mut self, payment: NewPayment) -> Result<i64>;

    /// Entries dated in `[from, to)`, oldest first.
    fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<PaymentEntry>>;

    fn all(&self) -> Result<Vec<PaymentEntry>>;

    /// Entries in the calendar month containing `month_start`.
    fn entries_for_month(&self, month_start: NaiveDate) -> Result<Vec<PaymentEntry>> {
        let next = month_start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| anyhow!("Month after {} is out of range", month_start))?;
        self.entries_between(month_start, next)
    }

    fn total_for_month(&self, month_start: NaiveDate) -> Result<Decimal> {
        Ok(self
            .entries_for_month(month_start)?
            .iter()
            .map(|e| e.amount)
            .sum())
    }
}

pub struct SqlitePaymentLog<'c> {
    conn: &'c Connection,
}

impl<'c> SqlitePaymentLog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<PaymentEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, date_s, debt_id, debt_name, amount_s, note) = row?;
            let date = parse_date(&date_s)?;
            let amount = amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid logged amount '{}' on {}", amount_s, date_s))?;
            out.push(PaymentEntry {
                id,
                date,
                debt_id,
                debt_name,
                amount,
                note,
            });
        }
        Ok(out)
    }
}

const SELECT_ENTRIES: &str = "SELECT p.id, p.date, p.debt_id, d.name, p.amount, p.note
     FROM payment_log p JOIN debts d ON p.debt_id=d.id";

impl PaymentLog for SqlitePaymentLog<'_> {
    fn record(&mut self, payment: NewPayment) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO payment_log(date, debt_id, amount, note) VALUES (?1, ?2, ?3, ?4)",
            params![
                payment.date.to_string(),
                payment.debt_id,
                payment.amount.to_string(),
                payment.note
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<PaymentEntry>> {
        let sql = format!(
            "{} WHERE p.date>=?1 AND p.date<?2 ORDER BY p.date, p.id",
            SELECT_ENTRIES
        );
        self.query(&sql, &[&from.to_string(), &to.to_string()])
    }

    fn all(&self) -> Result<Vec<PaymentEntry>> {
        let sql = format!("{} ORDER BY p.date, p.id", SELECT_ENTRIES);
        self.query(&sql, &[])
    }
}

/// In-process log for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryPaymentLog {
    entries: Vec<PaymentEntry>,
}

impl MemoryPaymentLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentLog for MemoryPaymentLog {
    fn record(&mut self, payment: NewPayment) -> Result<i64> {
        let id = self.entries.len() as i64 + 1;
        self.entries.push(PaymentEntry {
            id,
            date: payment.date,
            debt_id: payment.debt_id,
            debt_name: payment.debt_name,
            amount: payment.amount,
            note: payment.note,
        });
        Ok(id)
    }

    fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<PaymentEntry>> {
        let mut out: Vec<PaymentEntry> = self
            .entries
            .iter()
            .filter(|e| e.date >= from && e.date < to)
            .cloned()
            .collect();
        out.sort_by_key(|e| (e.date, e.id));
        Ok(out)
    }

    fn all(&self) -> Result<Vec<PaymentEntry>> {
        let mut out = self.entries.clone();
        out.sort_by_key(|e| (e.date, e.id));
        Ok(out)
    }
}
