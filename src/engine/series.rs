// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only projections of a [`PlanResult`] for charts, calendars and
//! share cards. Nothing here simulates; every value is derived from the
//! recorded months and totals.

use super::aggregate::debt_totals;
use super::{PlanResult, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    pub month_index: u32,
    pub date: NaiveDate,
    pub remaining_balance: Decimal,
    pub cumulative_interest: Decimal,
    pub cumulative_principal: Decimal,
}

/// Remaining total balance over time. Point 0 is the balance after any
/// one-time extra, dated at the plan start.
pub fn balance_series(plan: &PlanResult) -> Vec<BalancePoint> {
    let opening = saturating_sum(plan.debts.iter().map(|d| d.balance)) - plan.totals.one_time_applied;
    let mut points = Vec::with_capacity(plan.months.len() + 1);
    points.push(BalancePoint {
        month_index: 0,
        date: plan.start_date,
        remaining_balance: opening.max(Decimal::ZERO),
        cumulative_interest: Decimal::ZERO,
        cumulative_principal: Decimal::ZERO,
    });
    let mut interest = Decimal::ZERO;
    let mut principal = Decimal::ZERO;
    for m in &plan.months {
        interest = interest.saturating_add(m.total_interest);
        principal = principal.saturating_add(m.total_principal);
        points.push(BalancePoint {
            month_index: m.month_index,
            date: m.date,
            remaining_balance: m.remaining_balance,
            cumulative_interest: interest,
            cumulative_principal: principal,
        });
    }
    points
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtShare {
    pub debt_id: String,
    pub name: String,
    pub original_balance: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Fraction of all plan interest charged by this debt, 0..=1.
    pub interest_share: Decimal,
    /// Fraction of the starting debt load, 0..=1.
    pub balance_share: Decimal,
}

pub fn debt_shares(plan: &PlanResult) -> Vec<DebtShare> {
    let total_balance = saturating_sum(plan.debts.iter().map(|d| d.balance));
    let total_interest = plan.totals.interest;
    let ratio = |part: Decimal, whole: Decimal| {
        if whole.is_zero() {
            Decimal::ZERO
        } else {
            part / whole
        }
    };
    plan.debts
        .iter()
        .map(|d| {
            let (interest, principal) = debt_totals(&plan.months, &d.id);
            DebtShare {
                debt_id: d.id.clone(),
                name: d.name.clone(),
                original_balance: d.balance,
                interest,
                principal,
                interest_share: ratio(interest, total_interest),
                balance_share: ratio(d.balance, total_balance),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledPayment {
    pub debt_id: String,
    pub name: String,
    pub amount: Decimal,
    pub closes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub month_index: u32,
    pub date: NaiveDate,
    pub payments: Vec<ScheduledPayment>,
    pub one_off: Decimal,
    pub total: Decimal,
}

/// Per-month list of scheduled payments, skipping debts paid nothing.
pub fn calendar(plan: &PlanResult) -> Vec<CalendarEntry> {
    let name_of = |id: &str| {
        plan.debts
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    plan.months
        .iter()
        .map(|m| CalendarEntry {
            month_index: m.month_index,
            date: m.date,
            payments: m
                .payments
                .iter()
                .filter(|p| !p.total_paid.is_zero())
                .map(|p| ScheduledPayment {
                    debt_id: p.debt_id.clone(),
                    name: name_of(&p.debt_id),
                    amount: p.total_paid,
                    closes: p.closed_this_month,
                })
                .collect(),
            one_off: m.one_off,
            total: m.total_outflow,
        })
        .collect()
}
