// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::strategy::{PayoffOrder, Strategy};
use super::{Debt, DebtPayoff, MonthSnapshot, PlanTotals, saturating_sum};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Reduce recorded months into plan totals. `months_to_debt_free` is the
/// number of simulated months, which equals the cap for a capped run.
/// `outflow_monthly` is the steady-state spend: nominal budget plus rolled
/// over minimums, constant across months.
pub fn aggregate(months: &[MonthSnapshot], one_time_applied: Decimal) -> PlanTotals {
    PlanTotals {
        interest: saturating_sum(months.iter().map(|m| m.total_interest)),
        principal: saturating_sum(months.iter().map(|m| m.total_principal)),
        outflow_monthly: months
            .first()
            .map(|m| m.budget.saturating_add(m.rolled_over))
            .unwrap_or(Decimal::ZERO),
        months_to_debt_free: months.len() as u32,
        one_time_applied,
    }
}

/// One payoff entry per debt, in input order. Debts flagged in `pre_closed`
/// closed before month 1; the rest close in the month whose record says so,
/// or never.
pub fn payoff_events(
    debts: &[Debt],
    months: &[MonthSnapshot],
    pre_closed: &[bool],
    start: NaiveDate,
) -> Vec<DebtPayoff> {
    debts
        .iter()
        .enumerate()
        .map(|(i, debt)| {
            let closed = if pre_closed.get(i).copied().unwrap_or(false) {
                Some((0, start))
            } else {
                months.iter().find_map(|m| {
                    m.payment_for(&debt.id)
                        .filter(|p| p.closed_this_month)
                        .map(|_| (m.month_index, m.date))
                })
            };
            DebtPayoff {
                debt_id: debt.id.clone(),
                name: debt.name.clone(),
                month: closed.map(|(month, _)| month),
                date: closed.map(|(_, date)| date),
            }
        })
        .collect()
}

/// Debts sorted by payoff month; same-month closures and debts that never
/// close fall back to the strategy comparator.
pub fn closure_order(debts: &[Debt], payoffs: &[DebtPayoff], strategy: Strategy) -> Vec<Debt> {
    let month_of = |d: &Debt| {
        payoffs
            .iter()
            .find(|p| p.debt_id == d.id)
            .and_then(|p| p.month)
            .unwrap_or(u32::MAX)
    };
    let mut ordered = debts.to_vec();
    ordered.sort_by(|a, b| {
        month_of(a)
            .cmp(&month_of(b))
            .then_with(|| strategy.compare(a, b))
    });
    ordered
}

/// Interest and principal paid toward one debt over the whole plan.
pub fn debt_totals(months: &[MonthSnapshot], debt_id: &str) -> (Decimal, Decimal) {
    months
        .iter()
        .filter_map(|m| m.payment_for(debt_id))
        .fold((Decimal::ZERO, Decimal::ZERO), |(i, p), rec| {
            (
                i.saturating_add(rec.interest_accrued),
                p.saturating_add(rec.principal),
            )
        })
}
