// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::accrual::accrue_all;
use super::aggregate::{aggregate, closure_order, payoff_events};
use super::lump_sum::apply_lump_sum;
use super::normalize::normalize;
use super::strategy::{PayoffOrder, Strategy};
use super::waterfall::{allocate, snap_closed};
use super::{
    Debt, EngineLimits, HARD_MAX_MONTHS, MonthSnapshot, PaymentRecord, PlanInput, PlanResult,
    PlanStatus, default_start_date, month_date, saturating_sum,
};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

pub fn compute_debt_plan(input: &PlanInput) -> PlanResult {
    compute_debt_plan_with(input, &EngineLimits::default())
}

/// Simulate `input` month by month until every balance is closed or the
/// month cap is reached. Never fails: malformed values are normalized and an
/// empty debt set yields a plan with no months.
pub fn compute_debt_plan_with(input: &PlanInput, limits: &EngineLimits) -> PlanResult {
    let settings = &input.settings;
    let normalized = normalize(&input.debts);
    let epsilon = limits.closure_epsilon;
    let cap = month_cap(settings.max_months, limits.max_months);
    let start = settings.start_date.unwrap_or_else(default_start_date);
    let strategy = settings.strategy;
    let extra = settings.extra_monthly.max(Decimal::ZERO);

    let mut working = normalized.active.clone();
    snap_closed(&mut working, epsilon);
    // Minimums committed at plan start; a closed debt's share keeps paying
    // down the rest.
    let committed = saturating_sum(
        working
            .iter()
            .filter(|d| d.is_open())
            .map(|d| d.min_payment),
    );

    let one_time_applied = if settings.one_time_extra > Decimal::ZERO {
        let order = strategy.open_order(&working, epsilon);
        apply_lump_sum(&mut working, settings.one_time_extra, &order, epsilon).total
    } else {
        Decimal::ZERO
    };
    let pre_closed: Vec<bool> = working.iter().map(|d| !d.is_open()).collect();

    let mut months: Vec<MonthSnapshot> = Vec::new();
    let status = loop {
        if working.iter().all(|d| !d.is_open()) {
            break PlanStatus::Converged;
        }
        let month_index = months.len() as u32 + 1;
        if month_index > cap {
            break PlanStatus::Capped;
        }
        let step = MonthStep {
            month_index,
            date: month_date(start, month_index),
            strategy,
            committed,
            extra,
            one_off: settings.one_off_for(month_index),
            epsilon,
        };
        months.push(step.run(&mut working));
    };

    let totals = aggregate(&months, one_time_applied);
    let payoffs = payoff_events(&normalized.active, &months, &pre_closed, start);
    let debts = closure_order(&normalized.active, &payoffs, strategy);
    let payoffs = debts
        .iter()
        .filter_map(|d| payoffs.iter().find(|p| p.debt_id == d.id).cloned())
        .collect();

    match status {
        PlanStatus::Converged => debug!(
            "{} plan converged in {} months (interest {})",
            strategy, totals.months_to_debt_free, totals.interest
        ),
        PlanStatus::Capped => warn!(
            "{} plan hit the {}-month cap with {} still owing",
            strategy,
            cap,
            saturating_sum(working.iter().map(|d| d.balance))
        ),
    }

    PlanResult {
        strategy,
        status,
        start_date: start,
        debts,
        excluded: normalized.excluded,
        payoffs,
        months,
        totals,
    }
}

fn month_cap(requested: Option<u32>, default_cap: u32) -> u32 {
    let cap = requested.unwrap_or(default_cap);
    if cap > HARD_MAX_MONTHS {
        warn!("month cap {} exceeds {}, clamping", cap, HARD_MAX_MONTHS);
        return HARD_MAX_MONTHS;
    }
    cap
}

struct MonthStep {
    month_index: u32,
    date: NaiveDate,
    strategy: Strategy,
    committed: Decimal,
    extra: Decimal,
    one_off: Decimal,
    epsilon: Decimal,
}

impl MonthStep {
    /// Interest first, then the waterfall over the debts open at month start.
    fn run(&self, working: &mut [Debt]) -> MonthSnapshot {
        let open: Vec<usize> = (0..working.len())
            .filter(|&i| working[i].is_open())
            .collect();
        let starting: Vec<Decimal> = working.iter().map(|d| d.balance).collect();

        let interest = accrue_all(working);
        let open_minimums = saturating_sum(open.iter().map(|&i| working[i].min_payment));
        let budget = open_minimums.saturating_add(self.extra);
        let rolled_over = (self.committed - open_minimums).max(Decimal::ZERO);
        let order = self.strategy.open_order(working, self.epsilon);
        let alloc = allocate(
            working,
            budget.saturating_add(rolled_over).saturating_add(self.one_off),
            &order,
            self.epsilon,
        );

        let payments: Vec<PaymentRecord> = open
            .iter()
            .map(|&i| {
                let paid = alloc.total_for(i);
                PaymentRecord {
                    debt_id: working[i].id.clone(),
                    starting_balance: starting[i],
                    interest_accrued: interest[i],
                    min_applied: alloc.min_applied[i],
                    extra_applied: alloc.extra_applied[i],
                    total_paid: paid,
                    principal: paid - interest[i],
                    ending_balance: working[i].balance,
                    closed_this_month: !working[i].is_open(),
                }
            })
            .collect();

        MonthSnapshot {
            month_index: self.month_index,
            date: self.date,
            budget,
            rolled_over,
            one_off: self.one_off,
            total_principal: saturating_sum(payments.iter().map(|p| p.principal)),
            total_interest: saturating_sum(payments.iter().map(|p| p.interest_accrued)),
            total_outflow: saturating_sum(payments.iter().map(|p| p.total_paid)),
            remaining_balance: saturating_sum(working.iter().map(|d| d.balance)),
            payments,
        }
    }
}
