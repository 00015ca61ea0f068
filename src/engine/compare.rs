// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::error::{EngineError, Result};
use super::normalize::normalize;
use super::projection::compute_debt_plan_with;
use super::strategy::Strategy;
use super::{
    DebtInput, EngineLimits, PlanInput, PlanResult, PlanSettings, default_start_date, round_cents,
};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

/// Two independent runs over the same debts. Deltas are `b - a`, so a
/// negative `delta_interest` means plan `b` pays less interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub a: PlanResult,
    pub b: PlanResult,
    pub delta_months: i64,
    pub delta_interest: Decimal,
}

impl Comparison {
    fn between(a: PlanResult, b: PlanResult) -> Self {
        let delta_months =
            i64::from(b.totals.months_to_debt_free) - i64::from(a.totals.months_to_debt_free);
        let delta_interest = b.totals.interest - a.totals.interest;
        Self {
            a,
            b,
            delta_months,
            delta_interest,
        }
    }

    /// Months `b` finishes ahead of `a`.
    pub fn months_saved(&self) -> i64 {
        -self.delta_months
    }

    /// Interest `b` avoids relative to `a`.
    pub fn interest_saved(&self) -> Decimal {
        -self.delta_interest
    }

    /// Both plans and the interest delta rounded to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            a: self.a.rounded(),
            b: self.b.rounded(),
            delta_months: self.delta_months,
            delta_interest: round_cents(self.delta_interest),
        }
    }

    /// Deltas only mean "time to debt free" when both runs converged.
    pub fn both_converged(&self) -> bool {
        !self.a.is_capped() && !self.b.is_capped()
    }
}

/// Fails with [`EngineError::NoActiveDebts`] unless some included debt has
/// a balance above the closure epsilon.
pub fn require_active(debts: &[DebtInput], limits: &EngineLimits) -> Result<()> {
    if normalize(debts).has_open_debt(limits.closure_epsilon) {
        Ok(())
    } else {
        Err(EngineError::NoActiveDebts)
    }
}

pub fn compare(debts: &[DebtInput], a: &PlanSettings, b: &PlanSettings) -> Result<Comparison> {
    compare_with(debts, a, b, &EngineLimits::default())
}

pub fn compare_with(
    debts: &[DebtInput],
    a: &PlanSettings,
    b: &PlanSettings,
    limits: &EngineLimits,
) -> Result<Comparison> {
    require_active(debts, limits)?;
    a.validate()?;
    b.validate()?;
    let today = default_start_date();
    let pinned = |s: &PlanSettings| PlanSettings {
        start_date: s.start_date.or(Some(today)),
        ..s.clone()
    };
    // Each run normalizes its own copy of the debts.
    let plan_a = compute_debt_plan_with(&PlanInput::new(debts.to_vec(), pinned(a)), limits);
    let plan_b = compute_debt_plan_with(&PlanInput::new(debts.to_vec(), pinned(b)), limits);
    let cmp = Comparison::between(plan_a, plan_b);
    debug!(
        "compare {} vs {}: delta months {}, delta interest {}",
        a.strategy, b.strategy, cmp.delta_months, cmp.delta_interest
    );
    Ok(cmp)
}

/// `a` pays minimums only, `b` is the configured plan.
pub fn compare_minimum_only(debts: &[DebtInput], settings: &PlanSettings) -> Result<Comparison> {
    compare(debts, &settings.minimum_only(), settings)
}

/// `a` is snowball, `b` is avalanche; every other setting is shared.
pub fn compare_strategies(debts: &[DebtInput], settings: &PlanSettings) -> Result<Comparison> {
    compare(
        debts,
        &settings.with_strategy(Strategy::Snowball),
        &settings.with_strategy(Strategy::Avalanche),
    )
}
