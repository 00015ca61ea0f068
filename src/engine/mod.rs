// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debt payoff projection engine.
//!
//! Every entry point is a pure function over caller-owned values: inputs are
//! cloned into private working copies, simulated month by month, and reduced
//! into a fresh [`PlanResult`]. Nothing here touches storage or the clock
//! except [`default_start_date`], which callers can bypass by pinning
//! `PlanSettings::start_date`.

pub mod accrual;
pub mod advice;
pub mod aggregate;
pub mod compare;
pub mod error;
pub mod lump_sum;
pub mod normalize;
pub mod projection;
pub mod series;
pub mod strategy;
pub mod waterfall;

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use compare::{Comparison, compare, compare_minimum_only, compare_strategies};
pub use error::{EngineError, Result};
pub use normalize::{NormalizedDebts, normalize};
pub use projection::{compute_debt_plan, compute_debt_plan_with};
pub use strategy::{PayoffOrder, Strategy};

/// Balances at or below this amount count as paid off and are snapped to zero.
pub const CLOSURE_EPSILON: Decimal = dec!(0.01);
/// Safety bound on simulated months (50 years).
pub const DEFAULT_MAX_MONTHS: u32 = 600;
/// Upper bound on any caller-supplied month cap.
pub const HARD_MAX_MONTHS: u32 = 1200;

/// Tunable constants of a projection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLimits {
    pub closure_epsilon: Decimal,
    pub max_months: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            closure_epsilon: CLOSURE_EPSILON,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// A debt record as it arrives from storage, an import file or a form.
///
/// Values are not trusted: negative amounts and APRs stored as
/// whole-number-times-100 are corrected by [`normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub apr: Decimal,
    #[serde(default)]
    pub min_payment: Decimal,
    #[serde(default = "default_included")]
    pub included: bool,
}

fn default_included() -> bool {
    true
}

impl DebtInput {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: Decimal,
        apr: Decimal,
        min_payment: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            apr,
            min_payment,
            included: true,
        }
    }

    pub fn excluded(mut self) -> Self {
        self.included = false;
        self
    }
}

/// Normalized simulation unit. `balance`, `apr` and `min_payment` are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
    pub apr: Decimal,
    pub min_payment: Decimal,
    pub included: bool,
}

impl Debt {
    pub fn is_open(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Interest the current balance would accrue over one month.
    pub fn monthly_interest(&self) -> Decimal {
        accrual::monthly_interest(self.balance, self.apr)
    }

    /// True when the minimum payment strictly exceeds the interest it has to cover.
    pub fn is_amortizing(&self) -> bool {
        !self.is_open() || self.min_payment > self.monthly_interest()
    }
}

/// Ad-hoc calendar payment, added to the surplus cascade of one month only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOffPayment {
    pub month_index: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    pub strategy: Strategy,
    #[serde(default)]
    pub extra_monthly: Decimal,
    #[serde(default)]
    pub one_time_extra: Decimal,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_months: Option<u32>,
    #[serde(default)]
    pub one_off_payments: Vec<OneOffPayment>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Snowball,
            extra_monthly: Decimal::ZERO,
            one_time_extra: Decimal::ZERO,
            start_date: None,
            max_months: None,
            one_off_payments: Vec::new(),
        }
    }
}

impl PlanSettings {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, extra_monthly: Decimal) -> Self {
        self.extra_monthly = extra_monthly;
        self
    }

    pub fn with_one_time(mut self, one_time_extra: Decimal) -> Self {
        self.one_time_extra = one_time_extra;
        self
    }

    pub fn with_start(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = Some(max_months);
        self
    }

    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }

    /// Same plan paying only the minimums: no extra, no lump sums.
    pub fn minimum_only(&self) -> Self {
        Self {
            extra_monthly: Decimal::ZERO,
            one_time_extra: Decimal::ZERO,
            one_off_payments: Vec::new(),
            ..self.clone()
        }
    }

    /// Projection clamps these instead of failing; comparisons refuse them.
    pub fn validate(&self) -> Result<()> {
        if self.extra_monthly < Decimal::ZERO {
            return Err(EngineError::InvalidSettings(format!(
                "extra monthly payment {} is negative",
                self.extra_monthly
            )));
        }
        if self.one_time_extra < Decimal::ZERO {
            return Err(EngineError::InvalidSettings(format!(
                "one-time extra {} is negative",
                self.one_time_extra
            )));
        }
        if let Some(p) = self.one_off_payments.iter().find(|p| p.amount < Decimal::ZERO) {
            return Err(EngineError::InvalidSettings(format!(
                "one-off payment {} in month {} is negative",
                p.amount, p.month_index
            )));
        }
        match self.max_months {
            Some(0) => {
                return Err(EngineError::InvalidSettings(
                    "month cap must be at least 1".into(),
                ));
            }
            Some(n) if n > HARD_MAX_MONTHS => {
                return Err(EngineError::InvalidSettings(format!(
                    "month cap {} exceeds the {}-month ceiling",
                    n, HARD_MAX_MONTHS
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Total ad-hoc amount scheduled for `month_index`.
    pub fn one_off_for(&self, month_index: u32) -> Decimal {
        saturating_sum(
            self.one_off_payments
                .iter()
                .filter(|p| p.month_index == month_index)
                .map(|p| p.amount.max(Decimal::ZERO)),
        )
    }
}

/// Input of a single projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    pub debts: Vec<DebtInput>,
    #[serde(flatten)]
    pub settings: PlanSettings,
}

impl PlanInput {
    pub fn new(debts: Vec<DebtInput>, settings: PlanSettings) -> Self {
        Self { debts, settings }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub debt_id: String,
    pub starting_balance: Decimal,
    pub interest_accrued: Decimal,
    pub min_applied: Decimal,
    pub extra_applied: Decimal,
    pub total_paid: Decimal,
    pub principal: Decimal,
    pub ending_balance: Decimal,
    pub closed_this_month: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub month_index: u32,
    pub date: NaiveDate,
    pub payments: Vec<PaymentRecord>,
    /// Nominal monthly budget: open minimums plus the recurring extra.
    pub budget: Decimal,
    /// Minimums of debts closed earlier, added to the surplus cascade.
    pub rolled_over: Decimal,
    /// Ad-hoc calendar amount injected into this month's cascade.
    pub one_off: Decimal,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
    pub total_outflow: Decimal,
    pub remaining_balance: Decimal,
}

impl MonthSnapshot {
    pub fn payment_for(&self, debt_id: &str) -> Option<&PaymentRecord> {
        self.payments.iter().find(|p| p.debt_id == debt_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Every balance reached zero.
    Converged,
    /// The month cap was hit with balances still open.
    Capped,
}

/// When a debt closed. `month == Some(0)` means it was closed before month 1,
/// either because it started at zero or the one-time extra paid it off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt_id: String,
    pub name: String,
    pub month: Option<u32>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTotals {
    pub interest: Decimal,
    pub principal: Decimal,
    pub outflow_monthly: Decimal,
    pub months_to_debt_free: u32,
    pub one_time_applied: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub strategy: Strategy,
    pub status: PlanStatus,
    pub start_date: NaiveDate,
    /// Simulated debts in closure order, as normalized before month 1.
    pub debts: Vec<Debt>,
    /// Debts left out of the simulation, reported as context only.
    pub excluded: Vec<Debt>,
    pub payoffs: Vec<DebtPayoff>,
    pub months: Vec<MonthSnapshot>,
    pub totals: PlanTotals,
}

impl PlanResult {
    pub fn is_capped(&self) -> bool {
        self.status == PlanStatus::Capped
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn payoff_for(&self, debt_id: &str) -> Option<&DebtPayoff> {
        self.payoffs.iter().find(|p| p.debt_id == debt_id)
    }

    /// Date of the final payment, `None` when the plan never converges.
    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        if self.is_capped() {
            return None;
        }
        match self.months.last() {
            Some(m) => Some(m.date),
            None => Some(self.start_date),
        }
    }

    /// Copy with every monetary field rounded half-up to the cent.
    pub fn rounded(&self) -> PlanResult {
        let debt = |d: &Debt| Debt {
            balance: round_cents(d.balance),
            apr: d.apr,
            min_payment: round_cents(d.min_payment),
            ..d.clone()
        };
        PlanResult {
            strategy: self.strategy,
            status: self.status,
            start_date: self.start_date,
            debts: self.debts.iter().map(debt).collect(),
            excluded: self.excluded.iter().map(debt).collect(),
            payoffs: self.payoffs.clone(),
            months: self
                .months
                .iter()
                .map(|m| MonthSnapshot {
                    month_index: m.month_index,
                    date: m.date,
                    payments: m
                        .payments
                        .iter()
                        .map(|p| PaymentRecord {
                            debt_id: p.debt_id.clone(),
                            starting_balance: round_cents(p.starting_balance),
                            interest_accrued: round_cents(p.interest_accrued),
                            min_applied: round_cents(p.min_applied),
                            extra_applied: round_cents(p.extra_applied),
                            total_paid: round_cents(p.total_paid),
                            principal: round_cents(p.principal),
                            ending_balance: round_cents(p.ending_balance),
                            closed_this_month: p.closed_this_month,
                        })
                        .collect(),
                    budget: round_cents(m.budget),
                    rolled_over: round_cents(m.rolled_over),
                    one_off: round_cents(m.one_off),
                    total_principal: round_cents(m.total_principal),
                    total_interest: round_cents(m.total_interest),
                    total_outflow: round_cents(m.total_outflow),
                    remaining_balance: round_cents(m.remaining_balance),
                })
                .collect(),
            totals: PlanTotals {
                interest: round_cents(self.totals.interest),
                principal: round_cents(self.totals.principal),
                outflow_monthly: round_cents(self.totals.outflow_monthly),
                months_to_debt_free: self.totals.months_to_debt_free,
                one_time_applied: round_cents(self.totals.one_time_applied),
            },
        }
    }
}

/// Round half-up (away from zero) to two decimal places.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum that saturates instead of overflowing on runaway balances.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// First day of the current UTC month.
pub fn default_start_date() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.with_day(1).unwrap_or(today)
}

/// Calendar date of a 1-based month index; month 1 falls on `start`.
pub fn month_date(start: NaiveDate, month_index: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(month_index.saturating_sub(1)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_is_half_up() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(2.674)), dec!(2.67));
    }

    #[test]
    fn month_date_starts_on_start_month() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(month_date(start, 1), start);
        assert_eq!(
            month_date(start, 2),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(
            month_date(start, 13),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
    }

    #[test]
    fn minimum_only_drops_every_extra() {
        let s = PlanSettings::new(Strategy::Avalanche)
            .with_extra(dec!(100))
            .with_one_time(dec!(500));
        let m = s.minimum_only();
        assert_eq!(m.strategy, Strategy::Avalanche);
        assert!(m.extra_monthly.is_zero());
        assert!(m.one_time_extra.is_zero());
    }
}
