// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::compare::{compare_minimum_only, compare_strategies, require_active};
use super::error::Result;
use super::normalize::{CorrectionKind, normalize};
use super::strategy::Strategy;
use super::{DebtInput, EngineLimits, PlanResult, PlanSettings, round_cents};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// APR at or above which a debt is flagged as expensive.
pub const HIGH_APR: Decimal = dec!(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub severity: Severity,
    pub code: &'static str,
    pub debt_id: Option<String>,
    pub message: String,
}

impl Advice {
    fn new(severity: Severity, code: &'static str, message: String) -> Self {
        Self {
            severity,
            code,
            debt_id: None,
            message,
        }
    }

    fn for_debt(mut self, debt_id: &str) -> Self {
        self.debt_id = Some(debt_id.to_string());
        self
    }
}

/// Guidance for `plan`, most severe first. Reads the plan and the raw debts;
/// the only new runs are the scenario comparisons behind the savings notes.
pub fn advise(
    plan: &PlanResult,
    debts: &[DebtInput],
    settings: &PlanSettings,
) -> Result<Vec<Advice>> {
    require_active(debts, &EngineLimits::default())?;
    let normalized = normalize(debts);
    let mut out = Vec::new();

    if plan.is_capped() {
        out.push(Advice::new(
            Severity::Critical,
            "plan_capped",
            format!(
                "Plan does not pay off within {} months; raise payments above the monthly interest",
                plan.totals.months_to_debt_free
            ),
        ));
    }

    for d in normalized.active.iter().filter(|d| !d.is_amortizing()) {
        out.push(
            Advice::new(
                Severity::Warning,
                "negative_amortization",
                format!(
                    "{}: minimum payment {} does not cover monthly interest of {}",
                    d.name,
                    round_cents(d.min_payment),
                    round_cents(d.monthly_interest())
                ),
            )
            .for_debt(&d.id),
        );
    }

    for c in normalized
        .corrections
        .iter()
        .filter(|c| matches!(c.kind, CorrectionKind::ScaledApr | CorrectionKind::ClampedApr))
    {
        out.push(
            Advice::new(
                Severity::Info,
                "apr_corrected",
                format!(
                    "APR {} for '{}' looked mis-scaled; using {}%",
                    c.original, c.debt_id, c.corrected
                ),
            )
            .for_debt(&c.debt_id),
        );
    }

    if plan.strategy == Strategy::Snowball {
        let first = plan.debts.first().map(|d| d.id.as_str());
        if let Some(costly) = plan
            .debts
            .iter()
            .filter(|d| d.apr >= HIGH_APR)
            .max_by(|a, b| a.apr.cmp(&b.apr))
            .filter(|d| Some(d.id.as_str()) != first)
        {
            out.push(
                Advice::new(
                    Severity::Info,
                    "high_apr_later",
                    format!(
                        "{} charges {}% but is not paid off first under snowball",
                        costly.name, costly.apr
                    ),
                )
                .for_debt(&costly.id),
            );
        }
        let by_strategy = compare_strategies(debts, settings)?;
        if by_strategy.both_converged() && by_strategy.interest_saved() > Decimal::ZERO {
            out.push(Advice::new(
                Severity::Info,
                "avalanche_saves",
                format!(
                    "Avalanche would save {} in interest",
                    round_cents(by_strategy.interest_saved())
                ),
            ));
        }
    }

    if !plan.excluded.is_empty() {
        out.push(Advice::new(
            Severity::Info,
            "excluded_debts",
            format!(
                "{} debt(s) are excluded from the plan and are not being paid down",
                plan.excluded.len()
            ),
        ));
    }

    let pays_extra = settings.extra_monthly > Decimal::ZERO
        || settings.one_time_extra > Decimal::ZERO
        || !settings.one_off_payments.is_empty();
    if pays_extra {
        let vs_min = compare_minimum_only(debts, settings)?;
        if vs_min.a.is_capped() && !vs_min.b.is_capped() {
            out.push(Advice::new(
                Severity::Info,
                "extra_required",
                format!(
                    "Minimum payments alone never finish; extra payments clear everything in {} months",
                    vs_min.b.totals.months_to_debt_free
                ),
            ));
        } else if vs_min.both_converged() && vs_min.interest_saved() > Decimal::ZERO {
            out.push(Advice::new(
                Severity::Info,
                "extra_savings",
                format!(
                    "Extra payments save {} in interest and {} months",
                    round_cents(vs_min.interest_saved()),
                    vs_min.months_saved()
                ),
            ));
        }
    }

    out.sort_by(|a, b| b.severity.cmp(&a.severity));
    Ok(out)
}
