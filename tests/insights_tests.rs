// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use debtclip::engine::advice::{Severity, advise};
use debtclip::engine::series::{balance_series, calendar, debt_shares};
use debtclip::engine::{
    DebtInput, EngineError, PlanInput, PlanSettings, Strategy, compute_debt_plan,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn debts() -> Vec<DebtInput> {
    vec![
        DebtInput::new("a", "A", dec!(500), dec!(0), dec!(25)),
        DebtInput::new("b", "B", dec!(2000), dec!(20), dec!(60)),
        DebtInput::new("c", "C", dec!(1000), dec!(10), dec!(40)),
    ]
}

fn settings() -> PlanSettings {
    PlanSettings::new(Strategy::Snowball)
        .with_start(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        .with_extra(dec!(100))
}

#[test]
fn balance_series_runs_from_opening_to_zero() {
    let plan = compute_debt_plan(&PlanInput::new(debts(), settings().with_one_time(dec!(250))));
    let series = balance_series(&plan);
    assert_eq!(series.len(), plan.months.len() + 1);
    assert_eq!(series[0].month_index, 0);
    assert_eq!(series[0].remaining_balance, dec!(3250));
    let last = series.last().unwrap();
    assert!(last.remaining_balance.is_zero());
    assert_eq!(last.cumulative_interest, plan.totals.interest);
    assert!(
        series
            .windows(2)
            .all(|w| w[0].cumulative_interest <= w[1].cumulative_interest)
    );
}

#[test]
fn debt_shares_split_the_load() {
    let plan = compute_debt_plan(&PlanInput::new(debts(), settings()));
    let shares = debt_shares(&plan);
    assert_eq!(shares.len(), 3);
    let balance_total: Decimal = shares.iter().map(|s| s.balance_share).sum();
    let interest_total: Decimal = shares.iter().map(|s| s.interest_share).sum();
    assert!((balance_total - Decimal::ONE).abs() < dec!(0.000001));
    assert!((interest_total - Decimal::ONE).abs() < dec!(0.000001));
    let a = shares.iter().find(|s| s.debt_id == "a").unwrap();
    assert!(a.interest.is_zero());
    assert_eq!(a.principal, dec!(500));
}

#[test]
fn calendar_lists_paid_debts_per_month() {
    let plan = compute_debt_plan(&PlanInput::new(debts(), settings()));
    let cal = calendar(&plan);
    assert_eq!(cal.len(), plan.months.len());
    assert_eq!(cal[0].payments.len(), 3);
    assert_eq!(cal[0].total, dec!(225));
    assert_eq!(cal[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let closing: Vec<_> = cal
        .iter()
        .flat_map(|e| e.payments.iter())
        .filter(|p| p.closes)
        .map(|p| p.debt_id.as_str())
        .collect();
    assert_eq!(closing, vec!["a", "c", "b"]);
}

#[test]
fn advice_flags_costly_debt_and_savings() {
    let input = PlanInput::new(debts(), settings());
    let plan = compute_debt_plan(&input);
    let items = advise(&plan, &input.debts, &input.settings).unwrap();
    let codes: Vec<&str> = items.iter().map(|a| a.code).collect();
    assert!(codes.contains(&"high_apr_later"));
    assert!(codes.contains(&"avalanche_saves"));
    assert!(codes.contains(&"extra_savings"));
    assert!(!codes.contains(&"plan_capped"));
    let costly = items.iter().find(|a| a.code == "high_apr_later").unwrap();
    assert_eq!(costly.debt_id.as_deref(), Some("b"));
}

#[test]
fn advice_puts_capped_plans_first() {
    let input = PlanInput::new(
        vec![DebtInput::new("card", "Card", dec!(1000), dec!(24), dec!(10))],
        PlanSettings::new(Strategy::Avalanche)
            .with_start(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .with_max_months(36),
    );
    let plan = compute_debt_plan(&input);
    let items = advise(&plan, &input.debts, &input.settings).unwrap();
    assert_eq!(items[0].code, "plan_capped");
    assert_eq!(items[0].severity, Severity::Critical);
    assert!(items.iter().any(|a| a.code == "negative_amortization"));
    assert!(items.windows(2).all(|w| w[0].severity >= w[1].severity));
}

#[test]
fn advice_reports_scaled_apr() {
    let input = PlanInput::new(
        vec![DebtInput::new("loan", "Loan", dec!(800), dec!(1250), dec!(100))],
        settings(),
    );
    let plan = compute_debt_plan(&input);
    let items = advise(&plan, &input.debts, &input.settings).unwrap();
    assert!(items.iter().any(|a| a.code == "apr_corrected"));
}

#[test]
fn advice_needs_an_active_debt() {
    let input = PlanInput::new(vec![], settings());
    let plan = compute_debt_plan(&input);
    assert_eq!(
        advise(&plan, &input.debts, &input.settings).unwrap_err(),
        EngineError::NoActiveDebts
    );
}
