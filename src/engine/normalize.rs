// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Debt, DebtInput, saturating_sum};
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Largest plausible APR, in percent.
pub const APR_CEILING: Decimal = dec!(100);
const APR_SCALE: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    NegativeBalance,
    NegativeApr,
    NegativeMinPayment,
    /// APR above 100 that was divided by 100.
    ScaledApr,
    /// APR still above 100 after unscaling; clamped.
    ClampedApr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    pub debt_id: String,
    pub kind: CorrectionKind,
    pub original: Decimal,
    pub corrected: Decimal,
}

/// Output of [`normalize`]: the simulated set, the reporting-only set, and
/// what had to be fixed to get there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedDebts {
    pub active: Vec<Debt>,
    pub excluded: Vec<Debt>,
    pub corrections: Vec<Correction>,
}

impl NormalizedDebts {
    /// True when at least one simulated debt still has something owing.
    pub fn has_open_debt(&self, epsilon: Decimal) -> bool {
        self.active.iter().any(|d| d.balance > epsilon)
    }

    pub fn total_balance(&self) -> Decimal {
        saturating_sum(self.active.iter().map(|d| d.balance))
    }
}

pub fn normalize(raw: &[DebtInput]) -> NormalizedDebts {
    let mut out = NormalizedDebts::default();
    for input in raw {
        let debt = normalize_one(input, &mut out.corrections);
        if debt.included {
            out.active.push(debt);
        } else {
            out.excluded.push(debt);
        }
    }
    out
}

fn normalize_one(input: &DebtInput, corrections: &mut Vec<Correction>) -> Debt {
    let mut note = |kind: CorrectionKind, original: Decimal, corrected: Decimal| {
        warn!(
            "debt '{}': {:?} corrected {} -> {}",
            input.id, kind, original, corrected
        );
        corrections.push(Correction {
            debt_id: input.id.clone(),
            kind,
            original,
            corrected,
        });
    };

    let balance = if input.balance < Decimal::ZERO {
        note(CorrectionKind::NegativeBalance, input.balance, Decimal::ZERO);
        Decimal::ZERO
    } else {
        input.balance
    };

    let min_payment = if input.min_payment < Decimal::ZERO {
        note(
            CorrectionKind::NegativeMinPayment,
            input.min_payment,
            Decimal::ZERO,
        );
        Decimal::ZERO
    } else {
        input.min_payment
    };

    let mut apr = input.apr;
    if apr < Decimal::ZERO {
        note(CorrectionKind::NegativeApr, apr, Decimal::ZERO);
        apr = Decimal::ZERO;
    }
    if apr > APR_CEILING {
        let scaled = apr / APR_SCALE;
        note(CorrectionKind::ScaledApr, apr, scaled);
        apr = scaled;
    }
    if apr > APR_CEILING {
        note(CorrectionKind::ClampedApr, apr, APR_CEILING);
        apr = APR_CEILING;
    }

    Debt {
        id: input.id.clone(),
        name: input.name.clone(),
        balance,
        apr,
        min_payment,
        included: input.included,
    }
}

/// Parse a form or file value, tolerating currency symbols, thousands
/// separators and percent signs. Anything else becomes zero.
pub fn coerce_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' ' | '_'))
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            warn!("could not parse amount '{}', using 0", raw);
            Decimal::ZERO
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_amount_accepts_formatted_values() {
        assert_eq!(coerce_amount(" $1,250.50 "), dec!(1250.50));
        assert_eq!(coerce_amount("19.99%"), dec!(19.99));
        assert_eq!(coerce_amount("1e3"), dec!(1000));
    }

    #[test]
    fn coerce_amount_defaults_to_zero() {
        assert_eq!(coerce_amount(""), Decimal::ZERO);
        assert_eq!(coerce_amount("12.3.4"), Decimal::ZERO);
        assert_eq!(coerce_amount("abc"), Decimal::ZERO);
    }
}
