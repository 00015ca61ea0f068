// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Debt, saturating_sum};
use super::waterfall::{cascade, snap_closed};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct LumpSumOutcome {
    /// Amount applied to each debt, index-aligned.
    pub applied: Vec<Decimal>,
    pub total: Decimal,
    /// Part of the lump sum left over once every debt was cleared.
    pub unused: Decimal,
}

/// Pay a one-time amount down `order` using the same cascade as the monthly
/// surplus pass. Ad-hoc calendar payments are not applied here; the
/// projection loop adds them to the budget of their month instead.
pub fn apply_lump_sum(
    debts: &mut [Debt],
    amount: Decimal,
    order: &[usize],
    epsilon: Decimal,
) -> LumpSumOutcome {
    let mut applied = vec![Decimal::ZERO; debts.len()];
    let mut remaining = amount.max(Decimal::ZERO);
    cascade(debts, &mut remaining, order, &mut applied);
    snap_closed(debts, epsilon);
    LumpSumOutcome {
        total: saturating_sum(applied.iter().copied()),
        applied,
        unused: remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PayoffOrder, Strategy};
    use rust_decimal_macros::dec;

    fn debt(id: &str, balance: Decimal, apr: Decimal) -> Debt {
        Debt {
            id: id.into(),
            name: id.into(),
            balance,
            apr,
            min_payment: dec!(25),
            included: true,
        }
    }

    #[test]
    fn lump_sum_follows_strategy_order() {
        let mut debts = vec![
            debt("big", dec!(2000), dec!(24)),
            debt("small", dec!(300), dec!(5)),
        ];
        let order = Strategy::Snowball.open_order(&debts, dec!(0.01));
        let out = apply_lump_sum(&mut debts, dec!(500), &order, dec!(0.01));
        assert_eq!(out.applied, vec![dec!(200), dec!(300)]);
        assert!(debts[1].balance.is_zero());
        assert_eq!(debts[0].balance, dec!(1800));
        assert!(out.unused.is_zero());
    }

    #[test]
    fn lump_sum_larger_than_debt_reports_unused() {
        let mut debts = vec![debt("only", dec!(120), dec!(10))];
        let out = apply_lump_sum(&mut debts, dec!(200), &[0], dec!(0.01));
        assert_eq!(out.total, dec!(120));
        assert_eq!(out.unused, dec!(80));
    }
}
