// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Debt;
use rust_decimal::Decimal;

/// What one month's budget paid, index-aligned with the debts slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub min_applied: Vec<Decimal>,
    pub extra_applied: Vec<Decimal>,
    pub spent: Decimal,
    pub unspent: Decimal,
}

impl Allocation {
    pub fn total_for(&self, idx: usize) -> Decimal {
        self.min_applied[idx] + self.extra_applied[idx]
    }
}

/// Spend `budget` across `debts`: minimums first, then the surplus down
/// `order`. Never pays past a balance and never spends past the budget.
/// Balances left at or under `epsilon` are snapped to zero.
pub fn allocate(debts: &mut [Debt], budget: Decimal, order: &[usize], epsilon: Decimal) -> Allocation {
    let n = debts.len();
    let mut remaining = budget.max(Decimal::ZERO);
    let mut min_applied = vec![Decimal::ZERO; n];
    let mut extra_applied = vec![Decimal::ZERO; n];

    for (i, debt) in debts.iter_mut().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }
        if !debt.is_open() {
            continue;
        }
        let pay = debt.min_payment.min(debt.balance).min(remaining);
        debt.balance -= pay;
        remaining -= pay;
        min_applied[i] = pay;
    }

    cascade(debts, &mut remaining, order, &mut extra_applied);
    snap_closed(debts, epsilon);

    let budget = budget.max(Decimal::ZERO);
    Allocation {
        min_applied,
        extra_applied,
        spent: budget - remaining,
        unspent: remaining,
    }
}

/// Surplus pass shared with the lump-sum applier: walk `order`, paying each
/// open debt as much of `remaining` as it can absorb.
pub(crate) fn cascade(
    debts: &mut [Debt],
    remaining: &mut Decimal,
    order: &[usize],
    applied: &mut [Decimal],
) {
    for &i in order {
        if *remaining <= Decimal::ZERO {
            break;
        }
        let debt = &mut debts[i];
        if !debt.is_open() {
            continue;
        }
        let pay = debt.balance.min(*remaining);
        debt.balance -= pay;
        *remaining -= pay;
        applied[i] += pay;
    }
}

pub(crate) fn snap_closed(debts: &mut [Debt], epsilon: Decimal) {
    for debt in debts.iter_mut() {
        if debt.balance <= epsilon {
            debt.balance = Decimal::ZERO;
        }
    }
}
