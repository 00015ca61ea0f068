// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Debt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Periodic rate for one month of a percentage APR.
pub fn monthly_rate(apr: Decimal) -> Decimal {
    apr / PERCENT / MONTHS_PER_YEAR
}

pub fn monthly_interest(balance: Decimal, apr: Decimal) -> Decimal {
    if balance <= Decimal::ZERO || apr <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    balance.saturating_mul(monthly_rate(apr))
}

/// Apply one month of interest to an open debt and return the amount added.
/// Debts at zero are left untouched.
pub fn accrue(debt: &mut Debt) -> Decimal {
    let interest = monthly_interest(debt.balance, debt.apr);
    debt.balance = debt.balance.saturating_add(interest);
    interest
}

/// Accrue every debt, returning the interest added to each, index-aligned.
pub fn accrue_all(debts: &mut [Debt]) -> Vec<Decimal> {
    debts.iter_mut().map(accrue).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt(balance: Decimal, apr: Decimal) -> Debt {
        Debt {
            id: "d".into(),
            name: "d".into(),
            balance,
            apr,
            min_payment: dec!(25),
            included: true,
        }
    }

    #[test]
    fn accrues_twelfth_of_apr() {
        let mut d = debt(dec!(1200), dec!(12));
        let i = accrue(&mut d);
        assert_eq!(i, dec!(12));
        assert_eq!(d.balance, dec!(1212));
    }

    #[test]
    fn zero_balance_is_untouched() {
        let mut d = debt(Decimal::ZERO, dec!(29.99));
        assert!(accrue(&mut d).is_zero());
        assert!(d.balance.is_zero());
    }
}
