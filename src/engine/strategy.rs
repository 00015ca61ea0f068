// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Debt;
use super::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering used for surplus allocation. Implementors only supply the
/// comparator; sorting is stable so equal debts keep their input order.
pub trait PayoffOrder {
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering;

    fn order(&self, debts: &[Debt]) -> Vec<Debt> {
        let mut sorted = debts.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// Indices of the debts still above `epsilon`, in payoff order.
    fn open_order(&self, debts: &[Debt], epsilon: Decimal) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..debts.len())
            .filter(|&i| debts[i].balance > epsilon)
            .collect();
        idx.sort_by(|&a, &b| self.compare(&debts[a], &debts[b]));
        idx
    }
}

/// Smallest balance first; higher APR wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snowball;

impl PayoffOrder for Snowball {
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        a.balance
            .cmp(&b.balance)
            .then_with(|| b.apr.cmp(&a.apr))
    }
}

/// Highest APR first; smaller balance wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avalanche;

impl PayoffOrder for Avalanche {
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        b.apr
            .cmp(&a.apr)
            .then_with(|| a.balance.cmp(&b.balance))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    Snowball,
    Avalanche,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Snowball, Strategy::Avalanche];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }

    pub fn comparator(&self) -> &'static dyn PayoffOrder {
        match self {
            Strategy::Snowball => &Snowball,
            Strategy::Avalanche => &Avalanche,
        }
    }
}

impl PayoffOrder for Strategy {
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        self.comparator().compare(a, b)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt(id: &str, balance: Decimal, apr: Decimal) -> Debt {
        Debt {
            id: id.into(),
            name: id.into(),
            balance,
            apr,
            min_payment: dec!(10),
            included: true,
        }
    }

    #[test]
    fn snowball_breaks_balance_ties_by_higher_apr() {
        let debts = vec![
            debt("a", dec!(500), dec!(5)),
            debt("b", dec!(500), dec!(15)),
            debt("c", dec!(100), dec!(1)),
        ];
        let ids: Vec<_> = Strategy::Snowball
            .order(&debts)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn avalanche_breaks_apr_ties_by_smaller_balance() {
        let debts = vec![
            debt("a", dec!(900), dec!(20)),
            debt("b", dec!(300), dec!(20)),
            debt("c", dec!(100), dec!(3)),
        ];
        let ids: Vec<_> = Strategy::Avalanche
            .order(&debts)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn open_order_skips_closed_debts() {
        let debts = vec![
            debt("a", dec!(0), dec!(20)),
            debt("b", dec!(50), dec!(10)),
            debt("c", dec!(0.01), dec!(30)),
        ];
        assert_eq!(Strategy::Avalanche.open_order(&debts, dec!(0.01)), vec![1]);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(" Avalanche ".parse::<Strategy>().unwrap(), Strategy::Avalanche);
        assert!("fastest".parse::<Strategy>().is_err());
    }
}
