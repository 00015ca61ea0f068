// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::DebtInput;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtRow {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub apr: Decimal, // percent, e.g. 19.99
    pub min_payment: Decimal,
    pub included: bool,
}

impl DebtRow {
    pub fn to_input(&self) -> DebtInput {
        DebtInput {
            id: self.id.to_string(),
            name: self.name.clone(),
            balance: self.balance,
            apr: self.apr,
            min_payment: self.min_payment,
            included: self.included,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneOff {
    pub id: i64,
    pub month: String, // YYYY-MM
    pub amount: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub debt_id: i64,
    pub debt_name: String,
    pub amount: Decimal,
    pub note: Option<String>,
}
