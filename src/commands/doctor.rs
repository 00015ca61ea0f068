// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::normalize::{CorrectionKind, normalize};
use crate::engine::{CLOSURE_EPSILON, default_start_date};
use crate::utils::{
    KEY_START_MONTH, fmt_money, get_setting, load_debts, load_one_offs, month_index_for,
    month_start, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

/// Issue code and detail for everything that would make a plan surprising.
pub fn diagnose(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Stored values the planner corrects
    let debts = load_debts(conn)?;
    let inputs: Vec<_> = debts.iter().map(|d| d.to_input()).collect();
    let normalized = normalize(&inputs);
    for c in &normalized.corrections {
        let name = debts
            .iter()
            .find(|d| d.id.to_string() == c.debt_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| c.debt_id.clone());
        let code = match c.kind {
            CorrectionKind::NegativeBalance => "negative_balance",
            CorrectionKind::NegativeApr => "negative_apr",
            CorrectionKind::NegativeMinPayment => "negative_min_payment",
            CorrectionKind::ScaledApr => "apr_scaled",
            CorrectionKind::ClampedApr => "apr_clamped",
        };
        rows.push(vec![
            code.into(),
            format!("{}: {} -> {}", name, c.original, c.corrected),
        ]);
    }

    // 2) Minimums that never pay anything down
    for d in normalized.active.iter().filter(|d| !d.is_amortizing()) {
        rows.push(vec![
            "negative_amortization".into(),
            format!(
                "{}: min {} < interest {}",
                d.name,
                fmt_money(&d.min_payment),
                fmt_money(&d.monthly_interest())
            ),
        ]);
    }

    // 3) Nothing to plan
    if !normalized.has_open_debt(CLOSURE_EPSILON) {
        rows.push(vec![
            "no_active_debts".into(),
            "no included debt has a balance".into(),
        ]);
    }

    // 4) One-offs the plan will skip
    let start = match get_setting(conn, KEY_START_MONTH)? {
        Some(m) => month_start(&m)?,
        None => default_start_date(),
    };
    for o in load_one_offs(conn)? {
        if month_index_for(start, &o.month)?.is_none() {
            rows.push(vec![
                "one_off_before_start".into(),
                format!("#{} {} {}", o.id, o.month, fmt_money(&o.amount)),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = diagnose(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
