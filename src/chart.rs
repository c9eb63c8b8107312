// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense share per category.

use crate::aggregate::saturating_sum;
use crate::models::{Category, Kind, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Highest supported number of decimals on a share.
pub const MAX_SHARE_PRECISION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    /// `None` groups uncategorized expenses and those pointing at unknown categories.
    pub category_id: Option<i64>,
    pub total: Decimal,
    /// Percentage of all expenses, rounded to the requested precision.
    pub share: Decimal,
}

/// Groups the expenses in `transactions` by category, largest group first.
///
/// Returns an empty chart when there is nothing spent. Groups with equal
/// totals keep the order in which they were first seen.
pub fn expense_chart(
    transactions: &[Transaction],
    categories: &[Category],
    precision: u32,
) -> Vec<ChartSlice> {
    let precision = precision.min(MAX_SHARE_PRECISION);
    let known: HashSet<i64> = categories.iter().map(|c| c.id).collect();

    let mut slots: HashMap<Option<i64>, usize> = HashMap::new();
    let mut groups: Vec<(Option<i64>, Decimal)> = Vec::new();
    let mut spent = Decimal::ZERO;

    for t in transactions.iter().filter(|t| t.kind == Kind::Expense) {
        let key = t.category_id.filter(|id| known.contains(id));
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push((key, Decimal::ZERO));
            groups.len() - 1
        });
        groups[slot].1 = saturating_sum([groups[slot].1, t.amount]);
        spent = saturating_sum([spent, t.amount]);
    }

    if spent.is_zero() {
        return Vec::new();
    }

    // sort_by is stable, which keeps first-seen order among ties
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
        .into_iter()
        .map(|(category_id, total)| ChartSlice {
            category_id,
            total,
            share: share_of(total, spent, precision),
        })
        .collect()
}

/// `total` as a percentage of `spent`, capped at 100 since saturated sums can
/// leave a group above `spent`.
fn share_of(total: Decimal, spent: Decimal, precision: u32) -> Decimal {
    let ratio = total
        .checked_div(spent)
        .unwrap_or(Decimal::ONE)
        .clamp(Decimal::NEGATIVE_ONE, Decimal::ONE);
    (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}
