// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::Filter;
use crate::models::{Kind, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Income, expense and balance for the transactions selected by `filter`.
///
/// `transactions` may be the already-resolved list or the raw store contents;
/// the filter is applied either way. A kind filter zeroes the opposite total
/// outright instead of just excluding its records.
pub fn aggregate(transactions: &[Transaction], filter: &Filter) -> Totals {
    let income = total_for(transactions, filter, Kind::Income);
    let expenses = total_for(transactions, filter, Kind::Expense);
    Totals {
        income,
        expenses,
        balance: income.saturating_sub(expenses),
    }
}

/// Sums `amounts`, saturating at the `Decimal` bounds instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        match total.checked_add(amount) {
            Some(next) => total = next,
            None => {
                warn!(%total, %amount, "amount total out of range, saturating");
                total = total.saturating_add(amount);
            }
        }
    }
    total
}

fn total_for(transactions: &[Transaction], filter: &Filter, kind: Kind) -> Decimal {
    if filter.kind == Some(kind.opposite()) {
        return Decimal::ZERO;
    }
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.kind == kind && filter.matches(t))
            .map(|t| t.amount),
    )
}
