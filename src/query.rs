// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::Filter;
use crate::models::{Category, Transaction};
use std::collections::HashSet;

/// Transactions matching every set criterion, most recent first.
///
/// Equal timestamps fall back to id descending, so later insertions come first.
pub fn resolve(transactions: &[Transaction], filter: &Filter) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    sort_recent_first(&mut out);
    out
}

pub fn sort_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Clears category references that point at no known category.
pub fn detach_dangling(transactions: &mut [Transaction], categories: &[Category]) -> usize {
    let known: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    let mut detached = 0;
    for t in transactions.iter_mut() {
        if t.category_id.is_some_and(|id| !known.contains(&id)) {
            t.category_id = None;
            detached += 1;
        }
    }
    detached
}
