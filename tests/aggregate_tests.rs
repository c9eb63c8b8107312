// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise::aggregate::{Totals, aggregate, saturating_sum};
use spendwise::filter::Filter;
use spendwise::models::{Kind, Transaction};
use spendwise::query::resolve;

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, d, 8, 0, 0).unwrap()
}

fn tx(id: i64, kind: Kind, amount: &str, cat: Option<i64>, d: u32) -> Transaction {
    Transaction {
        id,
        kind,
        amount: amount.parse().unwrap(),
        description: String::new(),
        category_id: cat,
        timestamp: day(d),
    }
}

fn scenario() -> Vec<Transaction> {
    vec![
        tx(1, Kind::Income, "100", None, 1),
        tx(2, Kind::Expense, "40", Some(1), 2),
        tx(3, Kind::Expense, "10", Some(1), 3),
    ]
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn totals_without_filter() {
    let all = scenario();
    let f = Filter::default();
    let totals = aggregate(&resolve(&all, &f), &f);
    assert_eq!(totals.income, dec("100"));
    assert_eq!(totals.expenses, dec("50"));
    assert_eq!(totals.balance, dec("50"));
}

#[test]
fn expense_filter_zeroes_income() {
    let all = scenario();
    let f = Filter {
        kind: Some(Kind::Expense),
        ..Filter::default()
    };
    let resolved = resolve(&all, &f);
    assert_eq!(resolved.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 2]);
    let totals = aggregate(&resolved, &f);
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expenses, dec("50"));
    assert_eq!(totals.balance, dec("-50"));
}

#[test]
fn kind_filter_zeroes_opposite_even_on_unfiltered_input() {
    let all = scenario();
    let expense_only = Filter {
        kind: Some(Kind::Expense),
        ..Filter::default()
    };
    assert_eq!(aggregate(&all, &expense_only).income, Decimal::ZERO);

    let income_only = Filter {
        kind: Some(Kind::Income),
        ..Filter::default()
    };
    let totals = aggregate(&all, &income_only);
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.income, dec("100"));
    assert_eq!(totals.balance, dec("100"));
}

#[test]
fn empty_set_is_all_zero() {
    let totals = aggregate(&[], &Filter::default());
    assert_eq!(totals, Totals::default());
    assert_eq!(totals.balance, Decimal::ZERO);
}

#[test]
fn balance_identity_holds_for_every_filter() {
    let mut all = scenario();
    all.push(tx(4, Kind::Income, "12.34", Some(2), 4));
    all.push(tx(5, Kind::Expense, "0.66", None, 5));
    let kinds = [None, Some(Kind::Income), Some(Kind::Expense)];
    let cats = [None, Some(1), Some(2)];
    let dates = [None, Some(day(2)), Some(day(4))];
    for kind in kinds {
        for category_id in cats {
            for date_from in dates {
                for date_to in dates {
                    let f = Filter {
                        kind,
                        category_id,
                        date_from,
                        date_to,
                    };
                    let t = aggregate(&resolve(&all, &f), &f);
                    assert_eq!(t.balance, t.income - t.expenses, "filter {:?}", f);
                }
            }
        }
    }
}

#[test]
fn decimal_amounts_sum_exactly() {
    let all = vec![
        tx(1, Kind::Expense, "0.10", None, 1),
        tx(2, Kind::Expense, "0.20", None, 1),
    ];
    let totals = aggregate(&all, &Filter::default());
    assert_eq!(totals.expenses, dec("0.30"));
}

#[test]
fn huge_amounts_saturate_instead_of_overflowing() {
    let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
    let mut all = vec![
        tx(1, Kind::Income, "0", None, 1),
        tx(2, Kind::Income, "0", None, 2),
    ];
    all[0].amount = half;
    all[1].amount = half;
    let totals = aggregate(&all, &Filter::default());
    assert_eq!(totals.income, Decimal::MAX);
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.balance, Decimal::MAX);

    for t in all.iter_mut() {
        t.kind = Kind::Expense;
    }
    let totals = aggregate(&all, &Filter::default());
    assert_eq!(totals.expenses, Decimal::MAX);
    assert_eq!(totals.balance, Decimal::MIN);
}

#[test]
fn saturating_sum_matches_plain_sum_in_range() {
    let amounts = [dec("1.25"), dec("2.50"), dec("-0.75")];
    assert_eq!(saturating_sum(amounts), dec("3.00"));
    assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
}
