// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use spendwise::filter::{Filter, FilterState};
use spendwise::models::Kind;

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()
}

#[test]
fn defaults_to_no_filtering() {
    let state = FilterState::new();
    assert!(state.criteria().is_empty());
}

#[test]
fn date_to_before_date_from_is_ignored() {
    let mut state = FilterState::new();
    state.set_date_from(Some(day(10)));
    assert!(!state.set_date_to(Some(day(5))));
    assert_eq!(state.criteria().date_from, Some(day(10)));
    assert_eq!(state.criteria().date_to, None);

    // an existing upper bound survives a rejected one
    state.set_date_to(Some(day(20)));
    assert!(!state.set_date_to(Some(day(1))));
    assert_eq!(state.criteria().date_to, Some(day(20)));
}

#[test]
fn date_from_after_date_to_clears_date_to() {
    let mut state = FilterState::new();
    state.set_date_to(Some(day(5)));
    state.set_date_from(Some(day(10)));
    assert_eq!(state.criteria().date_from, Some(day(10)));
    assert_eq!(state.criteria().date_to, None);
}

#[test]
fn equal_bounds_are_allowed() {
    let mut state = FilterState::new();
    state.set_date_from(Some(day(7)));
    assert!(state.set_date_to(Some(day(7))));
    state.set_date_from(Some(day(7)));
    assert_eq!(state.criteria().date_to, Some(day(7)));
}

#[test]
fn date_bounds_never_invert() {
    // every sequence of three setter calls over a handful of days
    let days = [None, Some(day(1)), Some(day(5)), Some(day(9))];
    for a in days {
        for b in days {
            for c in days {
                for pattern in 0..8u8 {
                    let mut state = FilterState::new();
                    for (i, d) in [a, b, c].into_iter().enumerate() {
                        if pattern & (1 << i) == 0 {
                            state.set_date_from(d);
                        } else {
                            state.set_date_to(d);
                        }
                    }
                    let f = state.criteria();
                    if let (Some(from), Some(to)) = (f.date_from, f.date_to) {
                        assert!(from <= to, "{:?} after {:?}", f, (a, b, c, pattern));
                    }
                }
            }
        }
    }
}

#[test]
fn setters_report_changes() {
    let mut state = FilterState::new();
    assert!(state.set_kind(Some(Kind::Expense)));
    assert!(!state.set_kind(Some(Kind::Expense)));
    assert!(state.set_category(Some(3)));
    assert!(state.clear_all());
    assert!(!state.clear_all());
    assert!(state.criteria().is_empty());
}

#[test]
fn apply_uses_setter_order() {
    let mut state = FilterState::new();
    let wanted = Filter {
        kind: Some(Kind::Income),
        category_id: Some(2),
        date_from: Some(day(10)),
        date_to: Some(day(5)),
    };
    assert!(state.apply(&wanted));
    let got = state.criteria();
    assert_eq!(got.kind, Some(Kind::Income));
    assert_eq!(got.category_id, Some(2));
    assert_eq!(got.date_from, Some(day(10)));
    assert_eq!(got.date_to, None);
    assert!(!state.apply(&wanted));
}
