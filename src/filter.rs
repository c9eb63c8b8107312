// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filter criteria and the state holder that mutates them.

use crate::models::{Kind, Transaction, truncate_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The tuple (kind, category, date-from, date-to). `None` means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub kind: Option<Kind>,
    pub category_id: Option<i64>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl Filter {
    /// Conjunction of every criterion that is set. Both date bounds are inclusive
    /// and compared at millisecond precision, like stored timestamps.
    pub fn matches(&self, t: &Transaction) -> bool {
        self.kind.is_none_or(|k| t.kind == k)
            && self.category_id.is_none_or(|c| t.category_id == Some(c))
            && self
                .date_from
                .is_none_or(|from| t.timestamp >= truncate_millis(from))
            && self
                .date_to
                .is_none_or(|to| t.timestamp <= truncate_millis(to))
    }

    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }
}

/// Holds the active criteria. Only the setters below mutate it.
///
/// Every setter returns whether the criteria actually changed, so callers can
/// skip recomputation on no-ops.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    criteria: Filter,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> Filter {
        self.criteria
    }

    pub fn set_kind(&mut self, kind: Option<Kind>) -> bool {
        self.replace(Filter {
            kind,
            ..self.criteria
        })
    }

    pub fn set_category(&mut self, category_id: Option<i64>) -> bool {
        self.replace(Filter {
            category_id,
            ..self.criteria
        })
    }

    /// Replaces the lower bound. An upper bound earlier than the new lower bound is dropped.
    pub fn set_date_from(&mut self, date_from: Option<DateTime<Utc>>) -> bool {
        let date_from = date_from.map(truncate_millis);
        let mut next = Filter {
            date_from,
            ..self.criteria
        };
        if let (Some(from), Some(to)) = (next.date_from, next.date_to) {
            if to < from {
                next.date_to = None;
            }
        }
        self.replace(next)
    }

    /// Replaces the upper bound unless it would fall before the current lower
    /// bound, in which case the call is ignored and the old upper bound kept.
    pub fn set_date_to(&mut self, date_to: Option<DateTime<Utc>>) -> bool {
        let date_to = date_to.map(truncate_millis);
        if let (Some(from), Some(to)) = (self.criteria.date_from, date_to) {
            if to < from {
                tracing::debug!(%from, %to, "upper date bound before lower bound ignored");
                return false;
            }
        }
        self.replace(Filter {
            date_to,
            ..self.criteria
        })
    }

    pub fn clear_all(&mut self) -> bool {
        self.replace(Filter::default())
    }

    /// Applies `filter` through the setters in the order kind, category, from, to.
    pub fn apply(&mut self, filter: &Filter) -> bool {
        let before = self.criteria;
        self.criteria = Filter::default();
        self.set_kind(filter.kind);
        self.set_category(filter.category_id);
        self.set_date_from(filter.date_from);
        self.set_date_to(filter.date_to);
        self.criteria != before
    }

    fn replace(&mut self, next: Filter) -> bool {
        if next == self.criteria {
            return false;
        }
        self.criteria = next;
        true
    }
}
