// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived view of the store under the active filter.
//!
//! The graph has two inputs, the [`FilterState`] owned here and the store's
//! snapshot channel, and one output, a [`LedgerView`] published on a `watch`
//! channel. Each input change produces exactly one recomputation; the view is
//! replaced whole so observers never see totals from two different passes.

use crate::aggregate::{Totals, aggregate};
use crate::chart::{ChartSlice, expense_chart};
use crate::filter::{Filter, FilterState};
use crate::models::{Category, Kind, Transaction};
use crate::query::{detach_dangling, resolve};
use crate::store::{RecordStore, Snapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerView {
    /// Store revision the view was computed from.
    pub revision: u64,
    pub filter: Filter,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub chart: Vec<ChartSlice>,
    #[serde(skip)]
    pub categories: Vec<Category>,
}

impl LedgerView {
    pub fn compute(snapshot: &Snapshot, filter: &Filter, precision: u32) -> Self {
        let mut all = snapshot.transactions.clone();
        detach_dangling(&mut all, &snapshot.categories);
        let transactions = resolve(&all, filter);
        let totals = aggregate(&transactions, filter);
        let chart = expense_chart(&transactions, &snapshot.categories, precision);
        Self {
            revision: snapshot.revision,
            filter: *filter,
            transactions,
            totals,
            chart,
            categories: snapshot.categories.clone(),
        }
    }

    pub fn category(&self, id: Option<i64>) -> Option<&Category> {
        id.and_then(|id| self.categories.iter().find(|c| c.id == id))
    }
}

pub struct Overview {
    state: FilterState,
    precision: u32,
    records: watch::Receiver<Arc<Snapshot>>,
    view: watch::Sender<Arc<LedgerView>>,
    recomputations: u64,
}

impl Overview {
    pub fn new<S: RecordStore + ?Sized>(store: &S, precision: u32) -> Self {
        let mut records = store.observe();
        let snapshot = records.borrow_and_update().clone();
        let state = FilterState::new();
        let view = LedgerView::compute(&snapshot, &state.criteria(), precision);
        let (view, _) = watch::channel(Arc::new(view));
        Self {
            state,
            precision,
            records,
            view,
            recomputations: 1,
        }
    }

    /// Receives every new view. Dropping the receiver stops observing.
    pub fn subscribe(&self) -> watch::Receiver<Arc<LedgerView>> {
        self.view.subscribe()
    }

    pub fn current(&self) -> Arc<LedgerView> {
        self.view.borrow().clone()
    }

    pub fn filter(&self) -> Filter {
        self.state.criteria()
    }

    /// Number of views computed so far, the initial one included.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn set_kind(&mut self, kind: Option<Kind>) -> bool {
        let changed = self.state.set_kind(kind);
        self.recompute_if(changed)
    }

    pub fn set_category(&mut self, category_id: Option<i64>) -> bool {
        let changed = self.state.set_category(category_id);
        self.recompute_if(changed)
    }

    pub fn set_date_from(&mut self, date_from: Option<DateTime<Utc>>) -> bool {
        let changed = self.state.set_date_from(date_from);
        self.recompute_if(changed)
    }

    pub fn set_date_to(&mut self, date_to: Option<DateTime<Utc>>) -> bool {
        let changed = self.state.set_date_to(date_to);
        self.recompute_if(changed)
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.state.clear_all();
        self.recompute_if(changed)
    }

    /// Replaces all criteria at once with a single recomputation.
    pub fn apply(&mut self, filter: &Filter) -> bool {
        let changed = self.state.apply(filter);
        self.recompute_if(changed)
    }

    /// Recomputes if the store published since the last view. Returns whether it did.
    pub fn refresh(&mut self) -> bool {
        match self.records.has_changed() {
            Ok(true) => {
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Waits for the next store publication and recomputes.
    ///
    /// Returns `false` once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        if self.records.changed().await.is_err() {
            return false;
        }
        self.recompute();
        true
    }

    fn recompute_if(&mut self, changed: bool) -> bool {
        if changed {
            self.recompute();
        }
        changed
    }

    fn recompute(&mut self) {
        // Marks the snapshot as seen so a later refresh() does not redo this pass.
        let snapshot = self.records.borrow_and_update().clone();
        let filter = self.state.criteria();
        let view = LedgerView::compute(&snapshot, &filter, self.precision);
        self.recomputations += 1;
        debug!(
            revision = view.revision,
            matched = view.transactions.len(),
            balance = %view.totals.balance,
            "ledger view recomputed"
        );
        self.view.send_replace(Arc::new(view));
    }
}
