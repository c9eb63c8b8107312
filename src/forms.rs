// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Editing workflow for transactions and categories.
//!
//! Validation problems are reported through a transient message slot and leave
//! the store untouched. Store failures are returned to the caller as errors.

use crate::error::StoreResult;
use crate::models::{Category, Kind, NewCategory, NewTransaction, Transaction};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub const MSG_INVALID_AMOUNT: &str = "Enter a valid amount";
pub const MSG_MISSING_KIND: &str = "Select a transaction type";
pub const MSG_TRANSACTION_SAVED: &str = "Transaction saved";
pub const MSG_TRANSACTION_UPDATED: &str = "Transaction updated";
pub const MSG_MISSING_NAME: &str = "Enter a category name";
pub const MSG_MISSING_ICON: &str = "Select an icon";
pub const MSG_MISSING_COLOR: &str = "Select a color";
pub const MSG_CATEGORY_SAVED: &str = "Category saved";

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    amount: String,
    description: String,
    kind: Option<Kind>,
    category_id: Option<i64>,
    timestamp: Option<DateTime<Utc>>,
    message: Option<String>,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled with the values of `existing`.
    pub fn editing(existing: &Transaction) -> Self {
        Self {
            amount: existing.amount.to_string(),
            description: existing.description.clone(),
            kind: Some(existing.kind),
            category_id: existing.category_id,
            timestamp: Some(existing.timestamp),
            message: None,
        }
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_kind(&mut self, kind: Kind) {
        self.kind = Some(kind);
    }

    pub fn set_category(&mut self, category_id: Option<i64>) {
        self.category_id = category_id;
    }

    pub fn set_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.timestamp = timestamp;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Inserts a new transaction. `Ok(None)` means validation failed; see [`Self::message`].
    pub fn save<S: RecordStore + ?Sized>(&mut self, store: &S) -> StoreResult<Option<i64>> {
        let Some((kind, amount)) = self.validate() else {
            return Ok(None);
        };
        let new = NewTransaction {
            kind,
            amount,
            description: self.description.clone(),
            category_id: self.category_id,
            timestamp: self.timestamp,
        };
        let id = store.insert_transaction(&new)?;
        self.reset();
        self.message = Some(MSG_TRANSACTION_SAVED.to_string());
        Ok(Some(id))
    }

    /// Replaces `existing` with the form values, keeping its id and, unless
    /// set on the form, its timestamp. Returns `Ok(false)` on validation failure.
    pub fn save_changes<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        existing: &Transaction,
    ) -> StoreResult<bool> {
        let Some((kind, amount)) = self.validate() else {
            return Ok(false);
        };
        let updated = Transaction {
            id: existing.id,
            kind,
            amount,
            description: self.description.clone(),
            category_id: self.category_id,
            timestamp: self.timestamp.unwrap_or(existing.timestamp),
        };
        store.update_transaction(&updated)?;
        self.message = Some(MSG_TRANSACTION_UPDATED.to_string());
        Ok(true)
    }

    fn validate(&mut self) -> Option<(Kind, Decimal)> {
        let amount = match self.amount.trim().parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => a,
            _ => {
                self.message = Some(MSG_INVALID_AMOUNT.to_string());
                return None;
            }
        };
        let Some(kind) = self.kind else {
            self.message = Some(MSG_MISSING_KIND.to_string());
            return None;
        };
        Some((kind, amount))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    name: String,
    icon: Option<String>,
    color: Option<String>,
    message: Option<String>,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(existing: &Category) -> Self {
        Self {
            name: existing.name.clone(),
            icon: Some(existing.icon.clone()),
            color: Some(existing.color.clone()),
            message: None,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_icon(&mut self, icon: &str) {
        self.icon = Some(icon.to_string());
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = Some(color.to_string());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn save<S: RecordStore + ?Sized>(&mut self, store: &S) -> StoreResult<Option<i64>> {
        let Some(new) = self.validate() else {
            return Ok(None);
        };
        let id = store.insert_category(&new)?;
        *self = Self {
            message: Some(MSG_CATEGORY_SAVED.to_string()),
            ..Self::default()
        };
        Ok(Some(id))
    }

    pub fn save_changes<S: RecordStore + ?Sized>(
        &mut self,
        store: &S,
        existing: &Category,
    ) -> StoreResult<bool> {
        let Some(new) = self.validate() else {
            return Ok(false);
        };
        store.update_category(&Category {
            id: existing.id,
            name: new.name,
            icon: new.icon,
            color: new.color,
        })?;
        self.message = Some(MSG_CATEGORY_SAVED.to_string());
        Ok(true)
    }

    fn validate(&mut self) -> Option<NewCategory> {
        let failure = if self.name.trim().is_empty() {
            MSG_MISSING_NAME
        } else if self.icon.as_deref().is_none_or(|i| i.trim().is_empty()) {
            MSG_MISSING_ICON
        } else if self.color.as_deref().is_none_or(|c| c.trim().is_empty()) {
            MSG_MISSING_COLOR
        } else {
            return Some(NewCategory::new(
                self.name.trim(),
                self.icon.as_deref().unwrap_or_default().trim(),
                self.color.as_deref().unwrap_or_default().trim(),
            ));
        };
        self.message = Some(failure.to_string());
        None
    }
}
