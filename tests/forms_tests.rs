// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use spendwise::forms::{
    CategoryForm, MSG_CATEGORY_SAVED, MSG_INVALID_AMOUNT, MSG_MISSING_COLOR, MSG_MISSING_ICON,
    MSG_MISSING_KIND, MSG_MISSING_NAME, MSG_TRANSACTION_SAVED, MSG_TRANSACTION_UPDATED,
    TransactionForm,
};
use spendwise::models::{Kind, NO_DESCRIPTION, NewCategory};
use spendwise::store::{RecordStore, SqliteStore};

fn store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

#[test]
fn rejects_bad_amounts_without_writing() {
    let store = store();
    let mut form = TransactionForm::new();
    form.set_kind(Kind::Expense);
    for bad in ["", "abc", "0", "-5", "  "] {
        form.set_amount(bad);
        assert_eq!(form.save(&store).unwrap(), None, "amount {:?}", bad);
        assert_eq!(form.message(), Some(MSG_INVALID_AMOUNT));
    }
    assert!(store.snapshot().transactions.is_empty());
    assert_eq!(store.snapshot().revision, 0);
}

#[test]
fn requires_a_kind() {
    let store = store();
    let mut form = TransactionForm::new();
    form.set_amount("10");
    assert_eq!(form.save(&store).unwrap(), None);
    assert_eq!(form.message(), Some(MSG_MISSING_KIND));
    form.clear_message();
    assert_eq!(form.message(), None);
}

#[test]
fn amount_is_checked_before_kind() {
    let store = store();
    let mut form = TransactionForm::new();
    form.set_amount("nope");
    form.save(&store).unwrap();
    assert_eq!(form.message(), Some(MSG_INVALID_AMOUNT));
}

#[test]
fn save_inserts_and_resets() {
    let store = store();
    let cat = store
        .insert_category(&NewCategory::new("Food", "restaurant", "#FF9800"))
        .unwrap();
    let when = Utc.with_ymd_and_hms(2025, 2, 14, 19, 0, 0).unwrap();
    let mut form = TransactionForm::new();
    form.set_amount(" 42.10 ");
    form.set_kind(Kind::Expense);
    form.set_category(Some(cat));
    form.set_timestamp(Some(when));

    let id = form.save(&store).unwrap().unwrap();
    assert_eq!(form.message(), Some(MSG_TRANSACTION_SAVED));

    let t = store.transaction(id).unwrap().unwrap();
    assert_eq!(t.amount, "42.10".parse::<Decimal>().unwrap());
    assert_eq!(t.description, NO_DESCRIPTION);
    assert_eq!(t.category_id, Some(cat));
    assert_eq!(t.timestamp, when);

    // Fields were cleared, so a second save fails validation.
    assert_eq!(form.save(&store).unwrap(), None);
    assert_eq!(store.snapshot().transactions.len(), 1);
}

#[test]
fn editing_keeps_id_and_timestamp() {
    let store = store();
    let mut form = TransactionForm::new();
    form.set_amount("8");
    form.set_kind(Kind::Income);
    form.set_description("Tip");
    let id = form.save(&store).unwrap().unwrap();
    let existing = store.transaction(id).unwrap().unwrap();

    let mut edit = TransactionForm::editing(&existing);
    edit.set_timestamp(None);
    edit.set_amount("9.50");
    assert!(edit.save_changes(&store, &existing).unwrap());
    assert_eq!(edit.message(), Some(MSG_TRANSACTION_UPDATED));

    let back = store.transaction(id).unwrap().unwrap();
    assert_eq!(back.id, id);
    assert_eq!(back.amount, "9.50".parse::<Decimal>().unwrap());
    assert_eq!(back.description, "Tip");
    assert_eq!(back.timestamp, existing.timestamp);

    edit.set_amount("0");
    assert!(!edit.save_changes(&store, &existing).unwrap());
    assert_eq!(edit.message(), Some(MSG_INVALID_AMOUNT));
}

#[test]
fn category_form_checks_fields_in_order() {
    let store = store();
    let mut form = CategoryForm::new();
    assert_eq!(form.save(&store).unwrap(), None);
    assert_eq!(form.message(), Some(MSG_MISSING_NAME));

    form.set_name("Travel");
    assert_eq!(form.save(&store).unwrap(), None);
    assert_eq!(form.message(), Some(MSG_MISSING_ICON));

    form.set_icon("flight");
    assert_eq!(form.save(&store).unwrap(), None);
    assert_eq!(form.message(), Some(MSG_MISSING_COLOR));
    assert!(store.snapshot().categories.is_empty());

    form.set_color("#03A9F4");
    let id = form.save(&store).unwrap().unwrap();
    assert_eq!(form.message(), Some(MSG_CATEGORY_SAVED));
    let c = store.category(id).unwrap().unwrap();
    assert_eq!(c.name, "Travel");
    assert_eq!(c.icon, "flight");
    assert_eq!(c.color, "#03A9F4");
}

#[test]
fn category_edit_updates_in_place() {
    let store = store();
    let id = store
        .insert_category(&NewCategory::new("Fun", "movie", "#9C27B0"))
        .unwrap();
    let existing = store.category(id).unwrap().unwrap();
    let mut form = CategoryForm::editing(&existing);
    form.set_name("Entertainment");
    assert!(form.save_changes(&store, &existing).unwrap());
    let c = store.category(id).unwrap().unwrap();
    assert_eq!(c.name, "Entertainment");
    assert_eq!(c.icon, "movie");
}

#[test]
fn duplicate_category_name_is_a_store_error() {
    let store = store();
    store
        .insert_category(&NewCategory::new("Food", "restaurant", "#FF9800"))
        .unwrap();
    let mut form = CategoryForm::new();
    form.set_name("Food");
    form.set_icon("home");
    form.set_color("#000000");
    assert!(form.save(&store).is_err());
}
