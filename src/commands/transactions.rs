// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::TransactionForm;
use crate::models::{Kind, Transaction};
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    filter_from_args, fmt_money, id_for_category, maybe_print_json, parse_timestamp, pretty_table,
};
use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(raw: &str) -> Result<Kind> {
    raw.parse::<Kind>().map_err(|e| anyhow!(e))
}

fn add(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = TransactionForm::new();
    form.set_kind(parse_kind(sub.get_one::<String>("kind").unwrap())?);
    form.set_amount(sub.get_one::<String>("amount").unwrap());
    if let Some(desc) = sub.get_one::<String>("description") {
        form.set_description(desc);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        form.set_category(Some(id_for_category(store, cat)?));
    }
    if let Some(date) = sub.get_one::<String>("date") {
        form.set_timestamp(Some(parse_timestamp(date)?));
    }

    match form.save(store)? {
        Some(id) => {
            println!("{} (id {})", form.message().unwrap_or_default(), id);
            Ok(())
        }
        None => bail!("{}", form.message().unwrap_or("Invalid transaction")),
    }
}

fn edit(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let existing = store
        .transaction(id)?
        .with_context(|| format!("Transaction {} not found", id))?;

    let mut form = TransactionForm::editing(&existing);
    if let Some(kind) = sub.get_one::<String>("kind") {
        form.set_kind(parse_kind(kind)?);
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        form.set_amount(amount);
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        form.set_description(desc);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        form.set_category(Some(id_for_category(store, cat)?));
    }
    if sub.get_flag("uncategorize") {
        form.set_category(None);
    }
    if let Some(date) = sub.get_one::<String>("date") {
        form.set_timestamp(Some(parse_timestamp(date)?));
    }

    if !form.save_changes(store, &existing)? {
        bail!("{}", form.message().unwrap_or("Invalid transaction"));
    }
    println!("{} (id {})", form.message().unwrap_or_default(), id);
    Ok(())
}

fn remove(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store.delete_transaction(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl TransactionRow {
    pub fn new(t: &Transaction, names: &HashMap<i64, String>) -> Self {
        Self {
            id: t.id,
            date: t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount),
            category: t
                .category_id
                .and_then(|id| names.get(&id).cloned())
                .unwrap_or_default(),
            description: t.description.clone(),
        }
    }
}

pub fn category_names(store: &SqliteStore) -> Result<HashMap<i64, String>> {
    Ok(store
        .find_categories(&|_| true)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

/// Filtered history, most recent first, as printed by `tx list`.
pub fn query_rows(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(store, sub)?;
    let limit = sub.get_one::<usize>("limit").copied();
    let names = category_names(store)?;
    let data = store
        .query(&filter, limit)?
        .iter()
        .map(|t| TransactionRow::new(t, &names))
        .collect();
    Ok(data)
}
