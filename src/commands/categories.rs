// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::display::{category_color, category_icon};
use crate::forms::CategoryForm;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::{Context, Result, bail};
use serde::Serialize;

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut form = CategoryForm::new();
            form.set_name(sub.get_one::<String>("name").unwrap());
            form.set_icon(sub.get_one::<String>("icon").unwrap());
            form.set_color(sub.get_one::<String>("color").unwrap());
            match form.save(store)? {
                Some(id) => println!("{} (id {})", form.message().unwrap_or_default(), id),
                None => bail!("{}", form.message().unwrap_or("Invalid category")),
            }
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let existing = store
                .category(id)?
                .with_context(|| format!("Category {} not found", id))?;
            let mut form = CategoryForm::editing(&existing);
            if let Some(name) = sub.get_one::<String>("name") {
                form.set_name(name);
            }
            if let Some(icon) = sub.get_one::<String>("icon") {
                form.set_icon(icon);
            }
            if let Some(color) = sub.get_one::<String>("color") {
                form.set_color(color);
            }
            if !form.save_changes(store, &existing)? {
                bail!("{}", form.message().unwrap_or("Invalid category"));
            }
            println!("{} (id {})", form.message().unwrap_or_default(), id);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_category(store, name)?;
            store.delete_category(id)?;
            println!("Removed category '{}'", name.trim());
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub transactions: usize,
}

fn list(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = store.snapshot();
    let data: Vec<CategoryRow> = snapshot
        .categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            name: c.name.clone(),
            icon: category_icon(c).to_string(),
            color: category_color(c).to_string(),
            transactions: snapshot
                .transactions
                .iter()
                .filter(|t| t.category_id == Some(c.id))
                .count(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name,
                    r.icon,
                    r.color,
                    r.transactions.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Category", "Icon", "Color", "Transactions"], rows)
        );
    }
    Ok(())
}
