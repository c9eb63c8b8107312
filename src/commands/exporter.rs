// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::{TransactionRow, category_names};
use crate::store::SqliteStore;
use crate::utils::filter_from_args;
use anyhow::{Result, bail};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let filter = filter_from_args(store, sub)?;
    let names = category_names(store)?;
    let rows: Vec<TransactionRow> = store
        .query(&filter, None)?
        .iter()
        .map(|t| TransactionRow::new(t, &names))
        .collect();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
