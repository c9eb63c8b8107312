// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rates::{RATES_URL, latest_rates};
use crate::settings::Settings;
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(store)?;
    match m.subcommand() {
        Some(("rates", sub)) => {
            let quote = latest_rates(RATES_URL, settings.fx_timeout);
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &quote)? {
                return Ok(());
            }
            if let Some(note) = &quote.fallback {
                eprintln!("{}", note);
            }
            let rows = quote
                .table
                .rates
                .iter()
                .map(|(code, rate)| vec![quote.table.base.clone(), code.clone(), rate.to_string()])
                .collect();
            println!("{}", pretty_table(&["Base", "Quote", "Rate"], rows));
        }
        Some(("convert", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let to = sub.get_one::<String>("to").unwrap().trim().to_uppercase();
            let quote = latest_rates(RATES_URL, settings.fx_timeout);
            if let Some(note) = &quote.fallback {
                eprintln!("{}", note);
            }
            let res = quote
                .table
                .convert(amount, &to)
                .ok_or_else(|| anyhow!("Cannot convert {} {} to {}", amount, quote.table.base, to))?;
            println!("{} {} ~ {:.2} {}", amount, quote.table.base, res, to);
        }
        _ => {}
    }
    Ok(())
}
