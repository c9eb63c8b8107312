// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{self, CHART_PRECISION, FX_TIMEOUT, Settings};
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let current = Settings::load(store)?;
            let all = vec![
                (CHART_PRECISION, current.chart_precision.to_string()),
                (FX_TIMEOUT, current.fx_timeout.as_secs().to_string()),
            ];
            let rows: Vec<Vec<String>> = match sub.get_one::<String>("key") {
                Some(key) => {
                    let key = key.trim();
                    let (k, v) = all
                        .into_iter()
                        .find(|(k, _)| *k == key)
                        .ok_or_else(|| anyhow!("Unknown setting '{}'", key))?;
                    vec![vec![k.to_string(), v]]
                }
                None => all
                    .into_iter()
                    .map(|(k, v)| vec![k.to_string(), v])
                    .collect(),
            };
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            settings::set(store, key, value)?;
            println!("{} = {}", key.trim(), value.trim());
        }
        _ => {}
    }
    Ok(())
}
