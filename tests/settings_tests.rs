// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendwise::rates::DEFAULT_TIMEOUT;
use spendwise::settings::{self, CHART_PRECISION, FX_TIMEOUT, Settings};
use spendwise::store::SqliteStore;
use std::time::Duration;

#[test]
fn defaults_when_unset() {
    let store = SqliteStore::open_in_memory().unwrap();
    let s = Settings::load(&store).unwrap();
    assert_eq!(s.chart_precision, 0);
    assert_eq!(s.fx_timeout, DEFAULT_TIMEOUT);
}

#[test]
fn set_and_load() {
    let store = SqliteStore::open_in_memory().unwrap();
    settings::set(&store, CHART_PRECISION, "1").unwrap();
    settings::set(&store, &format!(" {} ", FX_TIMEOUT), " 3 ").unwrap();
    let s = Settings::load(&store).unwrap();
    assert_eq!(s.chart_precision, 1);
    assert_eq!(s.fx_timeout, Duration::from_secs(3));
}

#[test]
fn rejects_invalid_values() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(settings::set(&store, CHART_PRECISION, "2").is_err());
    assert!(settings::set(&store, CHART_PRECISION, "x").is_err());
    assert!(settings::set(&store, FX_TIMEOUT, "0").is_err());
    assert!(settings::set(&store, "base_currency", "EUR").is_err());
    assert!(store.setting(CHART_PRECISION).unwrap().is_none());
}

#[test]
fn corrupt_stored_value_is_reported() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_setting(CHART_PRECISION, "7").unwrap();
    assert!(Settings::load(&store).is_err());
}

#[test]
fn serializes_timeout_as_seconds() {
    let s = Settings::default();
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["fx_timeout"], 15);
    assert_eq!(json["chart_precision"], 0);
}
