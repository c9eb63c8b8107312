// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::MAX_SHARE_PRECISION;
use crate::rates::DEFAULT_TIMEOUT;
use crate::store::SqliteStore;
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::time::Duration;

pub const CHART_PRECISION: &str = "chart.precision";
pub const FX_TIMEOUT: &str = "fx.timeout";

pub const KEYS: &[&str] = &[CHART_PRECISION, FX_TIMEOUT];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Decimals on chart shares, 0 or 1.
    pub chart_precision: u32,
    #[serde(with = "secs")]
    pub fx_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_precision: 0,
            fx_timeout: DEFAULT_TIMEOUT,
        }
    }
}

mod secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }
}

impl Settings {
    pub fn load(store: &SqliteStore) -> Result<Self> {
        let mut settings = Settings::default();
        if let Some(v) = store.setting(CHART_PRECISION)? {
            settings.chart_precision = parse_precision(&v)?;
        }
        if let Some(v) = store.setting(FX_TIMEOUT)? {
            settings.fx_timeout = parse_timeout(&v)?;
        }
        Ok(settings)
    }
}

fn parse_precision(raw: &str) -> Result<u32> {
    let p: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} '{}'", CHART_PRECISION, raw))?;
    if p > MAX_SHARE_PRECISION {
        return Err(anyhow!(
            "{} must be between 0 and {}",
            CHART_PRECISION,
            MAX_SHARE_PRECISION
        ));
    }
    Ok(p)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} '{}'", FX_TIMEOUT, raw))?;
    if secs == 0 {
        return Err(anyhow!("{} must be at least 1 second", FX_TIMEOUT));
    }
    Ok(Duration::from_secs(secs))
}

/// Validates and persists one setting.
pub fn set(store: &SqliteStore, key: &str, value: &str) -> Result<()> {
    match key.trim() {
        CHART_PRECISION => {
            parse_precision(value)?;
        }
        FX_TIMEOUT => {
            parse_timeout(value)?;
        }
        other => {
            return Err(anyhow!(
                "Unknown setting '{}' (known: {})",
                other,
                KEYS.join(", ")
            ));
        }
    }
    store.set_setting(key.trim(), value.trim())?;
    Ok(())
}
