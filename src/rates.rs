// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort USD exchange rates for currency display.

use crate::error::RateError;
use crate::utils::http_client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

pub const RATES_URL: &str = "https://api.exchangerate-api.com/v6/latest/USD";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    pub base: String,
    /// 1 unit of `base` = rate units of the keyed currency.
    pub rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    /// Approximate rates used whenever the live lookup fails.
    pub fn fallback() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), Decimal::new(92, 2));
        rates.insert("MXN".to_string(), Decimal::new(170, 1));
        Self {
            base: "USD".to_string(),
            rates,
        }
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        let code = code.trim().to_uppercase();
        if code == self.base {
            return Some(Decimal::ONE);
        }
        self.rates.get(&code).copied()
    }

    /// Converts `amount` in the base currency to `code`. Display only.
    ///
    /// `None` when there is no rate for `code` or the result is out of range.
    pub fn convert(&self, amount: Decimal, code: &str) -> Option<Decimal> {
        self.rate(code).and_then(|r| amount.checked_mul(r))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateQuote {
    pub table: RateTable,
    /// Set when `table` holds the static fallback, with the reason.
    pub fallback: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    base_code: Option<String>,
    conversion_rates: Option<BTreeMap<String, Decimal>>,
}

pub fn parse_latest(body: &str) -> Result<RateTable, RateError> {
    let resp: LatestResponse = serde_json::from_str(body)?;
    if resp.result != "success" {
        return Err(RateError::Unavailable(format!("result '{}'", resp.result)));
    }
    let rates = resp
        .conversion_rates
        .filter(|r| !r.is_empty())
        .ok_or_else(|| RateError::Unavailable("no conversion_rates".into()))?;
    Ok(RateTable {
        base: resp.base_code.unwrap_or_else(|| "USD".to_string()),
        rates,
    })
}

pub fn fetch_latest(url: &str, timeout: Duration) -> Result<RateTable, RateError> {
    let client = http_client(timeout)?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    parse_latest(&body)
}

/// Live rates, or the static fallback on any failure or timeout. Never errors.
pub fn latest_rates(url: &str, timeout: Duration) -> RateQuote {
    match fetch_latest(url, timeout) {
        Ok(table) => {
            info!(count = table.rates.len(), "exchange rates fetched");
            RateQuote {
                table,
                fallback: None,
            }
        }
        Err(err) => {
            warn!(%err, "exchange rate lookup failed, using approximate rates");
            RateQuote {
                table: RateTable::fallback(),
                fallback: Some(format!("Using approximate rates ({})", err)),
            }
        }
    }
}
