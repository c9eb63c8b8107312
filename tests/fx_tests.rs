// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendwise::error::RateError;
use spendwise::rates::{RateTable, latest_rates, parse_latest};
use std::time::Duration;

#[test]
fn parses_successful_response() {
    let body = r#"{
        "result": "success",
        "base_code": "USD",
        "conversion_rates": {"USD": 1, "EUR": 0.9134, "MXN": 18.25}
    }"#;
    let table = parse_latest(body).unwrap();
    assert_eq!(table.base, "USD");
    assert_eq!(table.rate("eur"), Some("0.9134".parse().unwrap()));
    assert_eq!(table.rate("MXN"), Some("18.25".parse().unwrap()));
    assert_eq!(table.rate("JPY"), None);
}

#[test]
fn rejects_error_and_empty_responses() {
    let err = parse_latest(r#"{"result":"error","error-type":"invalid-key"}"#).unwrap_err();
    assert!(matches!(err, RateError::Unavailable(_)));
    let err = parse_latest(r#"{"result":"success","conversion_rates":{}}"#).unwrap_err();
    assert!(matches!(err, RateError::Unavailable(_)));
    assert!(matches!(
        parse_latest("<html>").unwrap_err(),
        RateError::Json(_)
    ));
}

#[test]
fn fallback_table_converts() {
    let table = RateTable::fallback();
    assert_eq!(table.rate("USD"), Some(Decimal::ONE));
    assert_eq!(
        table.convert(Decimal::new(100, 0), "EUR"),
        Some(Decimal::new(92, 0))
    );
    assert_eq!(
        table.convert(Decimal::new(2, 0), "mxn"),
        Some(Decimal::new(34, 0))
    );
    assert_eq!(table.convert(Decimal::ONE, "GBP"), None);
}

#[test]
fn unreachable_service_uses_fallback() {
    let quote = latest_rates("http://127.0.0.1:9/latest/USD", Duration::from_secs(2));
    assert_eq!(quote.table, RateTable::fallback());
    let note = quote.fallback.unwrap();
    assert!(note.starts_with("Using approximate rates"));
}

#[test]
fn out_of_range_conversion_is_none() {
    let table = RateTable::fallback();
    assert_eq!(table.convert(Decimal::MAX, "MXN"), None);
    assert!(table.convert(Decimal::MAX, "EUR").is_some());
}
