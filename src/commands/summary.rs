// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::display::category_color;
use crate::models::UNCATEGORIZED_LABEL;
use crate::overview::{LedgerView, Overview};
use crate::settings::Settings;
use crate::store::SqliteStore;
use crate::utils::{filter_from_args, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: &SqliteStore, sub: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(store)?;
    let filter = filter_from_args(store, sub)?;
    let mut overview = Overview::new(store, settings.chart_precision);
    overview.apply(&filter);
    let view = overview.current();

    let report = SummaryReport::from_view(&view);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance", "Transactions"],
            vec![vec![
                report.income.clone(),
                report.expenses.clone(),
                report.balance.clone(),
                report.transactions.to_string(),
            ]],
        )
    );
    if report.chart.is_empty() {
        println!("No expenses in range.");
    } else {
        let rows = report
            .chart
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    s.color.clone(),
                    s.spent.clone(),
                    format!("{}%", s.share),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Color", "Spent", "Share"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub transactions: usize,
    pub chart: Vec<ChartRow>,
}

#[derive(Debug, Serialize)]
pub struct ChartRow {
    pub category_id: Option<i64>,
    pub category: String,
    pub color: String,
    pub spent: String,
    pub share: String,
}

impl SummaryReport {
    pub fn from_view(view: &LedgerView) -> Self {
        let chart = view
            .chart
            .iter()
            .map(|slice| {
                let category = view.category(slice.category_id);
                ChartRow {
                    category_id: slice.category_id,
                    category: category
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
                    color: category.map(|c| category_color(c).to_string()).unwrap_or_default(),
                    spent: fmt_money(&slice.total),
                    share: slice.share.to_string(),
                }
            })
            .collect();
        Self {
            income: fmt_money(&view.totals.income),
            expenses: fmt_money(&view.totals.expenses),
            balance: fmt_money(&view.totals.balance),
            transactions: view.transactions.len(),
            chart,
        }
    }
}
