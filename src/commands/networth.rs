// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculator::current_net_worth;
use crate::query::{self, Timeframe};
use crate::utils::{fmt_whole, get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

/// `networth show --json` payload; the total is a JSON number.
#[derive(Debug, Serialize)]
pub struct NetWorthReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub net_worth: Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let total = current_net_worth(conn)?;
            if sub.get_flag("json") {
                let report = NetWorthReport { net_worth: total };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Net worth: {}", fmt_whole(&total, &get_currency_symbol(conn)?));
            }
        }
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let range = sub.get_one::<String>("range").unwrap().parse::<Timeframe>()?;
    let window = query::net_worth_window(conn, range)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &window)? {
        return Ok(());
    }
    if window.is_empty() {
        println!("No net worth history recorded yet.");
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let current = current_net_worth(conn)?;
    let change = query::net_worth_change(&window, current);
    let rows = window
        .iter()
        .map(|s| vec![s.date.to_string(), fmt_whole(&s.total, &symbol)])
        .collect();
    println!("{}", pretty_table(&["Date", "Net worth"], rows));
    let sign = if change.is_sign_positive() { "+" } else { "" };
    println!(
        "Now {} ({}{} over range)",
        fmt_whole(&current, &symbol),
        sign,
        fmt_whole(&change, &symbol)
    );
    Ok(())
}
