// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    fmt_whole, get_currency_symbol, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use crate::{query, store};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = sub.get_one::<String>("account").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    store::append_observation(conn, account, date, amount)?;
    println!("Recorded {} for '{}' on {}", amount, account, date);
    Ok(())
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = sub.get_one::<String>("account").unwrap().trim();
    let data = query::balance_history(conn, account)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No balance history for '{}'", account);
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|p| vec![p.date.to_string(), fmt_whole(&p.amount, &symbol)])
        .collect();
    println!("{}", pretty_table(&["Date", "Balance"], rows));
    Ok(())
}
