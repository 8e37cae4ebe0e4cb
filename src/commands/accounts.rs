// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AccountBalance, AccountKind};
use crate::utils::{fmt_whole, get_currency_symbol, maybe_print_json, pretty_table};
use crate::{query, store};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind = sub.get_one::<String>("kind").unwrap().parse::<AccountKind>()?;
            store::create_account(conn, name, kind)?;
            println!("Added account '{}' ({})", name, kind);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            store::delete_account(conn, name)?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query::accounts_with_latest_balance(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No accounts yet. Add one with `networth account add`.");
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    for (title, kind) in [("Assets", AccountKind::Asset), ("Debts", AccountKind::Debt)] {
        println!("{}", title);
        let rows = rows_for_kind(&data, kind, &symbol);
        if rows.is_empty() {
            println!("  (none)");
        } else {
            println!("{}", pretty_table(&["Account", "Balance"], rows));
        }
    }
    Ok(())
}

pub fn rows_for_kind(data: &[AccountBalance], kind: AccountKind, symbol: &str) -> Vec<Vec<String>> {
    data.iter()
        .filter(|b| b.account.kind == kind)
        .map(|b| vec![b.account.name.clone(), fmt_whole(&b.latest, symbol)])
        .collect()
}
