// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::query::net_worth_history;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("networth", sub)) => export_networth(conn, sub),
        _ => Ok(()),
    }
}

fn export_networth(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let history = net_worth_history(conn)?;
    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["date", "total_net_worth"])?;
        for snap in &history {
            wtr.write_record([snap.date.to_string(), snap.total.to_string()])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = history
            .iter()
            .map(|s| json!({ "date": s.date.to_string(), "total_net_worth": s.total.to_string() }))
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} snapshots to {}", history.len(), out);
    Ok(())
}
