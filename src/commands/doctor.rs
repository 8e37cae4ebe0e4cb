// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = diagnose(conn, Local::now().date_naive())?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn diagnose(conn: &Connection, today: NaiveDate) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Observations whose account is gone (the cascade should make this impossible)
    let mut stmt = conn.prepare(
        "SELECT o.id, o.account_id FROM balance_observations o
         LEFT JOIN accounts a ON a.id=o.account_id
         WHERE a.id IS NULL ORDER BY o.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let account_id: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_observation".into(),
            format!("observation {} -> account {}", id, account_id),
        ]);
    }

    // 2) Accounts that count as zero because nothing was ever recorded
    let mut stmt2 = conn.prepare(
        "SELECT a.name FROM accounts a
         WHERE NOT EXISTS (SELECT 1 FROM balance_observations o WHERE o.account_id=a.id)
         ORDER BY a.id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let name: String = r.get(0)?;
        rows.push(vec!["account_without_balance".into(), name]);
    }

    // 3) Future-dated observations; they already win the latest selection
    let mut stmt3 = conn.prepare(
        "SELECT a.name, o.date FROM balance_observations o
         JOIN accounts a ON a.id=o.account_id
         WHERE o.date > ?1 ORDER BY o.date, o.id",
    )?;
    let mut cur3 = stmt3.query(params![today.to_string()])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let date: String = r.get(1)?;
        rows.push(vec!["future_observation".into(), format!("{} {}", name, date)]);
    }

    Ok(rows)
}
