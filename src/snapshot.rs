// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily net-worth snapshots.
//!
//! The primary key on `networth_snapshots.date` is what keeps one row per
//! day. The lookup before the insert only saves the net-worth computation
//! when the day is already recorded; a racing writer that gets past it
//! still loses at the `ON CONFLICT DO NOTHING` insert and reports `Skipped`.

use crate::calculator::current_net_worth;
use crate::errors::{LedgerError, Result};
use crate::models::{NetWorthSnapshot, SnapshotOutcome};
use crate::store::{check_storable_date, decimal_at};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

pub fn record_snapshot_for_today(conn: &mut Connection, today: NaiveDate) -> Result<SnapshotOutcome> {
    check_storable_date(today)?;
    if snapshot_for(conn, today)?.is_some() {
        return Ok(SnapshotOutcome::Skipped);
    }

    // Immediate: the total is computed under the write lock, so it matches
    // the ledger state at the moment the row lands.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let total = current_net_worth(&tx)?;
    let inserted = tx.execute(
        "INSERT INTO networth_snapshots(date, total) VALUES (?1, ?2)
         ON CONFLICT(date) DO NOTHING",
        params![today.to_string(), total.to_string()],
    )?;
    let outcome = match inserted {
        0 => SnapshotOutcome::Skipped,
        1 => SnapshotOutcome::Created(NetWorthSnapshot { date: today, total }),
        n => {
            return Err(LedgerError::InvariantViolation(format!(
                "{} snapshot rows written for {}",
                n, today
            )));
        }
    };
    tx.commit()?;
    Ok(outcome)
}

pub fn snapshot_for(conn: &Connection, date: NaiveDate) -> Result<Option<NetWorthSnapshot>> {
    let snap = conn
        .query_row(
            "SELECT date, total FROM networth_snapshots WHERE date=?1",
            params![date.to_string()],
            |r| {
                Ok(NetWorthSnapshot {
                    date: r.get(0)?,
                    total: decimal_at(r, 1)?,
                })
            },
        )
        .optional()?;
    Ok(snap)
}
