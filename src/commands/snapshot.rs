// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Scheduler entry point. Retries are left to whatever invokes this
//! (cron, systemd timer); a failed run changes nothing.

use crate::models::SnapshotOutcome;
use crate::snapshot::{record_snapshot_for_today, snapshot_for};
use crate::utils::parse_date;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use tracing::{error, info, warn};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<SnapshotOutcome> {
    let today = match m.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    info!("Starting net worth snapshot process");
    let outcome = take_snapshot(conn, today);
    info!("Snapshot process completed");
    outcome
}

fn take_snapshot(conn: &mut Connection, today: NaiveDate) -> Result<SnapshotOutcome> {
    info!(%today, "Taking net worth snapshot");
    let recorded = record_snapshot_for_today(conn, today);
    report_outcome(conn, today, recorded)
}

/// Logs the recorder's result. Only a failed recording is an error; a
/// skipped day stays a success even if the existing row cannot be re-read.
pub fn report_outcome(
    conn: &Connection,
    today: NaiveDate,
    recorded: crate::errors::Result<SnapshotOutcome>,
) -> Result<SnapshotOutcome> {
    let outcome = match recorded {
        Ok(o) => o,
        Err(e) => {
            error!(%today, error = %e, "Error recording snapshot");
            return Err(e.into());
        }
    };
    match &outcome {
        SnapshotOutcome::Created(snap) => {
            info!(date = %snap.date, total = %snap.total, "Recorded net worth snapshot");
        }
        SnapshotOutcome::Skipped => match snapshot_for(conn, today) {
            Ok(Some(existing)) => {
                info!(%today, total = %existing.total, "Snapshot already exists");
            }
            Ok(None) => info!(%today, "Snapshot already exists"),
            Err(e) => warn!(%today, error = %e, "Snapshot already exists; could not read it back"),
        },
    }
    Ok(outcome)
}
