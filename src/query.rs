// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only projections for the CLI and other presentation code. Each
//! projection is a single statement, so it sees one consistent state.

use crate::calculator::LATEST_OBSERVATION_ID;
use crate::errors::{LedgerError, Result};
use crate::models::{Account, AccountBalance, HistoryPoint, NetWorthSnapshot};
use crate::store::{decimal_at, kind_at, observations_for};
use chrono::{Months, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Every account with its latest amount (zero when it has none).
pub fn accounts_with_latest_balance(conn: &Connection) -> Result<Vec<AccountBalance>> {
    let sql = format!(
        "SELECT acct.id, acct.name, acct.kind, o.amount
         FROM accounts acct
         LEFT JOIN balance_observations o ON o.id = {}
         ORDER BY acct.id",
        LATEST_OBSERVATION_ID
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let latest = match r.get::<_, Option<String>>(3)? {
            Some(_) => decimal_at(r, 3)?,
            None => Decimal::ZERO,
        };
        out.push(AccountBalance {
            account: Account {
                id: r.get(0)?,
                name: r.get(1)?,
                kind: kind_at(r, 2)?,
            },
            latest,
        });
    }
    Ok(out)
}

pub fn balance_history(conn: &Connection, account_name: &str) -> Result<Vec<HistoryPoint>> {
    Ok(observations_for(conn, account_name)?
        .into_iter()
        .map(|o| HistoryPoint {
            date: o.date,
            amount: o.amount,
        })
        .collect())
}

/// Snapshot history, date ascending.
pub fn net_worth_history(conn: &Connection) -> Result<Vec<NetWorthSnapshot>> {
    let mut stmt = conn.prepare("SELECT date, total FROM networth_snapshots ORDER BY date")?;
    let rows = stmt.query_map([], |r| {
        Ok(NetWorthSnapshot {
            date: r.get(0)?,
            total: decimal_at(r, 1)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Months(u32),
    All,
}

impl FromStr for Timeframe {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Timeframe::Months(1)),
            "3m" => Ok(Timeframe::Months(3)),
            "6m" => Ok(Timeframe::Months(6)),
            "all" => Ok(Timeframe::All),
            other => Err(LedgerError::InvalidInput(format!(
                "Unknown range '{}', expected 1m|3m|6m|all",
                other
            ))),
        }
    }
}

/// Entries on or after `latest recorded date - months`, anchored on the
/// newest snapshot rather than today.
pub fn net_worth_window(conn: &Connection, range: Timeframe) -> Result<Vec<NetWorthSnapshot>> {
    let history = net_worth_history(conn)?;
    let Timeframe::Months(months) = range else {
        return Ok(history);
    };
    let Some(last) = history.last() else {
        return Ok(history);
    };
    let cutoff = window_start(last.date, months);
    Ok(history.into_iter().filter(|s| s.date >= cutoff).collect())
}

fn window_start(last: NaiveDate, months: u32) -> NaiveDate {
    last.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Change from the first entry of the window to `current`.
pub fn net_worth_change(window: &[NetWorthSnapshot], current: Decimal) -> Decimal {
    window
        .first()
        .map(|s| current - s.total)
        .unwrap_or(Decimal::ZERO)
}
