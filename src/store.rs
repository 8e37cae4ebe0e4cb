// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: accounts and their balance observations.
//!
//! Every function is a single explicit query against the connection and
//! returns plain value records. Traversal from an account to its
//! observations is always a separate call.

use crate::errors::{LedgerError, Result, is_constraint};
use crate::models::{Account, AccountKind, BalanceObservation};
use chrono::{Datelike, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ffi, params};
use rust_decimal::Decimal;
use tracing::debug;

pub fn create_account(conn: &Connection, name: &str, kind: AccountKind) -> Result<Account> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "Account name cannot be empty".to_string(),
        ));
    }
    match conn.execute(
        "INSERT INTO accounts(name, kind) VALUES (?1, ?2)",
        params![name, kind.as_str()],
    ) {
        Ok(_) => {}
        Err(e) if is_constraint(&e, ffi::SQLITE_CONSTRAINT_UNIQUE) => {
            return Err(LedgerError::AlreadyExists(format!("Account '{}'", name)));
        }
        Err(e) => return Err(e.into()),
    }
    let id = conn.last_insert_rowid();
    debug!(account = name, %kind, id, "account created");
    Ok(Account {
        id,
        name: name.to_string(),
        kind,
    })
}

/// Removes the account and, through the cascading foreign key, all of its
/// observations in the same statement.
pub fn delete_account(conn: &Connection, name: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
    if n == 0 {
        return Err(LedgerError::account_not_found(name));
    }
    debug!(account = name, "account deleted");
    Ok(())
}

pub fn get_account(conn: &Connection, name: &str) -> Result<Account> {
    conn.query_row(
        "SELECT id, name, kind FROM accounts WHERE name=?1",
        params![name],
        account_from_row,
    )
    .optional()?
    .ok_or_else(|| LedgerError::account_not_found(name))
}

/// Accounts in insertion order.
pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, name, kind FROM accounts ORDER BY id")?;
    let rows = stmt.query_map([], account_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn append_observation(
    conn: &Connection,
    account_name: &str,
    date: NaiveDate,
    amount: Decimal,
) -> Result<BalanceObservation> {
    let account = get_account(conn, account_name)?;
    append_for(conn, &account, date, amount)
}

/// Appends to an account already looked up. The foreign key still guards
/// against the account having been deleted in the meantime.
pub fn append_for(
    conn: &Connection,
    account: &Account,
    date: NaiveDate,
    amount: Decimal,
) -> Result<BalanceObservation> {
    check_storable_date(date)?;
    let account_name = account.name.as_str();
    match conn.execute(
        "INSERT INTO balance_observations(account_id, date, amount) VALUES (?1, ?2, ?3)",
        params![account.id, date.to_string(), amount.to_string()],
    ) {
        Ok(_) => {}
        Err(e) if is_constraint(&e, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
            return Err(LedgerError::InvariantViolation(format!(
                "account '{}' vanished while recording a balance",
                account_name
            )));
        }
        Err(e) => return Err(e.into()),
    }
    let id = conn.last_insert_rowid();
    debug!(account = account_name, %date, %amount, id, "observation appended");
    Ok(BalanceObservation {
        id,
        account_id: account.id,
        date,
        amount,
    })
}

/// Observations for one account, date ascending with ties in insertion
/// order. The existence check and the read are one statement.
pub fn observations_for(conn: &Connection, account_name: &str) -> Result<Vec<BalanceObservation>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, o.id, o.date, o.amount
         FROM accounts a
         LEFT JOIN balance_observations o ON o.account_id=a.id
         WHERE a.name=?1
         ORDER BY o.date, o.id",
    )?;
    let mut cur = stmt.query(params![account_name])?;
    let mut found = false;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        found = true;
        let account_id: i64 = r.get(0)?;
        // A lone NULL row means the account exists with no observations.
        if let Some(id) = r.get::<_, Option<i64>>(1)? {
            out.push(BalanceObservation {
                id,
                account_id,
                date: r.get(2)?,
                amount: decimal_at(r, 3)?,
            });
        }
    }
    if !found {
        return Err(LedgerError::account_not_found(account_name));
    }
    Ok(out)
}

/// Dates are stored as ISO text and compared as text, which only orders
/// correctly for four-digit years.
pub(crate) fn check_storable_date(date: NaiveDate) -> Result<()> {
    if (1..=9999).contains(&date.year()) {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!(
            "Date {} is outside the supported range 0001-01-01..9999-12-31",
            date
        )))
    }
}

fn account_from_row(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: kind_at(r, 2)?,
    })
}

pub(crate) fn kind_at(r: &Row<'_>, idx: usize) -> rusqlite::Result<AccountKind> {
    let s: String = r.get(idx)?;
    s.parse::<AccountKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Amounts are stored as decimal text.
pub(crate) fn decimal_at(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
