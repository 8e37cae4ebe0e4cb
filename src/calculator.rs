// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Net worth as of now: the sum of each account's latest observation.
//!
//! "Latest" is the observation with the greatest date; among several on
//! that date, the one inserted last (highest id) wins.

use crate::errors::{LedgerError, Result};
use crate::models::BalanceObservation;
use crate::store::decimal_at;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Correlated subquery yielding the id of the latest observation for the
/// account bound as `acct`.
pub(crate) const LATEST_OBSERVATION_ID: &str = "(SELECT i.id FROM balance_observations i
      WHERE i.account_id = acct.id
      ORDER BY i.date DESC, i.id DESC LIMIT 1)";

pub fn current_net_worth(conn: &Connection) -> Result<Decimal> {
    let sql = format!(
        "SELECT o.amount
         FROM accounts acct
         JOIN balance_observations o ON o.id = {}",
        LATEST_OBSERVATION_ID
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query([])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = cur.next()? {
        total = total.checked_add(decimal_at(r, 0)?).ok_or_else(|| {
            LedgerError::InvalidInput("Net worth exceeds the representable range".to_string())
        })?;
    }
    Ok(total)
}

/// In-memory counterpart of the latest-observation rule.
pub fn select_latest(observations: &[BalanceObservation]) -> Option<&BalanceObservation> {
    observations.iter().max_by_key(|o| (o.date, o.id))
}
