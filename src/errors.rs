// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by the ledger store, calculator, recorder and queries.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] rusqlite::Error),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    pub fn account_not_found(name: &str) -> Self {
        LedgerError::NotFound(format!("Account '{}'", name))
    }

    /// Message shown to the person driving the CLI. Storage problems are
    /// reported generically; nothing was changed when they occur.
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::NotFound(_)
            | LedgerError::AlreadyExists(_)
            | LedgerError::InvalidInput(_) => self.to_string(),
            LedgerError::StorageFailure(_) | LedgerError::InvariantViolation(_) => {
                "Ledger is temporarily unavailable, please try again later".to_string()
            }
        }
    }
}

/// True when the sqlite error is a constraint violation of the given kind
/// (`SQLITE_CONSTRAINT_UNIQUE`, `SQLITE_CONSTRAINT_FOREIGNKEY`, ...).
pub(crate) fn is_constraint(err: &rusqlite::Error, extended: i32) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation && e.extended_code == extended
        }
        _ => false,
    }
}
