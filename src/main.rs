// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;

use networth::errors::LedgerError;
use networth::{cli, commands, db, logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LedgerError>() {
                Some(e) => {
                    tracing::debug!(error = %e, "ledger operation rejected");
                    eprintln!("Error: {}", e.user_message());
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init_tracing(matches.get_one::<PathBuf>("log-file").map(PathBuf::as_path))?;

    let db_flag = matches.get_one::<PathBuf>("db").map(PathBuf::as_path);
    let mut conn = db::open_or_init(db_flag)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(db_flag)?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("balance", sub)) => commands::balances::handle(&conn, sub)?,
        Some(("networth", sub)) => commands::networth::handle(&conn, sub)?,
        Some(("snapshot", sub)) => {
            commands::snapshot::handle(&mut conn, sub)?;
        }
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
