// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

pub fn build_cli() -> Command {
    Command::new("networth")
        .version(crate_version!())
        .about("Track account balances and a daily net-worth history")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("SQLite database path (default: $NETWORTH_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Also append log output to this file"),
        )
        .subcommand(Command::new("init").about("Create the database if needed and print its path"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Account name"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["asset", "debt"])
                                .help("asset or debt"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Accounts with their latest balance"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account and its balance history")
                        .arg(required("name", "Account name")),
                ),
        )
        .subcommand(
            Command::new("balance")
                .about("Record and inspect balances")
                .subcommand(
                    Command::new("set")
                        .about("Record a balance observation")
                        .arg(required("account", "Account name"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Balance amount, negative allowed"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("history")
                        .about("Balance observations for one account")
                        .arg(required("account", "Account name")),
                )),
        )
        .subcommand(
            Command::new("networth")
                .about("Net worth reports")
                .subcommand(
                    Command::new("show")
                        .about("Current net worth")
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(json_flags(
                    Command::new("history")
                        .about("Recorded daily snapshots")
                        .arg(
                            Arg::new("range")
                                .long("range")
                                .default_value("all")
                                .help("1m|3m|6m|all"),
                        ),
                )),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Record today's net worth (run once a day from a scheduler)")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (default: today)"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("networth")
                        .about("Export snapshot history")
                        .arg(required("format", "csv|json"))
                        .arg(required("out", "Output file")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check ledger consistency"))
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-symbol")
                        .about("Currency symbol used when printing amounts")
                        .arg(Arg::new("symbol").required(true)),
                ),
        )
}
