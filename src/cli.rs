// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn filter_args() -> [Arg; 4] {
    [
        Arg::new("kind")
            .long("kind")
            .value_parser(["income", "expense"])
            .help("Only income or only expenses"),
        Arg::new("category")
            .long("category")
            .help("Only this category (by name)"),
        Arg::new("from")
            .long("from")
            .help("On or after this day (YYYY-MM-DD)"),
        Arg::new("to")
            .long("to")
            .help("On or before this day (YYYY-MM-DD); ignored if before --from"),
    ]
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("icon").long("icon").required(true))
                .arg(Arg::new("color").long("color").required(true)),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("edit")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true)))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD or RFC 3339; defaults to now"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("uncategorize")
                        .long("uncategorize")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("category"),
                )
                .arg(Arg::new("date").long("date")),
        )
        .subcommand(
            Command::new("rm").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("list")
                .args(filter_args())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(clap::crate_version!())
        .about("Track income and expenses, filter history and see where the money goes")
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(
            Command::new("summary")
                .about("Totals, balance and expenses by category")
                .args(filter_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .args(filter_args()),
            ),
        )
        .subcommand(
            Command::new("fx")
                .about("Approximate USD exchange rates")
                .subcommand(Command::new("rates").args(json_args()))
                .subcommand(
                    Command::new("convert")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
}
