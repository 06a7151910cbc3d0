// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("DATE")
            .help("Only records on or after this date (YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("DATE")
            .help("Only records on or before this date (YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("occasion")
            .long("occasion")
            .value_name("OCCASION")
            .help("Only records with this occasion"),
    )
    .arg(
        Arg::new("tag")
            .long("tag")
            .value_name("TAG")
            .help("Only records carrying this tag"),
    )
    .arg(
        Arg::new("person")
            .long("person")
            .value_name("NAME")
            .help("Only records for this contact"),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect gift transactions")
        .subcommand(
            Command::new("add")
                .about("Record a gift")
                .arg(
                    Arg::new("person")
                        .long("person")
                        .required(true)
                        .value_name("NAME")
                        .help("Counterparty; an existing contact with this name is reused"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["give", "receive"])
                        .help("Direction relative to you"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_name("AMOUNT"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATE")
                        .help("Event date, YYYY-MM-DD (default: today)"),
                )
                .arg(
                    Arg::new("occasion")
                        .long("occasion")
                        .default_value("other")
                        .help("Occasion, e.g. birthday, wedding, festival"),
                )
                .arg(Arg::new("notes").long("notes").value_name("TEXT"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .value_name("TAG")
                        .help("Free-form label; repeatable"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_name("YYYY-MM")
                        .help("Only this calendar month"),
                )
                .arg(Arg::new("person").long("person").value_name("NAME"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Edit a recorded gift (id and creation time are kept)")
                .arg(Arg::new("id").long("id").required(true).value_name("ID"))
                .arg(
                    Arg::new("person")
                        .long("person")
                        .value_name("NAME")
                        .help("New display name for this record's counterparty"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["give", "receive"]),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .allow_hyphen_values(true)
                        .value_name("AMOUNT"),
                )
                .arg(Arg::new("date").long("date").value_name("DATE"))
                .arg(Arg::new("occasion").long("occasion"))
                .arg(Arg::new("notes").long("notes").value_name("TEXT"))
                .arg(
                    Arg::new("tag")
                        .long("tag")
                        .action(ArgAction::Append)
                        .value_name("TAG")
                        .help("Replacement tag set; repeatable"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a recorded gift")
                .arg(Arg::new("id").long("id").required(true).value_name("ID")),
        )
}

fn people_cmd() -> Command {
    Command::new("people")
        .about("Derived contact directory")
        .subcommand(json_flags(
            Command::new("list").about("All contacts with totals and balances"),
        ))
        .subcommand(json_flags(
            Command::new("show")
                .about("One contact with their transaction history")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .value_name("NAME"),
                ),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Rankings, concentration, and breakdowns")
        .subcommand(json_flags(
            Command::new("summary").about("Overall totals, archetype, and concentration"),
        ))
        .subcommand(json_flags(filter_args(
            Command::new("top")
                .about("Contacts ranked by total gift volume")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .default_value("10"),
                ),
        )))
        .subcommand(json_flags(filter_args(
            Command::new("occasions").about("Total amount per occasion"),
        )))
}

fn tags_cmd() -> Command {
    Command::new("tags")
        .about("User-defined tag vocabulary")
        .subcommand(Command::new("list"))
        .subcommand(
            Command::new("add").arg(
                Arg::new("name")
                    .long("name")
                    .required(true)
                    .value_name("TAG"),
            ),
        )
        .subcommand(
            Command::new("rm").arg(
                Arg::new("name")
                    .long("name")
                    .required(true)
                    .value_name("TAG"),
            ),
        )
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Merge a backup file into the ledger (duplicates skipped)")
        .subcommand(
            Command::new("backup").arg(
                Arg::new("path")
                    .long("path")
                    .required(true)
                    .value_name("FILE"),
            ),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Write the ledger out").subcommand(
        Command::new("backup")
            .arg(
                Arg::new("format")
                    .long("format")
                    .required(true)
                    .value_name("json|csv"),
            )
            .arg(
                Arg::new("out")
                    .long("out")
                    .required(true)
                    .value_name("FILE"),
            ),
    )
}

pub fn build_cli() -> Command {
    Command::new("renqing")
        .version(crate_version!())
        .about("Personal gift ledger: track reciprocal gift-giving with balances and rankings")
        .subcommand(Command::new("init").about("Initialize the ledger store"))
        .subcommand(tx_cmd())
        .subcommand(people_cmd())
        .subcommand(report_cmd())
        .subcommand(tags_cmd())
        .subcommand(import_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Audit the persisted ledger for inconsistencies"))
        .subcommand(
            Command::new("clear")
                .about("Delete all ledger data and tags")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the wipe"),
                ),
        )
}
