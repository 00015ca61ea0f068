// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::HARD_MAX_MONTHS;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};

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

/// Per-run overrides of the stored plan settings.
fn plan_overrides() -> [Arg; 5] {
    [
        Arg::new("strategy")
            .long("strategy")
            .value_parser(["snowball", "avalanche"])
            .help("Payoff order for this run"),
        Arg::new("extra")
            .long("extra")
            .help("Extra amount paid every month"),
        Arg::new("one_time")
            .long("one-time")
            .help("One-time extra applied before the first month"),
        Arg::new("start")
            .long("start")
            .help("First plan month (YYYY-MM)"),
        Arg::new("max_months")
            .long("max-months")
            .value_parser(month_cap_parser())
            .help("Stop projecting after this many months"),
    ]
}

fn month_cap_parser() -> clap::builder::RangedI64ValueParser<u32> {
    value_parser!(u32).range(1..=i64::from(HARD_MAX_MONTHS))
}

fn debt_name() -> Arg {
    Arg::new("name").long("name").required(true)
}

pub fn build_cli() -> Command {
    Command::new("debtclip")
        .version(crate_version!())
        .about("Debt payoff planner: snowball and avalanche projections from your terminal")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("debt")
                .about("Manage debts")
                .subcommand(
                    Command::new("add")
                        .about("Add a debt")
                        .arg(debt_name())
                        .arg(Arg::new("balance").long("balance").required(true))
                        .arg(
                            Arg::new("apr")
                                .long("apr")
                                .required(true)
                                .help("Annual percentage rate, e.g. 19.99"),
                        )
                        .arg(
                            Arg::new("min_payment")
                                .long("min-payment")
                                .required(true),
                        )
                        .arg(
                            Arg::new("exclude")
                                .long("exclude")
                                .action(ArgAction::SetTrue)
                                .help("Track the debt without paying it down"),
                        ),
                )
                .subcommand(
                    Command::new("set")
                        .about("Update a debt")
                        .arg(debt_name())
                        .arg(Arg::new("balance").long("balance"))
                        .arg(Arg::new("apr").long("apr"))
                        .arg(Arg::new("min_payment").long("min-payment")),
                )
                .subcommand(Command::new("list").about("List debts").args(json_args()))
                .subcommand(Command::new("rm").about("Remove a debt").arg(debt_name()))
                .subcommand(
                    Command::new("include")
                        .about("Include a debt in the plan")
                        .arg(debt_name()),
                )
                .subcommand(
                    Command::new("exclude")
                        .about("Leave a debt out of the plan")
                        .arg(debt_name()),
                ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("debts")
                    .about("Import debts from CSV (name,balance,apr,min_payment[,included])")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Stored plan settings")
                .subcommand(
                    Command::new("set")
                        .about("Change plan settings")
                        .arg(
                            Arg::new("strategy")
                                .long("strategy")
                                .value_parser(["snowball", "avalanche"]),
                        )
                        .arg(Arg::new("extra").long("extra"))
                        .arg(Arg::new("one_time").long("one-time"))
                        .arg(Arg::new("start").long("start").help("YYYY-MM"))
                        .arg(
                            Arg::new("max_months")
                                .long("max-months")
                                .value_parser(month_cap_parser()),
                        ),
                )
                .subcommand(Command::new("show").about("Show plan settings").args(json_args())),
        )
        .subcommand(
            Command::new("oneoff")
                .about("Ad-hoc payments in a future month")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("plan")
                .about("Project the payoff plan")
                .subcommand(
                    Command::new("summary")
                        .about("Payoff order and totals")
                        .args(plan_overrides())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("schedule")
                        .about("Month-by-month payments")
                        .args(plan_overrides())
                        .arg(Arg::new("debt").long("debt").help("Only this debt"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("calendar")
                        .about("Scheduled payments per month next to logged payments")
                        .args(plan_overrides())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("chart")
                        .about("Remaining balance over time and per-debt shares")
                        .args(plan_overrides())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare the plan against an alternative")
                .arg(
                    Arg::new("against")
                        .long("against")
                        .value_parser(["minimum", "strategy"])
                        .default_value("strategy"),
                )
                .args(plan_overrides())
                .args(json_args()),
        )
        .subcommand(
            Command::new("advise")
                .about("Recommendations and alerts for the current plan")
                .args(plan_overrides())
                .args(json_args()),
        )
        .subcommand(
            Command::new("pay")
                .about("Payment log")
                .subcommand(
                    Command::new("log")
                        .about("Record a payment you made")
                        .arg(Arg::new("debt").long("debt").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("schedule")
                    .about("Export the payment schedule")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .args(plan_overrides()),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored debts and settings"))
}
