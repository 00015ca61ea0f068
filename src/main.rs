// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use debtclip::{cli, commands, db};

fn init_logging(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(Target::Stderr);
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("debt", sub)) => commands::debts::handle(&conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("oneoff", sub)) => commands::oneoffs::handle(&conn, sub)?,
        Some(("plan", sub)) => commands::plan::handle(&conn, sub)?,
        Some(("compare", sub)) => commands::compare::handle(&conn, sub)?,
        Some(("advise", sub)) => commands::advise::handle(&conn, sub)?,
        Some(("pay", sub)) => commands::payments::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
