// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use renqing::{cli, commands, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = store::Store::open()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            store.save(&store.load())?;
            println!("Ledger initialized at {}", store.ledger_path().display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("people", sub)) => commands::people::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("tags", sub)) => commands::tags::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        Some(("clear", sub)) => {
            if sub.get_flag("yes") {
                store.clear()?;
                println!("All ledger data removed");
            } else {
                println!("Refusing to clear without --yes");
            }
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
