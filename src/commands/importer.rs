// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs;

use crate::ledger::{self, ImportOutcome};
use crate::store::Store;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(store, sub),
        _ => Ok(()),
    }
}

fn import_backup(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = fs::read_to_string(path).with_context(|| format!("Read backup {}", path))?;

    let state = store.load();
    // Parse and merge are pure; nothing is persisted unless records were
    // actually added, so a failed import can never partially apply.
    match ledger::import_batch(&state, &raw)? {
        ImportOutcome::Merged {
            state: new_state,
            added,
            custom_tags,
        } => {
            store.save(&new_state)?;
            crate::commands::tags::register(store, &custom_tags)?;
            println!("Imported {} new record(s) from {}", added, path);
        }
        ImportOutcome::AllDuplicates { custom_tags } => {
            // The tag vocabulary still merges, matching the original app.
            crate::commands::tags::register(store, &custom_tags)?;
            println!("Nothing new to import: every record already exists");
        }
    }
    Ok(())
}
