// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::store::Store;
use crate::utils::pretty_table;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            register(store, std::slice::from_ref(name))?;
            println!("Added tag '{}'", name);
        }
        Some(("list", _)) => {
            let tags = store.load_tags();
            let data = tags.into_iter().map(|t| vec![t]).collect();
            println!("{}", pretty_table(&["Tag"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let tags: Vec<String> = store
                .load_tags()
                .into_iter()
                .filter(|t| t != name)
                .collect();
            store.save_tags(&tags)?;
            println!("Removed tag '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

/// Add any not-yet-known tags to the library, preserving insertion order.
/// Used directly by `tx add`/`tx update` and the importer so the vocabulary
/// grows as the user types.
pub fn register(store: &Store, new: &[String]) -> Result<()> {
    let mut tags = store.load_tags();
    let mut changed = false;
    for tag in new {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.clone());
            changed = true;
        }
    }
    if changed {
        store.save_tags(&tags)?;
    }
    Ok(())
}
