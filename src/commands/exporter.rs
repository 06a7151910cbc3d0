// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::models::{AppState, Person, Transaction};
use crate::store::Store;
use crate::utils::direction_label;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => export_backup(store, sub),
        _ => Ok(()),
    }
}

/// Full-state JSON backup, importable again via shape A.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupOut<'a> {
    transactions: &'a [Transaction],
    people: &'a [Person],
    custom_tags: &'a [String],
}

fn export_backup(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let state = store.load();
    match fmt.as_str() {
        "json" => write_json(store, &state, out)?,
        "csv" => write_csv(&state, out)?,
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported ledger to {}", out);
    Ok(())
}

fn write_json(store: &Store, state: &AppState, out: &str) -> Result<()> {
    let tags = store.load_tags();
    let payload = BackupOut {
        transactions: &state.transactions,
        people: &state.people,
        custom_tags: &tags,
    };
    std::fs::write(out, serde_json::to_string_pretty(&payload)?)
        .with_context(|| format!("Write backup {}", out))?;
    Ok(())
}

fn write_csv(state: &AppState, out: &str) -> Result<()> {
    let mut file = File::create(out).with_context(|| format!("Create {}", out))?;
    // UTF-8 BOM so spreadsheet apps pick up the Chinese labels correctly.
    file.write_all("\u{feff}".as_bytes())?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["Date", "Type", "Person", "Amount", "Occasion", "Notes", "Tags"])?;
    for tx in &state.transactions {
        wtr.write_record([
            tx.date.to_string(),
            direction_label(tx.r#type).to_string(),
            tx.person_name.clone(),
            tx.amount.to_string(),
            tx.occasion.label().to_string(),
            tx.notes.clone(),
            tx.tags.join(";"),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
