// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::store::Store;
use crate::utils::{direction_label, fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = store.load();
    if !maybe_print_json(json_flag, jsonl_flag, &state.people)? {
        let rows: Vec<Vec<String>> = state
            .people
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    fmt_money(&p.total_given),
                    fmt_money(&p.total_received),
                    fmt_money(&p.balance),
                    p.last_interaction.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Given", "Received", "Balance", "Last"], rows)
        );
    }
    Ok(())
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = store.load();
    let Some(person) = state.people.iter().find(|p| p.name == *name) else {
        bail!("Contact '{}' not found", name);
    };
    if !maybe_print_json(json_flag, jsonl_flag, person)? {
        println!(
            "{}: given {}, received {}, balance {}, last interaction {}",
            person.name,
            fmt_money(&person.total_given),
            fmt_money(&person.total_received),
            fmt_money(&person.balance),
            person.last_interaction,
        );
        let rows: Vec<Vec<String>> = state
            .transactions
            .iter()
            .filter(|t| t.person_id == person.id)
            .map(|t| {
                vec![
                    t.date.to_string(),
                    direction_label(t.r#type).to_string(),
                    fmt_money(&t.amount),
                    t.occasion.label().to_string(),
                    t.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Occasion", "Notes"], rows)
        );
    }
    Ok(())
}
