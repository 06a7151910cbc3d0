// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::ledger::{self, Draft};
use crate::models::AppState;
use crate::store::Store;
use crate::utils::{
    direction_label, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_direction,
    parse_month, parse_occasion, pretty_table,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let person_name = sub.get_one::<String>("person").unwrap().trim().to_string();
    if person_name.is_empty() {
        bail!("Person name must not be empty");
    }
    let direction = parse_direction(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount.is_sign_negative() {
        bail!("Amount must be non-negative, got {}", amount);
    }
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let occasion = parse_occasion(sub.get_one::<String>("occasion").unwrap())?;
    let notes = sub.get_one::<String>("notes").cloned().unwrap_or_default();
    let tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let state = store.load();
    // Same display name means same contact: keep the person_id stable.
    let person_id = ledger::person_id_for_name(&state, &person_name).map(str::to_string);
    let new_state = ledger::add_transaction(
        &state,
        Draft {
            r#type: direction,
            person_id,
            person_name: person_name.clone(),
            amount,
            date,
            occasion,
            notes,
            tags: tags.clone(),
        },
    );
    store.save(&new_state)?;
    crate::commands::tags::register(store, &tags)?;
    println!(
        "Recorded {} {} for '{}' on {} ({})",
        direction_label(direction),
        fmt_money(&amount),
        person_name,
        date,
        occasion.label()
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = store.load();
    let data = query_rows(&state, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.direction.clone(),
                    r.person.clone(),
                    r.amount.clone(),
                    r.occasion.clone(),
                    r.notes.clone(),
                    r.tags.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Person", "Amount", "Occasion", "Notes", "Tags", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub direction: String,
    pub person: String,
    pub amount: String,
    pub occasion: String,
    pub notes: String,
    pub tags: String,
}

pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };
    let person = sub.get_one::<String>("person");
    let limit = sub.get_one::<usize>("limit").copied();

    // state.transactions is already newest first
    let mut data = Vec::new();
    for tx in &state.transactions {
        if let Some(ref m) = month {
            if !tx.date.to_string().starts_with(m.as_str()) {
                continue;
            }
        }
        if let Some(p) = person {
            if tx.person_name != *p && tx.person_id != *p {
                continue;
            }
        }
        data.push(TransactionRow {
            id: tx.id.clone(),
            date: tx.date.to_string(),
            direction: direction_label(tx.r#type).to_string(),
            person: tx.person_name.clone(),
            amount: tx.amount.to_string(),
            occasion: tx.occasion.label().to_string(),
            notes: tx.notes.clone(),
            tags: tx.tags.join(";"),
        });
        if let Some(l) = limit {
            if data.len() == l {
                break;
            }
        }
    }
    Ok(data)
}

fn update(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let state = store.load();
    let Some(existing) = state.transactions.iter().find(|t| t.id == *id) else {
        bail!("Transaction '{}' not found", id);
    };

    // id, person_id and created_at are carried over untouched.
    let mut updated = existing.clone();
    if let Some(name) = sub.get_one::<String>("person") {
        let name = name.trim();
        if name.is_empty() {
            bail!("Person name must not be empty");
        }
        updated.person_name = name.to_string();
    }
    if let Some(t) = sub.get_one::<String>("type") {
        updated.r#type = parse_direction(t)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        let amount = parse_decimal(a)?;
        if amount.is_sign_negative() {
            bail!("Amount must be non-negative, got {}", amount);
        }
        updated.amount = amount;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        updated.date = parse_date(d)?;
    }
    if let Some(o) = sub.get_one::<String>("occasion") {
        updated.occasion = parse_occasion(o)?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        updated.notes = n.clone();
    }
    if let Some(tags) = sub.get_many::<String>("tag") {
        updated.tags = tags.cloned().collect();
    }

    let tags = updated.tags.clone();
    let new_state = ledger::update_transaction(&state, updated);
    store.save(&new_state)?;
    crate::commands::tags::register(store, &tags)?;
    println!("Updated transaction '{}'", id);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let state = store.load();
    if !state.transactions.iter().any(|t| t.id == *id) {
        bail!("Transaction '{}' not found", id);
    }
    let new_state = ledger::delete_transaction(&state, id);
    store.save(&new_state)?;
    println!("Removed transaction '{}'", id);
    Ok(())
}
