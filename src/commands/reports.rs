// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TransactionType;
use crate::stats::{self, ReportFilter};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_occasion, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("top", sub)) => top(store, sub)?,
        Some(("occasions", sub)) => occasions(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn filter_from_args(sub: &clap::ArgMatches) -> Result<ReportFilter> {
    let mut filter = ReportFilter::default();
    if let Some(s) = sub.get_one::<String>("from") {
        filter.from = Some(parse_date(s)?);
    }
    if let Some(s) = sub.get_one::<String>("to") {
        filter.to = Some(parse_date(s)?);
    }
    if let Some(s) = sub.get_one::<String>("occasion") {
        filter.occasion = Some(parse_occasion(s)?);
    }
    filter.tag = sub.get_one::<String>("tag").cloned();
    filter.person = sub.get_one::<String>("person").cloned();
    Ok(filter)
}

#[derive(Serialize)]
struct Summary {
    records: usize,
    contacts: usize,
    total_given: String,
    total_received: String,
    net: String,
    archetype: String,
    top10_concentration_pct: u32,
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let state = store.load();

    let mut given = Decimal::ZERO;
    let mut received = Decimal::ZERO;
    for tx in &state.transactions {
        match tx.r#type {
            TransactionType::Give => given += tx.amount,
            TransactionType::Receive => received += tx.amount,
        }
    }
    let today = chrono::Utc::now().date_naive();
    let archetype = stats::archetype(&state.transactions, today);
    let all: Vec<_> = state.transactions.iter().collect();
    let ranked = stats::rank_contacts(&all);
    let concentration = stats::concentration(&ranked, 10);

    let data = Summary {
        records: state.transactions.len(),
        contacts: state.people.len(),
        total_given: given.round_dp(2).to_string(),
        total_received: received.round_dp(2).to_string(),
        net: (received - given).round_dp(2).to_string(),
        archetype: archetype.label().to_string(),
        top10_concentration_pct: concentration,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = vec![
            vec!["Records".into(), data.records.to_string()],
            vec!["Contacts".into(), data.contacts.to_string()],
            vec!["Given".into(), fmt_money(&given)],
            vec!["Received".into(), fmt_money(&received)],
            vec!["Net".into(), fmt_money(&(received - given))],
            vec!["Archetype".into(), data.archetype.clone()],
            vec![
                "Top-10 concentration".into(),
                format!("{}%", data.top10_concentration_pct),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn top(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&10);
    let filter = filter_from_args(sub)?;
    let state = store.load();

    let filtered = filter.apply(&state.transactions);
    let ranked = stats::rank_contacts(&filtered);
    let total_volume: Decimal = ranked.iter().map(|c| c.total).sum();
    let top: Vec<_> = ranked.into_iter().take(limit).collect();

    if !maybe_print_json(json_flag, jsonl_flag, &top)? {
        let mut rows = Vec::new();
        for (i, c) in top.iter().enumerate() {
            let share = if total_volume.is_zero() {
                Decimal::ZERO
            } else {
                (c.total / total_volume * Decimal::from(100)).round()
            };
            rows.push(vec![
                (i + 1).to_string(),
                c.name.clone(),
                fmt_money(&c.total),
                fmt_money(&c.given),
                fmt_money(&c.received),
                format!("{}%", share),
            ]);
        }
        println!(
            "{}",
            pretty_table(&["#", "Name", "Total", "Given", "Received", "Share"], rows)
        );
    }
    Ok(())
}

fn occasions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = filter_from_args(sub)?;
    let state = store.load();

    let filtered = filter.apply(&state.transactions);
    let breakdown = stats::occasion_breakdown(&filtered);
    let data: Vec<Vec<String>> = breakdown
        .iter()
        .map(|(occ, amt)| vec![occ.label().to_string(), amt.round_dp(2).to_string()])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Occasion", "Amount"], data));
    }
    Ok(())
}
