// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use renqing::store::Store;
use renqing::{cli, commands::transactions};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn run_tx(store: &Store, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["renqing", "tx"];
    full.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(full);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(store, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn add_records_and_derives_person() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "100", "--date",
            "2024-01-01", "--occasion", "birthday",
        ],
    )
    .unwrap();

    let state = store.load();
    assert_eq!(state.transactions.len(), 1);
    let p = &state.people[0];
    assert_eq!(p.name, "Alice");
    assert_eq!(p.total_given, Decimal::from(100));
    assert_eq!(p.balance, Decimal::from(-100));
}

#[test]
fn same_name_reuses_person_id() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "100", "--date",
            "2024-01-01",
        ],
    )
    .unwrap();
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "receive", "--amount", "40", "--date",
            "2024-02-01",
        ],
    )
    .unwrap();

    let state = store.load();
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.people.len(), 1);
    assert_eq!(
        state.transactions[0].person_id,
        state.transactions[1].person_id
    );
    let p = &state.people[0];
    assert_eq!(p.balance, Decimal::from(-60));
    assert_eq!(p.last_interaction.to_string(), "2024-02-01");
}

#[test]
fn add_rejects_negative_amount_without_saving() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    let res = run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "-5", "--date",
            "2024-01-01",
        ],
    );
    assert!(res.is_err());
    assert!(store.load().transactions.is_empty());
}

#[test]
fn add_rejects_blank_person_name() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    let res = run_tx(
        &store,
        &[
            "add", "--person", "   ", "--type", "give", "--amount", "5", "--date", "2024-01-01",
        ],
    );
    assert!(res.is_err());
    assert!(store.load().transactions.is_empty());
}

#[test]
fn add_registers_new_tags_in_the_library() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "100", "--date",
            "2024-01-01", "--tag", "同事", "--tag", "大学",
        ],
    )
    .unwrap();
    assert_eq!(store.load_tags(), vec!["同事", "大学"]);
}

#[test]
fn list_limit_respected_newest_first() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    for day in ["2025-01-01", "2025-01-02", "2025-01-03"] {
        run_tx(
            &store,
            &[
                "add", "--person", "Alice", "--type", "give", "--amount", "10", "--date", day,
            ],
        )
        .unwrap();
    }

    let state = store.load();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["renqing", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&state, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_month() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    for day in ["2025-01-15", "2025-02-15"] {
        run_tx(
            &store,
            &[
                "add", "--person", "Alice", "--type", "give", "--amount", "10", "--date", day,
            ],
        )
        .unwrap();
    }

    let state = store.load();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["renqing", "tx", "list", "--month", "2025-02"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&state, list_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].date, "2025-02-15");
        }
    }
}

#[test]
fn update_preserves_identity_and_creation_time() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "100", "--date",
            "2024-01-01",
        ],
    )
    .unwrap();
    let before = store.load().transactions[0].clone();

    run_tx(
        &store,
        &["update", "--id", &before.id, "--amount", "60", "--person", "Wang Anna"],
    )
    .unwrap();

    let after = store.load().transactions[0].clone();
    assert_eq!(after.id, before.id);
    assert_eq!(after.person_id, before.person_id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.amount, Decimal::from(60));
    assert_eq!(after.person_name, "Wang Anna");
    assert_eq!(store.load().people[0].name, "Wang Anna");
}

#[test]
fn rm_deletes_and_unknown_id_errors() {
    let dir = tempdir().unwrap();
    let store = Store::at(dir.path());
    run_tx(
        &store,
        &[
            "add", "--person", "Alice", "--type", "give", "--amount", "100", "--date",
            "2024-01-01",
        ],
    )
    .unwrap();
    let id = store.load().transactions[0].id.clone();

    assert!(run_tx(&store, &["rm", "--id", "no-such-id"]).is_err());
    run_tx(&store, &["rm", "--id", &id]).unwrap();

    let state = store.load();
    assert!(state.transactions.is_empty());
    assert!(state.people.is_empty());
}
