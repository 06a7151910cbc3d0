// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use renqing::ledger::{self, Draft};
use renqing::models::{Occasion, Transaction, TransactionType};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn tx(
    id: &str,
    person_id: &str,
    name: &str,
    direction: TransactionType,
    amount: i64,
    date: &str,
) -> Transaction {
    Transaction {
        id: id.into(),
        r#type: direction,
        person_id: person_id.into(),
        person_name: name.into(),
        amount: Decimal::from(amount),
        date: d(date),
        occasion: Occasion::Other,
        notes: String::new(),
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn single_give_produces_negative_balance() {
    let state = ledger::recalculate(vec![tx(
        "t1",
        "p1",
        "Alice",
        TransactionType::Give,
        100,
        "2024-01-01",
    )]);
    assert_eq!(state.people.len(), 1);
    let p = &state.people[0];
    assert_eq!(p.id, "p1");
    assert_eq!(p.total_given, Decimal::from(100));
    assert_eq!(p.total_received, Decimal::ZERO);
    assert_eq!(p.balance, Decimal::from(-100));
    assert_eq!(p.last_interaction, d("2024-01-01"));
}

#[test]
fn give_and_receive_aggregate_per_person() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 100, "2024-01-01"),
        tx("t2", "p1", "Alice", TransactionType::Receive, 40, "2024-02-01"),
    ]);
    let p = &state.people[0];
    assert_eq!(p.total_given, Decimal::from(100));
    assert_eq!(p.total_received, Decimal::from(40));
    assert_eq!(p.balance, Decimal::from(-60));
    assert_eq!(p.last_interaction, d("2024-02-01"));
}

#[test]
fn delete_reverses_the_aggregate() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 100, "2024-01-01"),
        tx("t2", "p1", "Alice", TransactionType::Receive, 40, "2024-02-01"),
    ]);
    let state = ledger::delete_transaction(&state, "t1");
    let p = &state.people[0];
    assert_eq!(p.total_given, Decimal::ZERO);
    assert_eq!(p.total_received, Decimal::from(40));
    assert_eq!(p.balance, Decimal::from(40));
}

#[test]
fn person_vanishes_with_their_last_transaction() {
    let state = ledger::recalculate(vec![tx(
        "t1",
        "p1",
        "Alice",
        TransactionType::Give,
        100,
        "2024-01-01",
    )]);
    let state = ledger::delete_transaction(&state, "t1");
    assert!(state.people.is_empty());
    assert!(state.transactions.is_empty());
}

#[test]
fn recalculate_is_idempotent() {
    let input = vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 100, "2024-03-01"),
        tx("t2", "p2", "Bob", TransactionType::Receive, 50, "2024-01-15"),
        tx("t3", "p1", "Alice", TransactionType::Receive, 20, "2024-02-01"),
        tx("t4", "p2", "Bob", TransactionType::Give, 80, "2024-02-01"),
    ];
    let once = ledger::recalculate(input);
    let twice = ledger::recalculate(once.transactions.clone());
    assert_eq!(once, twice);
}

#[test]
fn transactions_sorted_newest_first() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 10, "2024-01-01"),
        tx("t2", "p1", "Alice", TransactionType::Give, 10, "2024-03-01"),
        tx("t3", "p1", "Alice", TransactionType::Give, 10, "2024-02-01"),
    ]);
    let dates: Vec<String> = state
        .transactions
        .iter()
        .map(|t| t.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
}

#[test]
fn balance_invariant_holds_for_every_person() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 100, "2024-01-01"),
        tx("t2", "p1", "Alice", TransactionType::Receive, 300, "2024-01-05"),
        tx("t3", "p2", "Bob", TransactionType::Give, 88, "2024-02-02"),
        tx("t4", "p3", "Chen", TransactionType::Receive, 200, "2024-02-20"),
        tx("t5", "p3", "Chen", TransactionType::Give, 200, "2024-03-01"),
    ]);
    for p in &state.people {
        assert_eq!(p.balance, p.total_received - p.total_given);
    }
}

#[test]
fn renamed_contact_shows_most_recent_name() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "A. Wang", TransactionType::Give, 10, "2024-01-01"),
        tx("t2", "p1", "Wang Anna", TransactionType::Give, 10, "2024-05-01"),
    ]);
    assert_eq!(state.people[0].name, "Wang Anna");
    // The older record keeps its denormalized copy
    assert_eq!(state.transactions[1].person_name, "A. Wang");
}

#[test]
fn people_ordered_by_most_recent_activity() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 10, "2024-01-01"),
        tx("t2", "p2", "Bob", TransactionType::Give, 10, "2024-06-01"),
    ]);
    let names: Vec<&str> = state.people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Alice"]);
}

#[test]
fn add_transaction_assigns_fresh_id_and_keeps_person_id() {
    let state = ledger::recalculate(vec![tx(
        "t1",
        "p1",
        "Alice",
        TransactionType::Give,
        100,
        "2024-01-01",
    )]);
    let draft = Draft {
        r#type: TransactionType::Receive,
        person_id: Some("p1".into()),
        person_name: "Alice".into(),
        amount: Decimal::from(40),
        date: d("2024-02-01"),
        occasion: Occasion::Birthday,
        notes: String::new(),
        tags: vec![],
    };
    let state = ledger::add_transaction(&state, draft);
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.people.len(), 1);
    let new_tx = state.transactions.iter().find(|t| t.id != "t1").unwrap();
    assert_eq!(new_tx.person_id, "p1");
    assert!(!new_tx.id.is_empty());
}

#[test]
fn update_replaces_only_the_matching_record() {
    let state = ledger::recalculate(vec![
        tx("t1", "p1", "Alice", TransactionType::Give, 100, "2024-01-01"),
        tx("t2", "p1", "Alice", TransactionType::Give, 50, "2024-02-01"),
    ]);
    let mut edited = state
        .transactions
        .iter()
        .find(|t| t.id == "t1")
        .unwrap()
        .clone();
    edited.amount = Decimal::from(10);
    let state = ledger::update_transaction(&state, edited);
    let p = &state.people[0];
    assert_eq!(p.total_given, Decimal::from(60));
    assert_eq!(p.balance, Decimal::from(-60));
}
