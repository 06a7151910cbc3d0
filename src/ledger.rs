// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AppState, Occasion, Person, Transaction, TransactionType};

/// Opaque unique id for new transactions and first-seen contacts.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Rebuild the full aggregate view from a transaction log.
///
/// The log is stable-sorted newest-first (ties keep their relative order),
/// then grouped by `person_id` in a single pass over the sorted sequence.
/// Because the pass runs over the sorted order, recalculating an already
/// recalculated log is a no-op. A person's `name` and `last_interaction`
/// come from their most recent transaction: if a contact was renamed on a
/// later record, the newer name wins. A person with no transactions does
/// not appear at all.
pub fn recalculate(mut transactions: Vec<Transaction>) -> AppState {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let mut order: Vec<String> = Vec::new();
    let mut by_person: HashMap<String, Person> = HashMap::new();
    for tx in &transactions {
        let p = by_person.entry(tx.person_id.clone()).or_insert_with(|| {
            order.push(tx.person_id.clone());
            // First record seen is the most recent one, so name and
            // last_interaction are final at creation.
            Person {
                id: tx.person_id.clone(),
                name: tx.person_name.clone(),
                tags: Vec::new(),
                total_given: Decimal::ZERO,
                total_received: Decimal::ZERO,
                balance: Decimal::ZERO,
                last_interaction: tx.date,
            }
        });
        match tx.r#type {
            TransactionType::Give => p.total_given += tx.amount,
            TransactionType::Receive => p.total_received += tx.amount,
        }
        p.balance = p.total_received - p.total_given;
    }

    // People listed by most recent activity.
    let people = order
        .into_iter()
        .filter_map(|id| by_person.remove(&id))
        .collect();
    AppState {
        transactions,
        people,
    }
}

/// Everything a new transaction needs except its identity and creation time.
#[derive(Debug, Clone)]
pub struct Draft {
    pub r#type: TransactionType,
    pub person_id: Option<String>,
    pub person_name: String,
    pub amount: Decimal,
    pub date: chrono::NaiveDate,
    pub occasion: Occasion,
    pub notes: String,
    pub tags: Vec<String>,
}

/// Id of the existing contact with this display name, if any. Used so that
/// repeated entries for "Alice" share one stable `person_id`.
pub fn person_id_for_name<'a>(state: &'a AppState, name: &str) -> Option<&'a str> {
    state
        .people
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id.as_str())
}

pub fn add_transaction(state: &AppState, draft: Draft) -> AppState {
    let tx = Transaction {
        id: new_id(),
        r#type: draft.r#type,
        person_id: draft.person_id.unwrap_or_else(new_id),
        person_name: draft.person_name,
        amount: draft.amount,
        date: draft.date,
        occasion: draft.occasion,
        notes: draft.notes,
        tags: draft.tags,
        created_at: Utc::now(),
    };
    let mut all = state.transactions.clone();
    all.push(tx);
    recalculate(all)
}

/// Replace the transaction with the same id. The caller is responsible for
/// carrying over `created_at` and `person_id`; edits never reassign either.
pub fn update_transaction(state: &AppState, updated: Transaction) -> AppState {
    let all = state
        .transactions
        .iter()
        .map(|t| {
            if t.id == updated.id {
                updated.clone()
            } else {
                t.clone()
            }
        })
        .collect();
    recalculate(all)
}

pub fn delete_transaction(state: &AppState, id: &str) -> AppState {
    let all = state
        .transactions
        .iter()
        .filter(|t| t.id != id)
        .cloned()
        .collect();
    recalculate(all)
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is not valid JSON at all.
    #[error("backup is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// Valid JSON, but neither of the two known backup shapes.
    #[error("unrecognized backup format")]
    Format,
}

/// Parsed backup file: the incoming transaction batch plus any user tag
/// vocabulary it carries.
#[derive(Debug, Clone)]
pub struct Backup {
    pub transactions: Vec<Transaction>,
    pub custom_tags: Vec<String>,
}

/// Parse a backup in either of the two supported container shapes:
/// `{"transactions": [...]}` (current) or `{"payload": {"transactions":
/// [...]}}` (legacy wrapper). An optional top-level `customTags` array is
/// honored in both. Anything else is a format error. This is a closed list,
/// not a schema sniffer.
pub fn parse_backup(raw: &str) -> Result<Backup, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(ImportError::Parse)?;

    let custom_tags: Vec<String> = value
        .get("customTags")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let container = if value.get("transactions").is_some_and(Value::is_array) {
        value.get("transactions").cloned()
    } else {
        value
            .get("payload")
            .and_then(|p| p.get("transactions"))
            .filter(|t| t.is_array())
            .cloned()
    };
    let Some(raw_transactions) = container else {
        return Err(ImportError::Format);
    };
    let transactions: Vec<Transaction> =
        serde_json::from_value(raw_transactions).map_err(|_| ImportError::Format)?;
    Ok(Backup {
        transactions,
        custom_tags,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// New records were merged and the aggregates rebuilt.
    Merged {
        state: AppState,
        added: usize,
        custom_tags: Vec<String>,
    },
    /// Every incoming id already exists; nothing to apply, nothing to save.
    AllDuplicates { custom_tags: Vec<String> },
}

/// Merge an external backup into the current state.
///
/// Deduplication is by transaction id against the current state: an
/// incoming record whose id already exists is discarded, every other record
/// is kept, and the union is recalculated. Importing the same file twice is
/// therefore a no-op after the first time. Two records with different ids
/// but identical fields are distinct and both retained. On any error the
/// current state is untouched.
pub fn import_batch(current: &AppState, raw: &str) -> Result<ImportOutcome, ImportError> {
    let backup = parse_backup(raw)?;
    Ok(merge_backup(current, backup))
}

pub fn merge_backup(current: &AppState, backup: Backup) -> ImportOutcome {
    let existing: HashSet<&str> = current.transactions.iter().map(|t| t.id.as_str()).collect();
    let fresh: Vec<Transaction> = backup
        .transactions
        .into_iter()
        .filter(|t| !existing.contains(t.id.as_str()))
        .collect();
    if fresh.is_empty() {
        return ImportOutcome::AllDuplicates {
            custom_tags: backup.custom_tags,
        };
    }
    let added = fresh.len();
    let mut all = current.transactions.clone();
    all.extend(fresh);
    ImportOutcome::Merged {
        state: recalculate(all),
        added,
        custom_tags: backup.custom_tags,
    }
}
