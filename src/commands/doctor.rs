// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::collections::HashSet;

use crate::ledger;
use crate::store::Store;
use crate::utils::pretty_table;

/// Audit the persisted blob. The running app always recomputes aggregates,
/// so issues found here indicate a file written by something else or an
/// older buggy version, not live corruption.
pub fn handle(store: &Store) -> Result<()> {
    let mut rows = Vec::new();

    let Some(raw) = store.load_raw() else {
        println!("✅ doctor: no persisted ledger (empty state)");
        return Ok(());
    };

    // 1) Duplicate transaction ids break dedup on import
    let mut seen: HashSet<&str> = HashSet::new();
    for tx in &raw.transactions {
        if !seen.insert(tx.id.as_str()) {
            rows.push(vec!["duplicate_tx_id".into(), tx.id.clone()]);
        }
    }

    // 2) Field-level problems
    for tx in &raw.transactions {
        if tx.amount.is_sign_negative() {
            rows.push(vec![
                "negative_amount".into(),
                format!("{} {}", tx.id, tx.amount),
            ]);
        }
        if tx.person_name.trim().is_empty() {
            rows.push(vec!["blank_person_name".into(), tx.id.clone()]);
        }
    }

    // 3) Balance invariant inside the persisted people cache
    for p in &raw.people {
        if p.balance != p.total_received - p.total_given {
            rows.push(vec![
                "balance_mismatch".into(),
                format!(
                    "{}: balance {} != {} - {}",
                    p.name, p.balance, p.total_received, p.total_given
                ),
            ]);
        }
    }

    // 4) Stale people cache: the persisted derived view no longer matches
    //    a recomputation of the log
    let recomputed = ledger::recalculate(raw.transactions.clone());
    if recomputed.people != raw.people {
        rows.push(vec![
            "stale_people_cache".into(),
            format!(
                "persisted {} contact(s), recomputed {}",
                raw.people.len(),
                recomputed.people.len()
            ),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
