// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{Occasion, Transaction, TransactionType};

/// Filter panel for the report commands. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub occasion: Option<Occasion>,
    pub tag: Option<String>,
    pub person: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(from) = self.from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.date > to {
                return false;
            }
        }
        if let Some(occ) = self.occasion {
            if tx.occasion != occ {
                return false;
            }
        }
        if let Some(ref tag) = self.tag {
            if !tx.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(ref person) = self.person {
            if tx.person_name != *person && tx.person_id != *person {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Per-contact gift volume, both directions.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactVolume {
    pub person_id: String,
    pub name: String,
    pub given: Decimal,
    pub received: Decimal,
    pub total: Decimal,
}

/// Contacts ranked by total volume (given + received), descending.
pub fn rank_contacts(transactions: &[&Transaction]) -> Vec<ContactVolume> {
    let mut order: Vec<String> = Vec::new();
    let mut agg: HashMap<String, ContactVolume> = HashMap::new();
    for tx in transactions {
        let entry = agg.entry(tx.person_id.clone()).or_insert_with(|| {
            order.push(tx.person_id.clone());
            ContactVolume {
                person_id: tx.person_id.clone(),
                name: tx.person_name.clone(),
                given: Decimal::ZERO,
                received: Decimal::ZERO,
                total: Decimal::ZERO,
            }
        });
        match tx.r#type {
            TransactionType::Give => entry.given += tx.amount,
            TransactionType::Receive => entry.received += tx.amount,
        }
        entry.total += tx.amount;
    }
    let mut ranked: Vec<ContactVolume> = order
        .into_iter()
        .filter_map(|id| agg.remove(&id))
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}

/// Share of total volume attributable to the top `top_n` contacts, as a
/// rounded percentage. Zero when there is no volume at all.
pub fn concentration(ranked: &[ContactVolume], top_n: usize) -> u32 {
    let total: Decimal = ranked.iter().map(|c| c.total).sum();
    if total.is_zero() {
        return 0;
    }
    let top: Decimal = ranked.iter().take(top_n).map(|c| c.total).sum();
    (top / total * Decimal::from(100))
        .round()
        .to_u32()
        .unwrap_or(0)
}

/// Total amount per occasion, descending.
pub fn occasion_breakdown(transactions: &[&Transaction]) -> Vec<(Occasion, Decimal)> {
    let mut agg: HashMap<Occasion, Decimal> = HashMap::new();
    for tx in transactions {
        *agg.entry(tx.occasion).or_insert(Decimal::ZERO) += tx.amount;
    }
    let mut items: Vec<(Occasion, Decimal)> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    items
}

/// Coarse classification of the owner's overall gift flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// No activity in the last twelve months.
    Dormant,
    /// Received and given roughly balance (ratio within [0.8, 1.2]).
    Balanced,
    /// Net inflow: received clearly exceeds given.
    Inflow,
    /// Net outflow: given clearly exceeds received.
    Outflow,
}

impl Archetype {
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Dormant => "休眠型 (Dormant)",
            Archetype::Balanced => "储蓄型 (Balanced)",
            Archetype::Inflow => "净流入型 (Inflow)",
            Archetype::Outflow => "净流出型 (Outflow)",
        }
    }
}

pub fn archetype(transactions: &[Transaction], today: NaiveDate) -> Archetype {
    let cutoff = today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    if !transactions.is_empty() && !transactions.iter().any(|t| t.date > cutoff) {
        return Archetype::Dormant;
    }

    let mut given = Decimal::ZERO;
    let mut received = Decimal::ZERO;
    for tx in transactions {
        match tx.r#type {
            TransactionType::Give => given += tx.amount,
            TransactionType::Receive => received += tx.amount,
        }
    }
    if given.is_zero() {
        return if received.is_zero() {
            Archetype::Balanced
        } else {
            Archetype::Inflow
        };
    }
    let ratio = received / given;
    if ratio >= Decimal::new(8, 1) && ratio <= Decimal::new(12, 1) {
        Archetype::Balanced
    } else if ratio > Decimal::new(12, 1) {
        Archetype::Inflow
    } else {
        Archetype::Outflow
    }
}
