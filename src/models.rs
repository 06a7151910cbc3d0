// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Direction of a gift relative to the ledger owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Give,
    Receive,
}

/// Closed vocabulary of social occasions. Stored as the Chinese display
/// label the original app wrote; unknown labels fall back to `Other` so an
/// old backup never fails to parse over a single exotic occasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Occasion {
    Birthday,
    FullMoon,
    Wedding,
    Housewarming,
    Academic,
    Festival,
    VisitSick,
    Dinner,
    Other,
}

impl Occasion {
    pub const ALL: [Occasion; 9] = [
        Occasion::Birthday,
        Occasion::FullMoon,
        Occasion::Wedding,
        Occasion::Housewarming,
        Occasion::Academic,
        Occasion::Festival,
        Occasion::VisitSick,
        Occasion::Dinner,
        Occasion::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "生日",
            Occasion::FullMoon => "满月宴",
            Occasion::Wedding => "婚礼",
            Occasion::Housewarming => "乔迁新房",
            Occasion::Academic => "升学宴",
            Occasion::Festival => "节日",
            Occasion::VisitSick => "生病探望",
            Occasion::Dinner => "请客吃饭",
            Occasion::Other => "其他",
        }
    }

    /// ASCII slug used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Occasion::Birthday => "birthday",
            Occasion::FullMoon => "full-moon",
            Occasion::Wedding => "wedding",
            Occasion::Housewarming => "housewarming",
            Occasion::Academic => "academic",
            Occasion::Festival => "festival",
            Occasion::VisitSick => "visit-sick",
            Occasion::Dinner => "dinner",
            Occasion::Other => "other",
        }
    }

    pub fn from_label(s: &str) -> Occasion {
        Occasion::ALL
            .into_iter()
            .find(|o| o.label() == s)
            .unwrap_or(Occasion::Other)
    }
}

impl Serialize for Occasion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Occasion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Occasion::from_label(&s))
    }
}

/// One gift event. Immutable once created except through an explicit edit,
/// which must preserve `id` and `created_at`. Wire names are camelCase so
/// backups exported by earlier versions of the app round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub r#type: TransactionType,
    pub person_id: String,
    pub person_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub occasion: Occasion,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A contact, fully derived from the transaction log and never stored as an
/// independent source of truth. `balance` is positive when the owner has
/// received more than they gave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub total_given: Decimal,
    pub total_received: Decimal,
    pub balance: Decimal,
    pub last_interaction: NaiveDate,
}

/// Aggregate root: the transaction log (newest first) plus the derived
/// people view. `people` must always equal `recalculate(transactions)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub people: Vec<Person>,
}
