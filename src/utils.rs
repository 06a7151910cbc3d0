// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::{Occasion, TransactionType};

pub const CURRENCY_SYMBOL: &str = "¥";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Accepts the CLI slug or the Chinese label.
pub fn parse_occasion(s: &str) -> Result<Occasion> {
    Occasion::ALL
        .into_iter()
        .find(|o| o.slug() == s || o.label() == s)
        .ok_or_else(|| anyhow!("Unknown occasion '{}' (use e.g. birthday, wedding, other)", s))
}

pub fn parse_direction(s: &str) -> Result<TransactionType> {
    match s {
        "give" | "GIVE" | "送出" => Ok(TransactionType::Give),
        "receive" | "RECEIVE" | "收到" => Ok(TransactionType::Receive),
        _ => Err(anyhow!("Unknown direction '{}' (use give or receive)", s)),
    }
}

/// Display string for a direction, matching the original app's labels.
pub fn direction_label(t: TransactionType) -> &'static str {
    match t {
        TransactionType::Give => "送出",
        TransactionType::Receive => "收到",
    }
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{}{}", CURRENCY_SYMBOL, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
