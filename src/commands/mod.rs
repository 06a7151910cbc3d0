// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod people;
pub mod reports;
pub mod tags;
pub mod transactions;
