// Copyright (c) 2025 Renqing Ledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ledger;
use crate::models::AppState;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.renqingledger", "Renqing", "renqing"));

const LEDGER_FILE: &str = "ledger.json";
const TAGS_FILE: &str = "tags.json";

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Whole-blob persistence: one JSON file for the ledger, one for the user
/// tag vocabulary. Every mutation rewrites the relevant file wholesale, so
/// the effective discipline is last-writer-wins per save. A single active
/// session is assumed; two concurrent writers can lose a write.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open() -> Result<Self> {
        Ok(Store { dir: data_dir()? })
    }

    /// Store rooted at an explicit directory. Tests point this at a tempdir.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Store {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join(LEDGER_FILE)
    }

    pub fn tags_path(&self) -> PathBuf {
        self.dir.join(TAGS_FILE)
    }

    /// Load the ledger. Missing or unparseable data yields the empty state;
    /// this never fails. The persisted `people` cache is ignored and the
    /// aggregates are always recomputed from the transaction log, so a
    /// stale cache can never drift into view.
    pub fn load(&self) -> AppState {
        match self.load_raw() {
            Some(state) => ledger::recalculate(state.transactions),
            None => AppState::default(),
        }
    }

    /// The blob exactly as persisted, people cache included. Only `doctor`
    /// should care about this.
    pub fn load_raw(&self) -> Option<AppState> {
        let raw = fs::read_to_string(self.ledger_path()).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create data dir")?;
        let json = serde_json::to_string(state)?;
        fs::write(self.ledger_path(), json)
            .with_context(|| format!("Write ledger at {}", self.ledger_path().display()))?;
        Ok(())
    }

    pub fn load_tags(&self) -> Vec<String> {
        let Ok(raw) = fs::read_to_string(self.tags_path()) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn save_tags(&self, tags: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create data dir")?;
        let json = serde_json::to_string(tags)?;
        fs::write(self.tags_path(), json)
            .with_context(|| format!("Write tags at {}", self.tags_path().display()))?;
        Ok(())
    }

    /// Remove both files. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        for path in [self.ledger_path(), self.tags_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Remove {}", path.display()));
                }
            }
        }
        Ok(())
    }
}
