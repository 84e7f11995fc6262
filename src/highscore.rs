//! High-score persistence for the terminal runner.
//!
//! The record is a one-field JSON object keyed by [`HIGH_SCORE_KEY`]. The
//! engine never reads it: the runner loads it once, passes it to the engine,
//! and writes back whatever new record a settle proposes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fixed identifier the record is stored under
pub const HIGH_SCORE_KEY: &str = "cube2048HighScore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct Record {
    #[serde(rename = "cube2048HighScore")]
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<u32>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let record: Record = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(record.high_score))
    }

    /// Stored record, or 0 when missing or unreadable.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable high score");
                0
            }
        }
    }

    /// Persist `high_score`, replacing the file atomically.
    pub fn save(&self, high_score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_vec(&Record { high_score })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
