//! Runner settings read from the environment.
//!
//! | variable                  | default                         |
//! |---------------------------|---------------------------------|
//! | `CUBE2048_WIDTH`          | 8                               |
//! | `CUBE2048_HEIGHT`         | 12                              |
//! | `CUBE2048_SEED`           | derived from the clock          |
//! | `CUBE2048_HIGHSCORE_PATH` | `$HOME/.cube2048_highscore.json` |
//! | `CUBE2048_LOG`            | unset (no logging)              |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::core::EngineConfig;

pub const ENV_WIDTH: &str = "CUBE2048_WIDTH";
pub const ENV_HEIGHT: &str = "CUBE2048_HEIGHT";
pub const ENV_SEED: &str = "CUBE2048_SEED";
pub const ENV_HIGHSCORE_PATH: &str = "CUBE2048_HIGHSCORE_PATH";
pub const ENV_LOG: &str = "CUBE2048_LOG";

const HIGHSCORE_FILE: &str = ".cube2048_highscore.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: EngineConfig,
    pub seed: u64,
    pub high_score_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = EngineConfig::default();
        let width = parse_var(&lookup, ENV_WIDTH)?.unwrap_or(defaults.width);
        let height = parse_var(&lookup, ENV_HEIGHT)?.unwrap_or(defaults.height);
        let engine = defaults.with_grid(width, height);
        engine
            .validate()
            .with_context(|| format!("invalid grid {}x{}", width, height))?;

        let seed = match parse_var(&lookup, ENV_SEED)? {
            Some(seed) => seed,
            None => clock_seed(),
        };

        let high_score_path = non_empty(&lookup, ENV_HIGHSCORE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                non_empty(&lookup, "HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(HIGHSCORE_FILE)
            });

        let log_path = non_empty(&lookup, ENV_LOG).map(PathBuf::from);

        Ok(Self {
            engine,
            seed,
            high_score_path,
            log_path,
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = non_empty(lookup, key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .with_context(|| format!("{}={:?} is not valid", key, raw))?;
    Ok(Some(value))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
