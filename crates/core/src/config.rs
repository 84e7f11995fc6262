//! Engine configuration.
//!
//! Defaults reproduce the classic game: 8x12 grid, 800ms initial drop
//! interval shrinking by 5% per settle down to 200ms, and spawn values
//! {2, 4, 8, 16} picked uniformly.

use arrayvec::ArrayVec;

use crate::error::{EngineError, Result};
use crate::types::{
    Tile, GRID_HEIGHT, GRID_WIDTH, INITIAL_DROP_INTERVAL_MS, MAX_GRID_DIM,
    MAX_SPAWN_CANDIDATES, MIN_DROP_INTERVAL_MS, SPAWN_VALUES, SPAWN_WEIGHTS, SPEED_DECAY,
};

/// Tunables for a [`GridEngine`](crate::GridEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Grid width in cells
    pub width: u16,
    /// Grid height in cells
    pub height: u16,
    /// Drop interval of a fresh game
    pub initial_drop_interval_ms: f64,
    /// Floor for the drop interval
    pub min_drop_interval_ms: f64,
    /// Multiplier applied to the interval after each settle
    pub speed_decay: f64,
    /// Candidate spawn values
    pub spawn_values: ArrayVec<u32, MAX_SPAWN_CANDIDATES>,
    /// Relative weight of each candidate (same length as `spawn_values`)
    pub spawn_weights: ArrayVec<u32, MAX_SPAWN_CANDIDATES>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            initial_drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
            min_drop_interval_ms: MIN_DROP_INTERVAL_MS,
            speed_decay: SPEED_DECAY,
            spawn_values: SPAWN_VALUES.into_iter().collect(),
            spawn_weights: SPAWN_WEIGHTS.into_iter().collect(),
        }
    }
}

impl EngineConfig {
    pub fn with_grid(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_drop_intervals(mut self, initial_ms: f64, min_ms: f64) -> Self {
        self.initial_drop_interval_ms = initial_ms;
        self.min_drop_interval_ms = min_ms;
        self
    }

    pub fn with_speed_decay(mut self, decay: f64) -> Self {
        self.speed_decay = decay;
        self
    }

    /// Replace the spawn table with `(value, weight)` pairs.
    pub fn with_spawn_candidates(mut self, candidates: &[(u32, u32)]) -> Result<Self> {
        if candidates.len() > MAX_SPAWN_CANDIDATES {
            return Err(EngineError::Config(format!(
                "at most {} spawn candidates are supported, got {}",
                MAX_SPAWN_CANDIDATES,
                candidates.len()
            )));
        }
        self.spawn_values = candidates.iter().map(|&(v, _)| v).collect();
        self.spawn_weights = candidates.iter().map(|&(_, w)| w).collect();
        Ok(self)
    }

    /// Check every field; the engine refuses to start with a config that fails here.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::Config("grid must be at least 1x1".into()));
        }
        if self.width > MAX_GRID_DIM || self.height > MAX_GRID_DIM {
            return Err(EngineError::Config(format!(
                "grid {}x{} exceeds the {}x{} limit",
                self.width, self.height, MAX_GRID_DIM, MAX_GRID_DIM
            )));
        }

        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(self.initial_drop_interval_ms)
            || !finite_positive(self.min_drop_interval_ms)
        {
            return Err(EngineError::Config("drop intervals must be positive".into()));
        }
        if self.min_drop_interval_ms > self.initial_drop_interval_ms {
            return Err(EngineError::Config(format!(
                "minimum interval {}ms exceeds initial interval {}ms",
                self.min_drop_interval_ms, self.initial_drop_interval_ms
            )));
        }
        if !(self.speed_decay > 0.0 && self.speed_decay <= 1.0) {
            return Err(EngineError::Config(format!(
                "speed decay {} must be in (0, 1]",
                self.speed_decay
            )));
        }

        if self.spawn_values.is_empty() {
            return Err(EngineError::Config("spawn table is empty".into()));
        }
        if self.spawn_values.len() != self.spawn_weights.len() {
            return Err(EngineError::Config(format!(
                "{} spawn values but {} weights",
                self.spawn_values.len(),
                self.spawn_weights.len()
            )));
        }
        for &value in &self.spawn_values {
            if Tile::new(value).is_none() {
                return Err(EngineError::InvalidTile(value));
            }
        }
        if self.spawn_weights.iter().all(|&w| w == 0) {
            return Err(EngineError::Config("spawn weights are all zero".into()));
        }
        Ok(())
    }
}
