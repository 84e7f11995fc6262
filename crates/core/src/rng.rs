//! RNG module - weighted spawn-value selection
//!
//! The engine never touches a global random source. It owns an injected
//! [`RngCore`] and draws spawn values through a [`SpawnTable`], so a seeded
//! generator reproduces the exact same cube sequence.

use arrayvec::ArrayVec;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::types::{Tile, MAX_SPAWN_CANDIDATES};

/// Generator used when the caller only supplies a seed
pub type DefaultRng = ChaCha8Rng;

/// Deterministic generator for the given seed
pub fn seeded_rng(seed: u64) -> DefaultRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Candidate spawn values and their selection weights
#[derive(Debug, Clone)]
pub struct SpawnTable {
    tiles: ArrayVec<Tile, MAX_SPAWN_CANDIDATES>,
    index: WeightedIndex<u32>,
}

impl SpawnTable {
    pub fn new(values: &[u32], weights: &[u32]) -> Result<Self> {
        if values.len() != weights.len() {
            return Err(EngineError::Config(format!(
                "{} spawn values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        if values.len() > MAX_SPAWN_CANDIDATES {
            return Err(EngineError::Config(format!(
                "at most {} spawn candidates are supported",
                MAX_SPAWN_CANDIDATES
            )));
        }

        let mut tiles = ArrayVec::new();
        for &value in values {
            tiles.push(Tile::new(value).ok_or(EngineError::InvalidTile(value))?);
        }
        let index = WeightedIndex::new(weights)
            .map_err(|e| EngineError::Config(format!("spawn weights: {}", e)))?;

        Ok(Self { tiles, index })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(&config.spawn_values, &config.spawn_weights)
    }

    /// Draw the value of the next cube
    pub fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> Tile {
        self.tiles[self.index.sample(rng)]
    }

    pub fn candidates(&self) -> &[Tile] {
        &self.tiles
    }
}
