//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The default playfield is 8 columns by 12 rows:
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the spawn row)
//! - **Spawn position**: (`width / 2`, 0)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_INTERVAL_MS` | 800 | Drop interval of a fresh game |
//! | `MIN_DROP_INTERVAL_MS` | 200 | Floor for the drop interval |
//! | `SPEED_DECAY` | 0.95 | Interval multiplier applied after each settle |
//!
//! # Examples
//!
//! ```
//! use tui_cube2048_types::{GameAction, Tile, GRID_HEIGHT, GRID_WIDTH};
//!
//! let tile = Tile::new(8).unwrap();
//! assert_eq!(tile.doubled().unwrap().value(), 16);
//! assert!(Tile::new(6).is_none());
//!
//! assert!(GameAction::Restart.allowed_after_game_over());
//!
//! assert_eq!(GRID_WIDTH, 8);
//! assert_eq!(GRID_HEIGHT, 12);
//! ```

use std::fmt;
use std::num::NonZeroU32;

/// Default grid width in cells (8 columns)
pub const GRID_WIDTH: u16 = 8;

/// Default grid height in cells (12 rows)
pub const GRID_HEIGHT: u16 = 12;

/// Largest accepted grid dimension on either axis
pub const MAX_GRID_DIM: u16 = 64;

/// Drop interval of a freshly started game
pub const INITIAL_DROP_INTERVAL_MS: f64 = 800.0;

/// The drop interval never shrinks below this floor
pub const MIN_DROP_INTERVAL_MS: f64 = 200.0;

/// Interval multiplier applied after every settle
pub const SPEED_DECAY: f64 = 0.95;

/// Values a freshly spawned cube can carry (the four lowest denominations)
pub const SPAWN_VALUES: [u32; 4] = [2, 4, 8, 16];

/// Relative selection weights for [`SPAWN_VALUES`] (uniform)
pub const SPAWN_WEIGHTS: [u32; 4] = [1, 1, 1, 1];

/// Upper bound on the number of spawn candidates
pub const MAX_SPAWN_CANDIDATES: usize = 8;

/// A settled or falling cube value.
///
/// Only powers of two greater than or equal to 2 can be represented, so a
/// board made of `Tile`s can never hold 0, negative or odd values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(NonZeroU32);

impl Tile {
    /// Wrap `value` if it is a power of two `>= 2`.
    pub const fn new(value: u32) -> Option<Self> {
        if value < 2 || !value.is_power_of_two() {
            return None;
        }
        match NonZeroU32::new(value) {
            Some(v) => Some(Tile(v)),
            None => None,
        }
    }

    pub const fn value(self) -> u32 {
        self.0.get()
    }

    /// Base-2 exponent (2 -> 1, 4 -> 2, ...). Handy for colour lookups.
    pub const fn exponent(self) -> u32 {
        self.0.get().trailing_zeros()
    }

    /// The tile produced by merging two copies of `self`.
    ///
    /// Returns `None` once the value would overflow `u32`.
    pub fn doubled(self) -> Option<Self> {
        self.0.get().checked_mul(2).and_then(Tile::new)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(Tile)`: Cell holding a settled cube
pub type Cell = Option<Tile>;

/// Horizontal steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column offset applied by a move in this direction
    pub fn offset(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are the discrete intents delivered by the input driver. Each maps 1:1
/// to an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cube one column left
    MoveLeft,
    /// Move the cube one column right
    MoveRight,
    /// Advance the cube one row (settles when blocked)
    SoftDrop,
    /// Drop the cube to its landing row and settle it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Start a fresh game (keeps the high score)
    Restart,
}

impl GameAction {
    /// Whether the action is still meaningful after the game has ended.
    pub fn allowed_after_game_over(&self) -> bool {
        matches!(self, GameAction::Restart)
    }
}
