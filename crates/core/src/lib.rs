//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, input devices or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised by unit tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Synchronous**: Every call runs its whole cascade before returning
//!
//! # Module Structure
//!
//! - [`board`]: the cube grid with the collision predicate
//! - [`cascade`]: gravity and merge resolution after a landing
//! - [`config`]: grid size, speed curve and spawn table
//! - [`engine`]: [`GridEngine`], the only place state changes
//! - [`game_state`]: the data the engine owns
//! - [`rng`]: weighted spawn-value selection over an injected generator
//! - [`scoring`]: merge points, high score and drop speed
//! - [`snapshot`]: immutable copies for renderers
//!
//! # Game Rules
//!
//! - A single cube spawns at the top center carrying 2, 4, 8 or 16
//! - It can be steered left/right and falls one row per drop interval
//! - On landing, floating tiles fall, then vertically adjacent equal tiles
//!   merge bottom-up into their double, repeating until nothing changes
//! - Each merge scores the value of the new tile
//! - The drop interval shrinks by 5% per landing, down to 200ms
//! - The game ends when a tile rests in the top row after a cascade
//!
//! # Example
//!
//! ```
//! use tui_cube2048_core::{EngineConfig, GridEngine};
//! use tui_cube2048_types::GameAction;
//!
//! let mut game = GridEngine::new(EngineConfig::default(), 0, 12345).unwrap();
//! game.start().unwrap();
//!
//! game.apply_action(GameAction::MoveLeft).unwrap();
//! let outcome = game.apply_action(GameAction::HardDrop).unwrap();
//!
//! let report = outcome.settled().unwrap();
//! assert_eq!((report.x, report.y), (3, 11));
//! assert!(!game.game_over());
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_cube2048_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{apply_gravity, merge_scan, resolve, settle, CascadeResult};
pub use config::EngineConfig;
pub use engine::{ActionOutcome, GridEngine, MoveOutcome, SettleReport, StepOutcome};
pub use error::{EngineError, Result};
pub use game_state::{ActivePiece, GameState};
pub use rng::{seeded_rng, DefaultRng, SpawnTable};
pub use scoring::{apply_gain, drop_interval_after, next_drop_interval_ms, ScoreUpdate};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
