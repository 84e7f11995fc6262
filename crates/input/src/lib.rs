//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Each key press
//! yields at most one intent; key repeat and release handling are left to the
//! terminal.

pub mod map;

pub use tui_cube2048_types as types;

pub use map::{action_for_key, handle_key_event, should_quit};
