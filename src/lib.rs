//! Falling-cube 2048 for the terminal (workspace facade crate).
//!
//! The simulation, input mapping and rendering live in dedicated crates under
//! `crates/` and are re-exported here as `tui_cube2048::{core,input,term,types}`.
//! This crate adds the runner-side collaborators: environment settings,
//! high-score persistence and log setup.

pub mod highscore;
pub mod logging;
pub mod settings;

pub use tui_cube2048_core as core;
pub use tui_cube2048_input as input;
pub use tui_cube2048_term as term;
pub use tui_cube2048_types as types;
