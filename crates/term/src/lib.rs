//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer that is then
//! flushed to the terminal with diffing.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Show each cube with its value on the classic 2048 palette
//! - Keep per-frame work allocation-free once the framebuffer is sized

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_cube2048_core as core;
pub use tui_cube2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_style, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
