//! Game state module - the data the engine owns
//!
//! [`GameState`] aggregates the board, the falling cube, scores and speed.
//! It holds no behaviour beyond lifecycle resets; all transitions go through
//! [`GridEngine`](crate::GridEngine).

use crate::board::Board;
use crate::config::EngineConfig;
use crate::types::Tile;

/// The falling cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
}

impl ActivePiece {
    /// Create a cube at the spawn cell (`width / 2`, 0)
    pub fn spawn(board_width: u16, tile: Tile) -> Self {
        Self {
            x: (board_width / 2) as i32,
            y: 0,
            tile,
        }
    }

    pub fn value(&self) -> u32 {
        self.tile.value()
    }

    /// Resting on the floor or on a settled tile
    pub fn is_grounded(&self, board: &Board) -> bool {
        !board.is_valid_position(self.x, self.y + 1)
    }

    /// Row this cube would settle in if dropped now
    pub fn landing_y(&self, board: &Board) -> i32 {
        board.landing_row(self.x, self.y)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) active: Option<ActivePiece>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) game_over: bool,
    pub(crate) paused: bool,
    pub(crate) drop_interval_ms: f64,
    /// Pieces settled in the current game
    pub(crate) settles: u32,
}

impl GameState {
    /// Fresh game: empty board, no cube, score 0.
    pub fn new(config: &EngineConfig, high_score: u32) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            active: None,
            score: 0,
            high_score,
            game_over: false,
            paused: false,
            drop_interval_ms: config.initial_drop_interval_ms,
            settles: 0,
        }
    }

    /// Replace everything but the high score.
    pub(crate) fn reset(&mut self, config: &EngineConfig) {
        *self = Self::new(config, self.high_score);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    pub fn settles(&self) -> u32 {
        self.settles
    }

    /// Neither paused nor finished; the drop timer runs
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Whether time- and input-driven moves are currently accepted
    pub fn accepts_moves(&self) -> bool {
        self.playable() && self.active.is_some()
    }

    /// Game-over screen condition: the final score is the record
    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }
}
