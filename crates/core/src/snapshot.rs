use crate::game_state::{ActivePiece, GameState};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub x: i32,
    pub y: i32,
    pub value: u32,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            x: value.x,
            y: value.y,
            value: value.value(),
        }
    }
}

/// Immutable view of a game for renderers.
///
/// `board` is row-major with `0` for empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub board: Vec<u32>,
    pub active: Option<ActiveSnapshot>,
    /// Row the active cube would land in
    pub landing_y: Option<i32>,
    pub score: u32,
    pub high_score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: f64,
    pub settles: u32,
}

impl GameSnapshot {
    pub(crate) fn fill_from(&mut self, state: &GameState) {
        let board = state.board();
        self.width = board.width();
        self.height = board.height();
        board.write_values(&mut self.board);
        self.active = state.active().map(ActiveSnapshot::from);
        self.landing_y = state.active().map(|a| a.landing_y(board));
        self.score = state.score();
        self.high_score = state.high_score();
        self.paused = state.paused();
        self.game_over = state.game_over();
        self.drop_interval_ms = state.drop_interval_ms();
        self.settles = state.settles();
    }

    /// Settled value at (x, y), `0` when empty or out of range
    pub fn value_at(&self, x: u16, y: u16) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            board: vec![0; GRID_WIDTH as usize * GRID_HEIGHT as usize],
            active: None,
            landing_y: None,
            score: 0,
            high_score: 0,
            paused: false,
            game_over: false,
            drop_interval_ms: 0.0,
            settles: 0,
        }
    }
}
