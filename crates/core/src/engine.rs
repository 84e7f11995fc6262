//! Grid engine - every state transition of a game
//!
//! The engine exclusively owns the [`GameState`] and the random source used
//! for spawns. Drivers call one operation per intent (timer tick, key press)
//! and inspect the returned outcome; nothing is recomputed behind their back.
//!
//! Moves are rejected, never failed: a blocked move returns
//! [`MoveOutcome::Rejected`] and a move while paused, finished or between
//! pieces returns `Ignored`. Errors are reserved for integration defects such
//! as spawning while a cube is still falling.

use std::time::Duration;

use rand::RngCore;
use tracing::{debug, info};

use crate::board::Board;
use crate::cascade::{self, CascadeResult};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::game_state::{ActivePiece, GameState};
use crate::rng::{seeded_rng, DefaultRng, SpawnTable};
use crate::scoring::{apply_gain, next_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, Tile};

/// Result of a horizontal move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The cube shifted one column
    Moved,
    /// Wall or settled tile in the way; position unchanged
    Rejected,
    /// Paused, game over or no cube
    Ignored,
}

/// What a settle produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleReport {
    /// Cell the cube was written to before gravity
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
    pub score_gain: u32,
    pub merges: u32,
    pub chain_steps: u32,
    /// Raised high score, for the persistence collaborator
    pub new_high_score: Option<u32>,
    pub game_over: bool,
    /// Cube spawned after the settle (`None` once the game is over)
    pub next: Option<ActivePiece>,
}

/// Result of a descent step or a hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused, game over or no cube
    Ignored,
    /// The cube moved down one row
    Fell,
    /// The cube landed and the cascade ran
    Settled(SettleReport),
}

impl StepOutcome {
    pub fn settled(&self) -> Option<&SettleReport> {
        match self {
            StepOutcome::Settled(report) => Some(report),
            _ => None,
        }
    }
}

/// Result of [`GridEngine::apply_action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Move(MoveOutcome),
    Step(StepOutcome),
    /// New paused flag
    PauseToggled(bool),
    Restarted,
}

impl ActionOutcome {
    pub fn settled(&self) -> Option<&SettleReport> {
        match self {
            ActionOutcome::Step(step) => step.settled(),
            _ => None,
        }
    }
}

/// The falling-cube simulation
#[derive(Debug, Clone)]
pub struct GridEngine<R = DefaultRng> {
    config: EngineConfig,
    spawn_table: SpawnTable,
    state: GameState,
    rng: R,
}

impl GridEngine<DefaultRng> {
    /// Engine with a seeded default generator
    pub fn new(config: EngineConfig, high_score: u32, seed: u64) -> Result<Self> {
        Self::with_rng(config, high_score, seeded_rng(seed))
    }
}

impl<R: RngCore> GridEngine<R> {
    /// Engine drawing spawn values from `rng`
    pub fn with_rng(config: EngineConfig, high_score: u32, rng: R) -> Result<Self> {
        config.validate()?;
        let spawn_table = SpawnTable::from_config(&config)?;
        let state = GameState::new(&config, high_score);
        Ok(Self {
            config,
            spawn_table,
            state,
            rng,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.state.active
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn paused(&self) -> bool {
        self.state.paused
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.state.drop_interval_ms
    }

    /// Current drop interval, rounded to whole milliseconds for timers
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.state.drop_interval_ms.round() as u64)
    }

    /// Collision predicate against the current board
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.state.board.is_valid_position(x, y)
    }

    /// Spawn the first cube if the game has none yet.
    ///
    /// This is what a driver calls once after construction or restart.
    pub fn start(&mut self) -> Result<()> {
        if self.state.active.is_none() && !self.state.game_over {
            self.spawn()?;
        }
        Ok(())
    }

    /// Spawn a new cube at the top center.
    ///
    /// Calling this while a cube is falling or after game over is a driver
    /// bug and returns an error.
    pub fn spawn(&mut self) -> Result<ActivePiece> {
        if let Some(active) = self.state.active {
            return Err(EngineError::PieceAlreadyActive {
                x: active.x,
                y: active.y,
            });
        }
        if self.state.game_over {
            return Err(EngineError::GameOver);
        }

        let tile = self.spawn_table.draw(&mut self.rng);
        let piece = ActivePiece::spawn(self.config.width, tile);
        self.state.active = Some(piece);
        Ok(piece)
    }

    /// Steer the cube one column.
    pub fn move_horizontal(&mut self, direction: Direction) -> MoveOutcome {
        if !self.state.accepts_moves() {
            return MoveOutcome::Ignored;
        }
        let Some(active) = self.state.active else {
            return MoveOutcome::Ignored;
        };

        let new_x = active.x + direction.offset();
        if self.state.board.is_valid_position(new_x, active.y) {
            self.state.active = Some(ActivePiece { x: new_x, ..active });
            MoveOutcome::Moved
        } else {
            MoveOutcome::Rejected
        }
    }

    /// One descent step (timer tick or soft drop).
    ///
    /// Settles the cube when the row below is blocked.
    pub fn move_down(&mut self) -> Result<StepOutcome> {
        if !self.state.accepts_moves() {
            return Ok(StepOutcome::Ignored);
        }
        let Some(active) = self.state.active else {
            return Ok(StepOutcome::Ignored);
        };

        let new_y = active.y + 1;
        if self.state.board.is_valid_position(active.x, new_y) {
            self.state.active = Some(ActivePiece { y: new_y, ..active });
            return Ok(StepOutcome::Fell);
        }

        self.land(active).map(StepOutcome::Settled)
    }

    /// Time-driven descent; same as [`move_down`](Self::move_down).
    pub fn tick(&mut self) -> Result<StepOutcome> {
        self.move_down()
    }

    /// Drop the cube straight to its landing row and settle it there.
    ///
    /// Cells passed on the way down are not merged with.
    pub fn instant_drop(&mut self) -> Result<StepOutcome> {
        if !self.state.accepts_moves() {
            return Ok(StepOutcome::Ignored);
        }
        let Some(active) = self.state.active else {
            return Ok(StepOutcome::Ignored);
        };

        let landing = ActivePiece {
            y: active.landing_y(&self.state.board),
            ..active
        };
        self.land(landing).map(StepOutcome::Settled)
    }

    /// Flip the paused flag. Works in every state.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.paused = !self.state.paused;
        debug!(paused = self.state.paused, "pause toggled");
        self.state.paused
    }

    /// Start over with an empty board. The high score survives.
    ///
    /// No cube is spawned; call [`start`](Self::start) afterwards.
    pub fn restart(&mut self) {
        self.state.reset(&self.config);
        info!(high_score = self.state.high_score, "game restarted");
    }

    /// Map one input intent to its operation.
    pub fn apply_action(&mut self, action: GameAction) -> Result<ActionOutcome> {
        let outcome = match action {
            GameAction::MoveLeft => ActionOutcome::Move(self.move_horizontal(Direction::Left)),
            GameAction::MoveRight => ActionOutcome::Move(self.move_horizontal(Direction::Right)),
            GameAction::SoftDrop => ActionOutcome::Step(self.move_down()?),
            GameAction::HardDrop => ActionOutcome::Step(self.instant_drop()?),
            GameAction::Pause => ActionOutcome::PauseToggled(self.toggle_pause()),
            GameAction::Restart => {
                self.restart();
                self.start()?;
                ActionOutcome::Restarted
            }
        };
        Ok(outcome)
    }

    /// Settle `piece` at its position, do the bookkeeping and respawn.
    fn land(&mut self, piece: ActivePiece) -> Result<SettleReport> {
        let CascadeResult {
            score_gain,
            merges,
            chain_steps,
        } = cascade::settle(&mut self.state.board, &piece)?;
        self.state.active = None;

        let update = apply_gain(self.state.score, self.state.high_score, score_gain);
        self.state.score = update.score;
        self.state.high_score = update.high_score;
        self.state.drop_interval_ms = next_drop_interval_ms(self.state.drop_interval_ms, &self.config);
        self.state.settles = self.state.settles.saturating_add(1);

        debug!(
            x = piece.x,
            y = piece.y,
            value = piece.value(),
            merges,
            score_gain,
            score = self.state.score,
            interval_ms = self.state.drop_interval_ms,
            "cube settled"
        );
        if let Some(high) = update.new_high_score {
            info!(high_score = high, "new high score");
        }

        let next = if self.state.board.top_row_occupied() {
            self.state.game_over = true;
            info!(
                score = self.state.score,
                settles = self.state.settles,
                "game over"
            );
            None
        } else {
            Some(self.spawn()?)
        };

        Ok(SettleReport {
            x: piece.x,
            y: piece.y,
            tile: piece.tile,
            score_gain,
            merges,
            chain_steps,
            new_high_score: update.new_high_score,
            game_over: self.state.game_over,
            next,
        })
    }

    /// Observable copy of the state for presentation
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` in place, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.fill_from(&self.state);
    }

    /// Mutable board access for scenario tests
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.state.board
    }
}
