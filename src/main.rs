//! Terminal cube-2048 runner (default binary).
//!
//! Owns the wall clock: input is polled until the next drop deadline, the
//! deadline triggers a descent step, and the deadline is rescheduled from the
//! engine's drop interval after every settle, pause toggle and restart.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use tui_cube2048::core::{ActionOutcome, GameSnapshot, GridEngine, SettleReport};
use tui_cube2048::highscore::HighScoreStore;
use tui_cube2048::input::{action_for_key, should_quit};
use tui_cube2048::logging;
use tui_cube2048::settings::Settings;
use tui_cube2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Poll timeout while the drop timer is suspended
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    logging::init(settings.log_path.as_deref())?;

    let store = HighScoreStore::new(settings.high_score_path.clone());
    let high_score = store.load();
    info!(
        width = settings.engine.width,
        height = settings.engine.height,
        seed = settings.seed,
        high_score,
        "starting"
    );

    let mut engine = GridEngine::new(settings.engine, high_score, settings.seed)?;
    engine.start()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, &store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut GridEngine, store: &HighScoreStore) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut next_drop = Instant::now() + engine.drop_interval();

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timer_running = snap.playable();
        let timeout = if timer_running {
            next_drop.saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = action_for_key(key, engine.game_over()) {
                        let outcome = engine.apply_action(action)?;
                        if let Some(report) = outcome.settled() {
                            persist_high_score(store, report);
                        }
                        let reschedule = outcome.settled().is_some()
                            || matches!(
                                outcome,
                                ActionOutcome::PauseToggled(_) | ActionOutcome::Restarted
                            );
                        if reschedule {
                            next_drop = Instant::now() + engine.drop_interval();
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if engine.state().playable() && Instant::now() >= next_drop {
            let step = engine.tick()?;
            if let Some(report) = step.settled() {
                persist_high_score(store, report);
            }
            next_drop = Instant::now() + engine.drop_interval();
        }
    }
}

fn persist_high_score(store: &HighScoreStore, report: &SettleReport) {
    let Some(high_score) = report.new_high_score else {
        return;
    };
    if let Err(e) = store.save(high_score) {
        warn!(error = %e, path = %store.path().display(), "failed to save high score");
    }
}
