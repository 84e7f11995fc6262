//! Engine tests - full game flows through the public operations

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tui_cube2048::core::{
    drop_interval_after, ActionOutcome, EngineConfig, EngineError, GridEngine, MoveOutcome,
    SettleReport, StepOutcome,
};
use tui_cube2048::types::{Direction, GameAction, Tile};

fn only_twos() -> EngineConfig {
    EngineConfig::default()
        .with_spawn_candidates(&[(2, 1)])
        .unwrap()
}

fn started(config: EngineConfig, seed: u64) -> GridEngine {
    let mut engine = GridEngine::new(config, 0, seed).unwrap();
    engine.start().unwrap();
    engine
}

fn step_until_settled(engine: &mut GridEngine) -> SettleReport {
    loop {
        match engine.move_down().unwrap() {
            StepOutcome::Fell => continue,
            StepOutcome::Settled(report) => return report,
            StepOutcome::Ignored => panic!("step ignored while a cube is falling"),
        }
    }
}

fn shift(engine: &mut GridEngine, offset: i32) {
    let direction = if offset < 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    for _ in 0..offset.abs() {
        engine.move_horizontal(direction);
    }
}

#[test]
fn test_two_drops_in_center_column() {
    let mut engine = started(only_twos(), 1);

    let first = *engine.instant_drop().unwrap().settled().unwrap();
    assert_eq!((first.x, first.y), (4, 11));
    assert_eq!(first.score_gain, 0);
    assert_eq!(engine.score(), 0);

    let second = *engine.instant_drop().unwrap().settled().unwrap();
    assert_eq!((second.x, second.y), (4, 10));
    assert_eq!(second.score_gain, 4);
    assert_eq!(engine.score(), 4);
    assert_eq!(engine.high_score(), 4);
    assert_eq!(second.new_high_score, Some(4));

    assert_eq!(engine.board().tile(4, 11), Tile::new(4));
    assert_eq!(engine.board().tile(4, 10), None);
}

#[test]
fn test_move_rejected_by_wall_and_tile() {
    let mut engine = started(EngineConfig::default(), 2);

    // Park one cube in column 3.
    assert_eq!(engine.move_horizontal(Direction::Left), MoveOutcome::Moved);
    engine.instant_drop().unwrap();

    // Walk the next cube down column 4 to the floor row.
    for _ in 0..11 {
        assert_eq!(engine.move_down().unwrap(), StepOutcome::Fell);
    }
    let before = engine.active().unwrap();
    assert_eq!((before.x, before.y), (4, 11));
    assert_eq!(engine.move_horizontal(Direction::Left), MoveOutcome::Rejected);
    assert_eq!(engine.active(), Some(before));

    // Right side is open down to the wall.
    for _ in 0..3 {
        assert_eq!(engine.move_horizontal(Direction::Right), MoveOutcome::Moved);
    }
    assert_eq!(engine.move_horizontal(Direction::Right), MoveOutcome::Rejected);
    assert_eq!(engine.active().unwrap().x, 7);
}

#[test]
fn test_instant_drop_matches_repeated_steps() {
    let mut hard = started(EngineConfig::default(), 99);
    let mut soft = started(EngineConfig::default(), 99);
    let mut moves = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..60 {
        if hard.game_over() {
            break;
        }
        let offset = moves.gen_range(-4..=3);
        shift(&mut hard, offset);
        shift(&mut soft, offset);

        let a = *hard.instant_drop().unwrap().settled().unwrap();
        let b = step_until_settled(&mut soft);

        assert_eq!(a, b);
        assert_eq!(hard.snapshot(), soft.snapshot());
    }
}

#[test]
fn test_scores_are_monotone_and_high_score_survives_restart() {
    let mut engine = started(EngineConfig::default(), 2024);
    let mut actions = ChaCha8Rng::seed_from_u64(11);
    let mut last_score = 0;
    let mut last_high = 0;

    for _ in 0..3000 {
        let action = if engine.game_over() {
            GameAction::Restart
        } else {
            match actions.gen_range(0..20) {
                0..=5 => GameAction::MoveLeft,
                6..=11 => GameAction::MoveRight,
                12..=15 => GameAction::SoftDrop,
                16..=18 => GameAction::HardDrop,
                _ => GameAction::Pause,
            }
        };

        let outcome = engine.apply_action(action).unwrap();
        if outcome == ActionOutcome::Restarted {
            assert_eq!(engine.score(), 0);
            last_score = 0;
        }

        assert!(engine.score() >= last_score);
        assert!(engine.high_score() >= last_high);
        assert!(engine.high_score() >= engine.score());
        last_score = engine.score();
        last_high = engine.high_score();
    }
    assert!(last_high > 0, "some merges should have happened");
}

#[test]
fn test_drop_interval_follows_settle_count() {
    let config = EngineConfig::default();
    let mut engine = started(config.clone(), 8);
    let mut columns = ChaCha8Rng::seed_from_u64(3);

    while !engine.game_over() && engine.state().settles() < 60 {
        shift(&mut engine, columns.gen_range(-4..=3));
        engine.instant_drop().unwrap();

        let expected = drop_interval_after(engine.state().settles(), &config);
        assert!(
            (engine.drop_interval_ms() - expected).abs() < 1e-6,
            "after {} settles: {} != {}",
            engine.state().settles(),
            engine.drop_interval_ms(),
            expected
        );
        assert!(engine.drop_interval_ms() >= 200.0);
    }
    assert!(engine.state().settles() > 0);

    engine.apply_action(GameAction::Restart).unwrap();
    assert_eq!(engine.drop_interval_ms(), 800.0);
}

#[test]
fn test_game_over_when_top_row_is_occupied() {
    let config = EngineConfig::default().with_grid(1, 3);
    let mut engine = started(config, 17);

    let mut reached = false;
    for _ in 0..10_000 {
        let report = *engine.instant_drop().unwrap().settled().unwrap();
        assert_eq!(report.game_over, engine.board().top_row_occupied());
        if report.game_over {
            assert!(report.next.is_none());
            reached = true;
            break;
        }
        assert!(report.next.is_some());
    }
    assert!(reached, "a 1x3 column fills up quickly");

    let board = engine.board().clone();
    let score = engine.score();
    assert!(engine.game_over());
    assert!(engine.active().is_none());
    assert_eq!(engine.move_horizontal(Direction::Left), MoveOutcome::Ignored);
    assert_eq!(engine.tick().unwrap(), StepOutcome::Ignored);
    assert_eq!(engine.instant_drop().unwrap(), StepOutcome::Ignored);
    assert_eq!(engine.spawn(), Err(EngineError::GameOver));
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.score(), score);

    assert_eq!(
        engine.apply_action(GameAction::Restart).unwrap(),
        ActionOutcome::Restarted
    );
    assert!(!engine.game_over());
    assert!(engine.board().is_empty());
    assert!(engine.active().is_some());
}

#[test]
fn test_pause_suspends_time_and_moves() {
    let mut engine = started(EngineConfig::default(), 4);

    assert_eq!(
        engine.apply_action(GameAction::Pause).unwrap(),
        ActionOutcome::PauseToggled(true)
    );
    assert_eq!(engine.tick().unwrap(), StepOutcome::Ignored);
    assert_eq!(
        engine.apply_action(GameAction::MoveLeft).unwrap(),
        ActionOutcome::Move(MoveOutcome::Ignored)
    );
    assert_eq!(engine.active().map(|p| (p.x, p.y)), Some((4, 0)));
    assert!(engine.snapshot().paused);

    assert_eq!(
        engine.apply_action(GameAction::Pause).unwrap(),
        ActionOutcome::PauseToggled(false)
    );
    assert_eq!(engine.tick().unwrap(), StepOutcome::Fell);
}

#[test]
fn test_spawn_while_falling_is_an_error() {
    let mut engine = started(EngineConfig::default(), 6);
    assert_eq!(
        engine.spawn(),
        Err(EngineError::PieceAlreadyActive { x: 4, y: 0 })
    );
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(EngineConfig::default(), 77);
    let mut b = started(EngineConfig::default(), 77);

    for _ in 0..20 {
        if a.game_over() {
            break;
        }
        assert_eq!(a.active(), b.active());
        a.instant_drop().unwrap();
        b.instant_drop().unwrap();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_spawn_values_come_from_the_table() {
    let mut engine = started(EngineConfig::default(), 123);
    let mut seen = [false; 4];

    for _ in 0..200 {
        if engine.game_over() {
            engine.apply_action(GameAction::Restart).unwrap();
        }
        let value = engine.active().unwrap().value();
        let slot = [2, 4, 8, 16].iter().position(|&v| v == value);
        assert!(slot.is_some(), "unexpected spawn value {}", value);
        seen[slot.unwrap()] = true;
        engine.instant_drop().unwrap();
    }
    assert!(seen.iter().all(|&s| s), "all four values eventually spawn");
}

#[test]
fn test_pause_toggles_after_game_over_and_restart_clears_it() {
    let config = EngineConfig::default().with_grid(1, 2);
    let mut engine = started(config, 31);

    for _ in 0..1000 {
        if engine.game_over() {
            break;
        }
        engine.instant_drop().unwrap();
    }
    assert!(engine.game_over());
    assert!(!engine.snapshot().playable());

    assert!(engine.toggle_pause());
    assert!(engine.paused());
    assert_eq!(engine.tick().unwrap(), StepOutcome::Ignored);
    assert_eq!(engine.spawn(), Err(EngineError::GameOver));

    assert_eq!(
        engine.apply_action(GameAction::Restart).unwrap(),
        ActionOutcome::Restarted
    );
    assert!(!engine.paused());
    assert!(!engine.game_over());
    assert!(engine.state().playable());
    assert!(engine.snapshot().playable());
}
