//! Scoring module - merge points, high score tracking and drop speed
//!
//! Rules:
//! - A merge producing tile `v` is worth `v` points.
//! - The high score only ever moves up; a score that overtakes it is proposed
//!   to the caller for persistence.
//! - After every settle the drop interval is multiplied by the decay factor,
//!   never going below the configured floor.

use crate::config::EngineConfig;
use crate::types::Tile;

/// Points awarded for a merge that produced `merged`
#[inline]
pub fn merge_points(merged: Tile) -> u32 {
    merged.value()
}

/// Result of folding a settle's score gain into the running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    pub score: u32,
    pub high_score: u32,
    /// `Some(new)` when this update raised the high score
    pub new_high_score: Option<u32>,
}

/// Add `gain` to `score` and raise `high_score` if it was overtaken
pub fn apply_gain(score: u32, high_score: u32, gain: u32) -> ScoreUpdate {
    let score = score.saturating_add(gain);
    if score > high_score {
        ScoreUpdate {
            score,
            high_score: score,
            new_high_score: Some(score),
        }
    } else {
        ScoreUpdate {
            score,
            high_score,
            new_high_score: None,
        }
    }
}

/// Interval to use after one more settle
pub fn next_drop_interval_ms(current_ms: f64, config: &EngineConfig) -> f64 {
    (current_ms * config.speed_decay).max(config.min_drop_interval_ms)
}

/// Closed form of the interval after `settles` settles:
/// `max(min, initial * decay^settles)`
pub fn drop_interval_after(settles: u32, config: &EngineConfig) -> f64 {
    let exp = settles.min(i32::MAX as u32) as i32;
    (config.initial_drop_interval_ms * config.speed_decay.powi(exp))
        .max(config.min_drop_interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_points_equal_new_value() {
        assert_eq!(merge_points(Tile::new(4).unwrap()), 4);
        assert_eq!(merge_points(Tile::new(2048).unwrap()), 2048);
    }

    #[test]
    fn test_apply_gain_raises_high_score() {
        let update = apply_gain(10, 12, 4);
        assert_eq!(update.score, 14);
        assert_eq!(update.high_score, 14);
        assert_eq!(update.new_high_score, Some(14));
    }

    #[test]
    fn test_apply_gain_keeps_high_score() {
        let update = apply_gain(10, 100, 4);
        assert_eq!(update.score, 14);
        assert_eq!(update.high_score, 100);
        assert_eq!(update.new_high_score, None);

        // Tying the record is not a new record.
        assert_eq!(apply_gain(96, 100, 4).new_high_score, None);
        // A zero gain never proposes anything on a fresh game.
        assert_eq!(apply_gain(0, 0, 0).new_high_score, None);
    }

    #[test]
    fn test_drop_interval_progression() {
        let config = EngineConfig::default();
        let first = next_drop_interval_ms(config.initial_drop_interval_ms, &config);
        assert!((first - 760.0).abs() < 1e-9);

        let mut interval = config.initial_drop_interval_ms;
        for n in 1..=60 {
            interval = next_drop_interval_ms(interval, &config);
            let expected = drop_interval_after(n, &config);
            assert!(
                (interval - expected).abs() < 1e-6,
                "settle {}: {} vs {}",
                n,
                interval,
                expected
            );
        }
        assert_eq!(interval, 200.0);
    }
}
