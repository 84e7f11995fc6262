//! Cascade module - gravity and merge resolution after a cube lands
//!
//! Settling follows a fixed order that decides chain results:
//!
//! 1. The cube's value is written at its landing cell.
//! 2. Gravity sweeps run (rows `height-2` up to `0`) until a sweep moves nothing.
//! 3. A merge scan walks lower rows from the floor up to row 1. Where a tile
//!    and the tile directly above it are equal, the lower one doubles and the
//!    upper one is emptied. Any merge in a scan triggers another gravity
//!    fixed point followed by another scan.
//! 4. Resolution ends after a scan with zero merges.
//!
//! Merging is vertical only. Both phases are plain loops; each gravity fixed
//! point takes at most `height` sweeps and every merge removes a tile, so a
//! cascade always terminates.

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::game_state::ActivePiece;
use crate::scoring::merge_points;

/// What a full settle did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeResult {
    /// Sum of the values of every tile produced by a merge
    pub score_gain: u32,
    /// Number of pairwise merges
    pub merges: u32,
    /// Merge scans that found at least one pair
    pub chain_steps: u32,
}

/// Result of a single merge scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeScan {
    pub merges: u32,
    pub score_gain: u32,
}

/// Let every tile fall until none has an empty cell directly below it.
///
/// Returns the number of single-row moves performed.
pub fn apply_gravity(board: &mut Board) -> u32 {
    let width = board.width() as i32;
    let height = board.height() as i32;
    let mut total_moves = 0u32;

    loop {
        let mut moved = false;
        for y in (0..height - 1).rev() {
            for x in 0..width {
                let Some(tile) = board.tile(x, y) else {
                    continue;
                };
                if board.tile(x, y + 1).is_none() {
                    board.set(x, y + 1, Some(tile));
                    board.set(x, y, None);
                    moved = true;
                    total_moves += 1;
                }
            }
        }
        if !moved {
            return total_moves;
        }
    }
}

/// One bottom-up merge scan over the whole board.
pub fn merge_scan(board: &mut Board) -> MergeScan {
    let width = board.width() as i32;
    let height = board.height() as i32;
    let mut scan = MergeScan::default();

    for y in (1..height).rev() {
        for x in 0..width {
            let Some(lower) = board.tile(x, y) else {
                continue;
            };
            if board.tile(x, y - 1) != Some(lower) {
                continue;
            }
            // A u32 overflow leaves the pair unmerged.
            let Some(merged) = lower.doubled() else {
                continue;
            };
            board.set(x, y, Some(merged));
            board.set(x, y - 1, None);
            scan.merges += 1;
            scan.score_gain = scan.score_gain.saturating_add(merge_points(merged));
        }
    }

    scan
}

/// Run gravity and merge scans to a fixed point.
pub fn resolve(board: &mut Board) -> CascadeResult {
    let mut result = CascadeResult::default();
    apply_gravity(board);

    loop {
        let scan = merge_scan(board);
        if scan.merges == 0 {
            return result;
        }
        result.merges += scan.merges;
        result.score_gain = result.score_gain.saturating_add(scan.score_gain);
        result.chain_steps += 1;
        apply_gravity(board);
    }
}

/// Fold `piece` into `board` and run the full cascade.
///
/// Fails when the piece's cell lies outside the grid or is already taken;
/// the board is left untouched in that case.
pub fn settle(board: &mut Board, piece: &ActivePiece) -> Result<CascadeResult> {
    let (x, y) = (piece.x, piece.y);
    match board.get(x, y) {
        None => return Err(EngineError::OutOfBounds { x, y }),
        Some(Some(_)) => return Err(EngineError::CellOccupied { x, y }),
        Some(None) => {}
    }
    board.set(x, y, Some(piece.tile));
    Ok(resolve(board))
}

/// True when no tile sits directly above an empty cell.
pub fn is_gravity_stable(board: &Board) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;
    (0..height - 1).all(|y| {
        (0..width).all(|x| !(board.is_occupied(x, y) && !board.is_occupied(x, y + 1)))
    })
}

/// True when no two vertically adjacent tiles hold the same value.
pub fn has_no_vertical_pairs(board: &Board) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;
    (1..height).all(|y| {
        (0..width).all(|x| match board.tile(x, y) {
            Some(lower) => board.tile(x, y - 1) != Some(lower),
            None => true,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn piece(x: i32, y: i32, value: u32) -> ActivePiece {
        ActivePiece {
            x,
            y,
            tile: Tile::new(value).unwrap(),
        }
    }

    #[test]
    fn test_gravity_drops_floating_tiles() {
        let mut board = Board::from_rows(&[
            vec![2, 0, 0],
            vec![0, 4, 0],
            vec![0, 0, 0],
            vec![0, 0, 8],
        ])
        .unwrap();

        let moves = apply_gravity(&mut board);
        assert_eq!(moves, 3 + 2);
        assert_eq!(
            board.to_rows(),
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![2, 4, 8]]
        );
        assert!(is_gravity_stable(&board));
    }

    #[test]
    fn test_gravity_keeps_stack_order() {
        let mut board = Board::from_rows(&[vec![2], vec![4], vec![0], vec![0]]).unwrap();
        apply_gravity(&mut board);
        assert_eq!(board.to_rows(), vec![vec![0], vec![0], vec![2], vec![4]]);
    }

    #[test]
    fn test_merge_scan_doubles_lower_cell() {
        let mut board = Board::from_rows(&[vec![0], vec![8], vec![8]]).unwrap();
        let scan = merge_scan(&mut board);
        assert_eq!(scan, MergeScan { merges: 1, score_gain: 16 });
        assert_eq!(board.to_rows(), vec![vec![0], vec![0], vec![16]]);
    }

    #[test]
    fn test_merge_scan_is_bottom_first() {
        // Three equal tiles: the bottom pair merges, the top one is left over.
        let mut board = Board::from_rows(&[vec![2], vec![2], vec![2]]).unwrap();
        let scan = merge_scan(&mut board);
        assert_eq!(scan.merges, 1);
        assert_eq!(board.to_rows(), vec![vec![2], vec![0], vec![4]]);
    }

    #[test]
    fn test_merges_are_vertical_only() {
        let mut board = Board::from_rows(&[vec![0, 0], vec![4, 4]]).unwrap();
        let result = resolve(&mut board);
        assert_eq!(result, CascadeResult::default());
        assert_eq!(board.to_rows(), vec![vec![0, 0], vec![4, 4]]);
    }

    #[test]
    fn test_chain_reaction() {
        // 2 lands on 2 -> 4 merges with 4 -> 8 merges with 8.
        let mut board = Board::from_rows(&[
            vec![0],
            vec![0],
            vec![2],
            vec![4],
            vec![8],
        ])
        .unwrap();

        let result = settle(&mut board, &piece(0, 1, 2)).unwrap();
        assert_eq!(result.merges, 3);
        assert_eq!(result.score_gain, 4 + 8 + 16);
        assert_eq!(result.chain_steps, 3);
        assert_eq!(
            board.to_rows(),
            vec![vec![0], vec![0], vec![0], vec![0], vec![16]]
        );
    }

    #[test]
    fn test_settle_runs_gravity_first() {
        let mut board = Board::from_rows(&[vec![0], vec![0], vec![0], vec![2]]).unwrap();
        let result = settle(&mut board, &piece(0, 0, 2)).unwrap();
        assert_eq!(result.score_gain, 4);
        assert_eq!(board.to_rows(), vec![vec![0], vec![0], vec![0], vec![4]]);
    }

    #[test]
    fn test_settle_rejects_invalid_cells() {
        let mut board = Board::from_rows(&[vec![0, 2]]).unwrap();
        assert_eq!(
            settle(&mut board, &piece(1, 0, 2)),
            Err(EngineError::CellOccupied { x: 1, y: 0 })
        );
        assert_eq!(
            settle(&mut board, &piece(2, 0, 2)),
            Err(EngineError::OutOfBounds { x: 2, y: 0 })
        );
        assert_eq!(
            settle(&mut board, &piece(0, -1, 2)),
            Err(EngineError::OutOfBounds { x: 0, y: -1 })
        );
        assert_eq!(board.to_rows(), vec![vec![0, 2]]);
    }

    #[test]
    fn test_unequal_stack_is_left_alone() {
        let mut board = Board::from_rows(&[vec![2], vec![4], vec![2]]).unwrap();
        let result = resolve(&mut board);
        assert_eq!(result.merges, 0);
        assert!(has_no_vertical_pairs(&board));
    }
}
