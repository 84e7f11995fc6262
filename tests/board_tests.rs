//! Board tests - grid storage and the collision predicate

use tui_cube2048::core::Board;
use tui_cube2048::types::{Tile, GRID_HEIGHT, GRID_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::classic();
    assert_eq!(board.width(), GRID_WIDTH);
    assert_eq!(board.height(), GRID_HEIGHT);

    for y in 0..GRID_HEIGHT as i32 {
        for x in 0..GRID_WIDTH as i32 {
            assert!(board.is_valid_position(x, y), "cell ({}, {}) should be free", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.is_empty());
    assert_eq!(board.tile_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::classic();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(GRID_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, GRID_HEIGHT as i32), None);
    assert!(board.is_out_of_bounds(8, 3));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::classic();

    assert!(board.set(5, 10, Tile::new(16)));
    assert_eq!(board.tile(5, 10).map(Tile::value), Some(16));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Tile::new(2)));
    assert!(!board.set(0, 12, Tile::new(2)));
}

#[test]
fn test_valid_position_rules() {
    let mut board = Board::classic();
    board.set(3, 11, Tile::new(4));

    // Walls and floor.
    assert!(!board.is_valid_position(-1, 5));
    assert!(!board.is_valid_position(8, 5));
    assert!(!board.is_valid_position(3, 12));

    // Occupied cell.
    assert!(!board.is_valid_position(3, 11));
    assert!(board.is_valid_position(3, 10));

    // Above the grid is free as long as the column exists.
    assert!(board.is_valid_position(3, -1));
    assert!(!board.is_valid_position(-1, -1));
}

#[test]
fn test_landing_row() {
    let mut board = Board::classic();
    assert_eq!(board.landing_row(4, 0), 11);

    board.set(4, 11, Tile::new(2));
    board.set(4, 10, Tile::new(8));
    assert_eq!(board.landing_row(4, 0), 9);
    assert_eq!(board.landing_row(5, 0), 11);
}

#[test]
fn test_from_rows_round_trip() {
    let rows = [[0, 0, 0], [0, 4, 0], [2, 8, 2]];
    let board = Board::from_rows(&rows).unwrap();

    assert_eq!((board.width(), board.height()), (3, 3));
    assert_eq!(board.tile(1, 2).map(Tile::value), Some(8));
    assert_eq!(board.to_rows(), vec![vec![0, 0, 0], vec![0, 4, 0], vec![2, 8, 2]]);
    assert_eq!(board.total_value(), 16);
    assert_eq!(board.max_tile(), Tile::new(8));
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(Board::from_rows(&[[3u32, 0]]).is_err());
    assert!(Board::from_rows(&[vec![2u32, 0], vec![2]]).is_err());
    assert!(Board::from_rows::<[u32; 0]>(&[]).is_err());
}

#[test]
fn test_top_row_and_clear() {
    let mut board = Board::classic();
    assert!(!board.top_row_occupied());

    board.set(7, 0, Tile::new(2));
    assert!(board.top_row_occupied());

    board.clear();
    assert!(board.is_empty());
}
