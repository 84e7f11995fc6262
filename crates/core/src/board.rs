//! Board module - manages the cube grid
//!
//! The board is a `width x height` grid (8x12 by default) where each cell is
//! either empty or holds a power-of-two [`Tile`]. Storage is a flat row-major
//! vector sized once at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the spawn row, row `height - 1` is the floor.

use crate::error::{EngineError, Result};
use crate::types::{Cell, Tile, GRID_HEIGHT, GRID_WIDTH};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u16,
    height: u16,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the given size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Create an empty board with the classic 8x12 dimensions
    pub fn classic() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }

    /// Build a board from rows of raw values, `0` meaning empty.
    ///
    /// Every row must have the same length and every non-zero value must be a
    /// power of two `>= 2`.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(EngineError::Config("board must have at least one cell".into()));
        }
        if width > u16::MAX as usize || height > u16::MAX as usize {
            return Err(EngineError::Config("board dimensions too large".into()));
        }

        let mut board = Self::new(width as u16, height as u16);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(EngineError::Config(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let tile = Tile::new(value).ok_or(EngineError::InvalidTile(value))?;
                board.cells[y * width + x] = Some(tile);
            }
        }
        Ok(board)
    }

    /// Raw values per row, `0` meaning empty
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|c| c.map_or(0, Tile::value)).collect())
            .collect()
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Tile at (x, y), `None` when empty or out of bounds
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.get(x, y).flatten()
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision check used by every movement of the falling cube.
    ///
    /// Rejects columns outside `[0, width)` and rows at or below the floor.
    /// Rows above the grid (negative `y`) are always free.
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_none()
    }

    /// Lowest row a cube at (x, y) can fall to without passing through tiles
    pub fn landing_row(&self, x: i32, y: i32) -> i32 {
        let mut y = y;
        while self.is_valid_position(x, y + 1) {
            y += 1;
        }
        y
    }

    /// Cells of row `y`, or an empty slice when out of range
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height as usize {
            return &[];
        }
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Game-over condition: any tile resting in the spawn row
    pub fn top_row_occupied(&self) -> bool {
        self.row(0).iter().any(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Largest tile on the board
    pub fn max_tile(&self) -> Option<Tile> {
        self.cells.iter().flatten().copied().max()
    }

    /// Sum of all tile values (merging never changes it)
    pub fn total_value(&self) -> u64 {
        self.cells.iter().flatten().map(|t| t.value() as u64).sum()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as raw values into `out` (row-major, 0 = empty).
    pub fn write_values(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.map_or(0, Tile::value)));
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}
