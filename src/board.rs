//! Grid state and placement validity

use crate::tetromino::{Shape, TetrominoType};

/// Standard board dimensions
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
///
/// Row 0 is the top edge; rows grow downward. Dimensions are fixed at
/// construction and preserved by every operation.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (row, col), or None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Set a cell, returning false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            return false;
        }
        self.rows[row as usize][col as usize] = cell;
        true
    }

    /// Rows from top to bottom, for rendering
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Check whether a shape placed with its top-left corner at
    /// (anchor_col, anchor_row) is legal.
    ///
    /// An occupied cell fails the check if its column is outside the board,
    /// its row is below the floor, or it lands on a filled cell. Rows above
    /// the top edge are only column-checked: a piece may overhang the top
    /// while spawning, but an in-bounds overlap there still fails, which is
    /// what flags game over on a blocked spawn.
    pub fn fits(&self, shape: &Shape, anchor_col: i32, anchor_row: i32) -> bool {
        for (r, c) in shape.cells() {
            let row = anchor_row + r as i32;
            let col = anchor_col + c as i32;
            if col < 0 || col >= self.width as i32 || row >= self.height as i32 {
                return false;
            }
            if row >= 0 && self.rows[row as usize][col as usize].is_filled() {
                return false;
            }
        }
        true
    }

    /// Stamp a shape's occupied cells with the piece's type tag.
    ///
    /// Caller must have verified the placement with `fits`; cells above the
    /// top edge are skipped.
    pub fn place(&mut self, shape: &Shape, anchor_col: i32, anchor_row: i32, kind: TetrominoType) {
        for (r, c) in shape.cells() {
            self.set(anchor_row + r as i32, anchor_col + c as i32, Cell::Filled(kind));
        }
    }

    /// Remove every full row and return how many were cleared.
    ///
    /// Rebuilds the row list: keep the non-full rows in order, then prepend
    /// enough empty rows to restore the original height.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width;
        let kept: Vec<Vec<Cell>> = self
            .rows
            .drain(..)
            .filter(|row| row.iter().any(Cell::is_empty))
            .collect();
        let cleared = self.height - kept.len();
        self.rows = std::iter::repeat_with(|| vec![Cell::Empty; width])
            .take(cleared)
            .chain(kept)
            .collect();
        cleared as u32
    }

    /// Count of filled cells on the whole board
    pub fn filled_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| c.is_filled()).count())
            .sum()
    }
}
