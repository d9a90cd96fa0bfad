//! Active falling piece logic

use crate::board::Board;
use crate::tetromino::{Shape, TetrominoType};

/// An active falling piece: a shape matrix plus the anchor locating its
/// top-left corner in grid coordinates.
#[derive(Debug, Clone)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current shape matrix (mutated by rotation)
    pub shape: Shape,
    /// Anchor column of the shape's top-left corner
    pub col: i32,
    /// Anchor row of the shape's top-left corner
    pub row: i32,
}

impl Piece {
    /// Create a piece at its spawn position: horizontally centered, top row
    pub fn spawn(kind: TetrominoType, board_width: usize) -> Self {
        let shape = kind.shape();
        let col = board_width as i32 / 2 - shape.width() as i32 / 2;
        Self {
            kind,
            shape,
            col,
            row: 0,
        }
    }

    /// Absolute grid coordinates (row, col) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(r, c)| (self.row + r as i32, self.col + c as i32))
    }

    /// Try to shift the anchor by (dx, dy); commits only if the shifted
    /// placement is valid, otherwise the piece is left unchanged.
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        if board.fits(&self.shape, self.col + dx, self.row + dy) {
            self.col += dx;
            self.row += dy;
            true
        } else {
            false
        }
    }

    /// Try a single clockwise rotation at the current anchor.
    ///
    /// One candidate orientation only - no wall kicks, no alternate anchors.
    /// An invalid candidate is silently discarded.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let candidate = self.shape.rotated_cw();
        if board.fits(&candidate, self.col, self.row) {
            self.shape = candidate;
            true
        } else {
            false
        }
    }

    /// Drop to the lowest valid position, returning the distance fallen
    pub fn drop_to_bottom(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_move(0, 1, board) {
            distance += 1;
        }
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_spawn_is_centered() {
        // I is 4 wide: col = 10/2 - 4/2 = 3
        let i = Piece::spawn(TetrominoType::I, 10);
        assert_eq!((i.col, i.row), (3, 0));
        // T is 3 wide: col = 5 - 1 = 4
        let t = Piece::spawn(TetrominoType::T, 10);
        assert_eq!((t.col, t.row), (4, 0));
    }

    #[test]
    fn test_move_down_shifts_anchor_by_one() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::T, 10);
        assert!(piece.try_move(0, 1, &board));
        assert_eq!(piece.row, 1);
        assert_eq!(piece.col, 4);
    }

    #[test]
    fn test_blocked_move_leaves_piece_unchanged() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::O, 10);
        piece.col = 0;
        assert!(!piece.try_move(-1, 0, &board));
        assert_eq!((piece.col, piece.row), (0, 0));
    }

    #[test]
    fn test_rotation_against_floor_is_a_noop() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::I, 10);
        piece.row = 19; // flat I on the floor
        let before = piece.shape.clone();
        // Rotating would need 4 rows of space below the anchor
        assert!(!piece.rotate(&board));
        assert_eq!(piece.shape, before);
    }

    #[test]
    fn test_rotation_blocked_by_stack_is_a_noop() {
        let mut board = Board::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::I, 10);
        // Fill the cell a vertical I would need
        board.set(1, 3, Cell::Filled(TetrominoType::J));
        let before = piece.shape.clone();
        assert!(!piece.rotate(&board));
        assert_eq!(piece.shape, before);
    }

    #[test]
    fn test_drop_to_bottom() {
        let board = Board::new(10, 20);
        let mut piece = Piece::spawn(TetrominoType::I, 10);
        let distance = piece.drop_to_bottom(&board);
        assert_eq!(distance, 19);
        assert_eq!(piece.row, 19);
        assert!(!piece.try_move(0, 1, &board));
    }

    #[test]
    fn test_cells_are_anchor_relative() {
        let piece = Piece::spawn(TetrominoType::O, 10);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(0, 4), (0, 5), (1, 4), (1, 5)]);
    }
}
