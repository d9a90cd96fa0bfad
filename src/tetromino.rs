//! Tetromino definitions and shape matrices
//!
//! Each of the 7 piece types starts from a canonical boolean matrix; rotation
//! produces a new matrix rather than indexing a per-piece orientation table.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// All tetromino types, for uniform random selection
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// The canonical (spawn) shape matrix for this tetromino
    pub fn shape(&self) -> Shape {
        let pattern: &[&str] = match self {
            TetrominoType::I => &["####"],
            TetrominoType::O => &["##", "##"],
            TetrominoType::T => &[".#.", "###"],
            TetrominoType::S => &[".##", "##."],
            TetrominoType::Z => &["##.", ".##"],
            TetrominoType::J => &["#..", "###"],
            TetrominoType::L => &["..#", "###"],
        };
        Shape::from_pattern(pattern)
    }
}

/// A piece shape: a small rectangular boolean matrix, `true` = occupied cell.
///
/// Row 0 is the top of the shape; the matrix is indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from `#`/`.` pattern rows (every row the same length)
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern
            .iter()
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the (row, col) offsets of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .map(move |(c, _)| (r, c))
        })
    }

    /// Rotate 90 degrees clockwise: reverse the rows, then transpose.
    ///
    /// Returns a new matrix; the original is untouched so callers can
    /// validate the candidate before committing it.
    pub fn rotated_cw(&self) -> Shape {
        let (h, w) = (self.height(), self.width());
        let rows = (0..w)
            .map(|r| (0..h).map(|c| self.rows[h - 1 - c][r]).collect())
            .collect();
        Shape { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_four_cells() {
        for kind in TetrominoType::all() {
            assert_eq!(kind.shape().cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i = TetrominoType::I.shape();
        assert_eq!((i.height(), i.width()), (1, 4));
        let rotated = i.rotated_cw();
        assert_eq!((rotated.height(), rotated.width()), (4, 1));
    }

    #[test]
    fn test_t_rotates_clockwise() {
        // .#.        #.
        // ###   ->   ##
        //            #.
        let rotated = TetrominoType::T.shape().rotated_cw();
        assert_eq!(rotated, Shape::from_pattern(&["#.", "##", "#."]));
    }

    #[test]
    fn test_four_rotations_close_the_cycle() {
        for kind in TetrominoType::all() {
            let original = kind.shape();
            let mut shape = original.clone();
            for _ in 0..4 {
                shape = shape.rotated_cw();
            }
            assert_eq!(shape, original, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = TetrominoType::O.shape();
        assert_eq!(o.rotated_cw(), o);
    }
}
