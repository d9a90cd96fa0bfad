//! Session configuration: board dimensions and difficulty

use crate::board::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::difficulty::Difficulty;
use anyhow::{ensure, Result};

/// Configuration accepted at session start. Validated once here; the rest of
/// the engine can assume the dimensions are sane.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub difficulty: Difficulty,
}

impl GameConfig {
    /// Build a validated configuration; fails fast on degenerate dimensions
    pub fn new(width: usize, height: usize, difficulty: Difficulty) -> Result<Self> {
        ensure!(width > 0, "grid width must be positive, got {width}");
        ensure!(height > 0, "grid height must be positive, got {height}");
        Ok(Self {
            width,
            height,
            difficulty,
        })
    }

    /// Default 10x20 grid with the given difficulty
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            difficulty,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 20);
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(GameConfig::new(0, 20, Difficulty::Easy).is_err());
        assert!(GameConfig::new(10, 0, Difficulty::Easy).is_err());
        assert!(GameConfig::new(10, 20, Difficulty::Easy).is_ok());
    }
}
