//! Score, level, and fall-speed progression

use crate::difficulty::Difficulty;

/// Floor for the fall speed, in seconds per step
pub const MIN_FALL_SPEED: f64 = 0.1;

/// Per-session scoring state.
///
/// Scoring is linear: every cleared line is worth `100 * level`, with no
/// bonus for clearing several at once. The level advances on every single
/// cleared line, and each level-up shaves the difficulty's speed-increase
/// off the fall speed, floored at [`MIN_FALL_SPEED`].
#[derive(Debug, Clone)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level (starts at 1)
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Seconds per automatic downward step
    pub fall_speed: f64,
    difficulty: Difficulty,
}

impl Score {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            fall_speed: difficulty.fall_speed(),
            difficulty,
        }
    }

    /// Record a line clear; returns true if the level went up.
    ///
    /// Points are awarded at the level in effect before the clear.
    pub fn add_clear(&mut self, cleared: u32) -> bool {
        if cleared == 0 {
            return false;
        }
        self.lines += cleared;
        self.points += cleared as u64 * 100 * self.level as u64;

        // Level advances on every cleared line
        let new_level = self.lines + 1;
        if new_level > self.level {
            self.level = new_level;
            self.fall_speed =
                (self.fall_speed - self.difficulty.speed_increase()).max(MIN_FALL_SPEED);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new(Difficulty::Medium);
        assert!(score.add_clear(1));
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
        assert_eq!(score.level, 2);
    }

    #[test]
    fn test_points_use_level_before_clear() {
        let mut score = Score::new(Difficulty::Easy);
        score.add_clear(1); // 1 * 100 * 1, now level 2
        score.add_clear(2); // 2 * 100 * 2, now level 4
        assert_eq!(score.points, 100 + 400);
        assert_eq!(score.level, 4);
    }

    #[test]
    fn test_quad_scores_same_per_line_rate() {
        let mut score = Score::new(Difficulty::Medium);
        score.add_clear(4);
        assert_eq!(score.points, 4 * 100);
        assert_eq!(score.level, 5);
    }

    #[test]
    fn test_level_advances_every_line() {
        let mut score = Score::new(Difficulty::Easy);
        for expected in 2..=6 {
            score.add_clear(1);
            assert_eq!(score.level, expected);
        }
    }

    #[test]
    fn test_fall_speed_floors_at_minimum() {
        let mut score = Score::new(Difficulty::Easy);
        // Easy starts at 0.7 and loses 0.3 per level-up
        score.add_clear(1);
        assert!((score.fall_speed - 0.4).abs() < 1e-9);
        score.add_clear(1);
        assert!((score.fall_speed - MIN_FALL_SPEED).abs() < 1e-9);
        score.add_clear(1);
        assert!((score.fall_speed - MIN_FALL_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_zero_clear_changes_nothing() {
        let mut score = Score::new(Difficulty::Hard);
        assert!(!score.add_clear(0));
        assert_eq!(score.points, 0);
        assert_eq!(score.lines, 0);
        assert_eq!(score.level, 1);
    }
}
