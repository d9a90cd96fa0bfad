//! Difficulty table controlling gravity speed

use anyhow::bail;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available difficulties, each a (starting fall speed, speed-up per level)
/// pair from a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Seconds per automatic downward step at level 1
    pub fn fall_speed(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.4,
            Difficulty::Hard => 0.1,
        }
    }

    /// Seconds shaved off the fall speed on each level-up
    pub fn speed_increase(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.35,
            Difficulty::Hard => 0.45,
        }
    }

    /// Menu accent color
    pub fn color(&self) -> Color {
        match self {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Rgb(255, 165, 0),
            Difficulty::Hard => Color::Red,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => bail!("unknown difficulty: {other:?} (expected easy, medium, or hard)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_harder_means_faster_start() {
        assert!(Difficulty::Easy.fall_speed() > Difficulty::Medium.fall_speed());
        assert!(Difficulty::Medium.fall_speed() > Difficulty::Hard.fall_speed());
    }
}
