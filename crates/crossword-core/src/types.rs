use crate::error::ParseDifficultyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell position in the grid (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position in `direction`, or `None` when it would
    /// fall below row or column zero. Upper bounds are the grid's concern.
    pub fn step(self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Position::new(row, self.col)),
            Direction::Down => Some(Position::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Position::new(self.row, col)),
            Direction::Right => Some(Position::new(self.row, self.col + 1)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Arrow-key navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Orientation of a placed word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    /// The position of the `index`-th letter of a word starting at `origin`
    pub fn cell(self, origin: Position, index: usize) -> Position {
        match self {
            Orientation::Across => Position::new(origin.row, origin.col + index),
            Orientation::Down => Position::new(origin.row + index, origin.col),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Across => "across",
            Orientation::Down => "down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Across => write!(f, "Across"),
            Orientation::Down => write!(f, "Down"),
        }
    }
}

/// Difficulty tier of a puzzle
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// All tiers in ladder order
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// Number of words requested from the layout provider
    pub fn word_count(&self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 10,
            Difficulty::Hard => 15,
        }
    }

    /// The tier that follows this one, `None` after Hard
    pub fn next(&self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Normal),
            Difficulty::Normal => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    /// Whether correct cells are highlighted while playing.
    /// Hard players only learn they are right when the whole grid is.
    pub fn shows_feedback(&self) -> bool {
        !matches!(self, Difficulty::Hard)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
