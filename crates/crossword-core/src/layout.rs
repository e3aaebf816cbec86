//! Layout provider contract
//!
//! A provider turns a word list into a character table plus one record per
//! placed word. Records arrive loosely typed (1-based coordinates, string
//! orientation) and are converted to [`Placement`] exactly once, here.

use crate::error::LayoutError;
use crate::types::{Difficulty, Orientation, Position};
use serde::{Deserialize, Serialize};

/// Table value marking a blocked cell
pub const BLOCKED_SENTINEL: &str = "-";

/// A word handed to the layout provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutWord {
    pub answer: String,
}

impl LayoutWord {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_lowercase(),
        }
    }
}

/// One placed word as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlacement {
    pub answer: String,
    /// 1-based column
    pub startx: usize,
    /// 1-based row
    pub starty: usize,
    pub orientation: String,
    /// Clue number, if the provider assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Provider output: the filled table and the placement records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLayout {
    pub table: Vec<Vec<String>>,
    pub result: Vec<RawPlacement>,
}

impl RawLayout {
    pub fn rows(&self) -> usize {
        self.table.len()
    }

    /// Width of the widest table row
    pub fn cols(&self) -> usize {
        self.table.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Letter in the table at `pos`; sentinel, empty and missing cells give `None`
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        let cell = self.table.get(pos.row)?.get(pos.col)?;
        if cell.is_empty() || cell == BLOCKED_SENTINEL {
            return None;
        }
        cell.chars().next().map(|c| c.to_lowercase().next().unwrap_or(c))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Word placement algorithm, swappable behind this trait
pub trait LayoutProvider {
    fn generate_layout(&mut self, words: &[LayoutWord], difficulty: Difficulty) -> RawLayout;
}

impl<F> LayoutProvider for F
where
    F: FnMut(&[LayoutWord], Difficulty) -> RawLayout,
{
    fn generate_layout(&mut self, words: &[LayoutWord], difficulty: Difficulty) -> RawLayout {
        self(words, difficulty)
    }
}

/// A validated word placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Lower-cased answer
    pub answer: String,
    /// 0-based start cell
    pub origin: Position,
    pub orientation: Orientation,
    /// Displayed clue number, 0 until numbering has been assigned
    pub number: u32,
    /// Clue text, empty when the corpus has none
    pub clue: String,
}

impl Placement {
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Cells claimed by this word, in answer order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.orientation.cell(self.origin, i))
    }

    /// Cells paired with the letter this word puts there
    pub fn letters(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.answer
            .chars()
            .enumerate()
            .map(move |(i, c)| (self.orientation.cell(self.origin, i), c))
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Index of `pos` within the answer
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let (along, fixed, origin_along, origin_fixed) = match self.orientation {
            Orientation::Across => (pos.col, pos.row, self.origin.col, self.origin.row),
            Orientation::Down => (pos.row, pos.col, self.origin.row, self.origin.col),
        };
        if fixed != origin_fixed || along < origin_along {
            return None;
        }
        let index = along - origin_along;
        (index < self.len()).then_some(index)
    }
}

impl RawPlacement {
    /// Convert to a [`Placement`] inside a `rows` x `cols` grid.
    ///
    /// Checks orientation, answer shape, 1-based coordinates and bounds.
    /// Crossing agreement needs the other placements and is the builder's job.
    pub fn to_placement(&self, rows: usize, cols: usize) -> Result<Placement, LayoutError> {
        let orientation = match self.orientation.trim().to_ascii_lowercase().as_str() {
            "across" => Orientation::Across,
            "down" => Orientation::Down,
            _ => return Err(LayoutError::UnknownOrientation(self.orientation.clone())),
        };

        let answer = self.answer.trim().to_lowercase();
        if answer.is_empty() || !answer.chars().all(char::is_alphabetic) {
            return Err(LayoutError::InvalidAnswer(self.answer.clone()));
        }

        if self.startx == 0 || self.starty == 0 {
            return Err(LayoutError::ZeroCoordinate {
                answer,
                startx: self.startx,
                starty: self.starty,
            });
        }

        let origin = Position::new(self.starty - 1, self.startx - 1);
        let len = answer.chars().count();
        // Bounds are checked before any cell arithmetic so huge coordinates can't wrap
        let (along, fixed, along_limit, fixed_limit) = match orientation {
            Orientation::Across => (origin.col, origin.row, cols, rows),
            Orientation::Down => (origin.row, origin.col, rows, cols),
        };
        let fits = fixed < fixed_limit
            && along
                .checked_add(len - 1)
                .is_some_and(|end| end < along_limit);
        if !fits {
            return Err(LayoutError::OutOfBounds { answer, rows, cols });
        }

        Ok(Placement {
            answer,
            origin,
            orientation,
            number: self.position.unwrap_or(0),
            clue: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(answer: &str, startx: usize, starty: usize, orientation: &str) -> RawPlacement {
        RawPlacement {
            answer: answer.to_string(),
            startx,
            starty,
            orientation: orientation.to_string(),
            position: Some(1),
        }
    }

    #[test]
    fn test_converts_one_based_coordinates() {
        let placement = raw("Cat", 2, 3, "across").to_placement(5, 5).unwrap();
        assert_eq!(placement.origin, Position::new(2, 1));
        assert_eq!(placement.answer, "cat");
        assert_eq!(placement.orientation, Orientation::Across);
        assert_eq!(placement.number, 1);
    }

    #[test]
    fn test_rejects_bad_records() {
        assert!(matches!(
            raw("cat", 1, 1, "diagonal").to_placement(3, 3),
            Err(LayoutError::UnknownOrientation(_))
        ));
        assert!(matches!(
            raw("c4t", 1, 1, "across").to_placement(3, 3),
            Err(LayoutError::InvalidAnswer(_))
        ));
        assert!(matches!(
            raw("cat", 0, 1, "across").to_placement(3, 3),
            Err(LayoutError::ZeroCoordinate { .. })
        ));
        assert!(matches!(
            raw("cat", 2, 1, "across").to_placement(3, 3),
            Err(LayoutError::OutOfBounds { .. })
        ));
        assert!(matches!(
            raw("cat", 1, 2, "DOWN").to_placement(3, 3),
            Err(LayoutError::OutOfBounds { .. })
        ));
        assert!(matches!(
            raw("cat", usize::MAX, 1, "across").to_placement(1, 3),
            Err(LayoutError::OutOfBounds { .. })
        ));
        assert!(matches!(
            raw("cat", 1, usize::MAX, "down").to_placement(3, 1),
            Err(LayoutError::OutOfBounds { .. })
        ));
        assert!(matches!(
            raw("cat", 1, usize::MAX, "across").to_placement(1, 3),
            Err(LayoutError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_cells_and_index() {
        let placement = raw("cat", 1, 1, "down").to_placement(3, 3).unwrap();
        let cells: Vec<_> = placement.cells().collect();
        assert_eq!(
            cells,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        assert_eq!(placement.index_of(Position::new(2, 0)), Some(2));
        assert_eq!(placement.index_of(Position::new(0, 1)), None);
        assert!(!placement.contains(Position::new(3, 0)));
    }

    #[test]
    fn test_raw_layout_json_contract() {
        let json = r#"{
            "table": [["c", "a", "t"], ["-", "-", "-"]],
            "result": [
                {"answer": "cat", "startx": 1, "starty": 1, "orientation": "across", "position": 1},
                {"answer": "hat", "startx": 1, "starty": 2, "orientation": "across"}
            ]
        }"#;
        let layout = RawLayout::from_json(json).unwrap();
        assert_eq!(layout.rows(), 2);
        assert_eq!(layout.cols(), 3);
        assert_eq!(layout.letter_at(Position::new(0, 1)), Some('a'));
        assert_eq!(layout.letter_at(Position::new(1, 1)), None);
        assert_eq!(layout.letter_at(Position::new(5, 5)), None);
        assert_eq!(layout.result[1].position, None);
    }

    #[test]
    fn test_closure_is_a_provider() {
        let mut provider = |words: &[LayoutWord], _difficulty: Difficulty| RawLayout {
            table: vec![words[0].answer.chars().map(|c| c.to_string()).collect()],
            result: Vec::new(),
        };
        let layout = provider.generate_layout(&[LayoutWord::new("Sun")], Difficulty::Easy);
        assert_eq!(layout.table, vec![vec!["s", "u", "n"]]);
    }
}
