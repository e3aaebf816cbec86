//! Player input grid, edit validation and cursor navigation

use crate::puzzle::Puzzle;
use crate::types::{Direction, Position};

/// Letters typed by the player, one slot per grid cell (blocked cells included)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInput {
    cells: Vec<Vec<Option<char>>>,
}

impl PlayerInput {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![None; cols]; rows],
        }
    }

    /// Empty input with the same shape as `puzzle`
    pub fn for_puzzle(puzzle: &Puzzle) -> Self {
        Self::empty(puzzle.rows(), puzzle.cols())
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Slot at `pos`: `None` outside the grid, `Some(None)` for an empty cell
    pub fn get(&self, pos: Position) -> Option<Option<char>> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Letter at `pos`, `None` when empty or outside the grid
    pub fn letter(&self, pos: Position) -> Option<char> {
        self.get(pos).flatten()
    }

    /// Overwrite a slot. Returns `false` when `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, value: Option<char>) -> bool {
        match self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Whether this grid has exactly the puzzle's coordinate domain
    pub fn matches_shape(&self, puzzle: &Puzzle) -> bool {
        self.cells.len() == puzzle.rows() && self.cells.iter().all(|row| row.len() == puzzle.cols())
    }

    /// Snapshot as strings, empty string for unfilled cells
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(String::from).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Result of a single cell edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Blocked or out-of-bounds cell, nothing written
    Ignored,
    /// The cell was emptied
    Cleared,
    /// Written, but not the solution letter
    Incorrect,
    /// Written and correct; `next_focus` is the auto-advance target
    Correct { next_focus: Option<Position> },
}

/// Reduce raw typed text to the stored letter: its last character, lower-cased.
/// Typing over a filled cell sends both letters, and the new one wins.
pub fn normalize(raw: &str) -> Option<char> {
    let last = raw.chars().last()?;
    Some(last.to_lowercase().next().unwrap_or(last))
}

/// Apply one edit at `pos`.
///
/// The letter is stored even when wrong. A correct letter reports the next
/// cell along the word so the caller can move focus there.
pub fn apply_edit(puzzle: &Puzzle, input: &mut PlayerInput, pos: Position, raw: &str) -> EditOutcome {
    let Some(solution) = puzzle.solution_at(pos) else {
        return EditOutcome::Ignored;
    };

    let letter = normalize(raw);
    if !input.set(pos, letter) {
        return EditOutcome::Ignored;
    }

    match letter {
        None => EditOutcome::Cleared,
        Some(c) if c == solution => EditOutcome::Correct {
            next_focus: auto_advance(puzzle, pos),
        },
        Some(_) => EditOutcome::Incorrect,
    }
}

/// Next cell after a correct entry at `pos`.
///
/// The word runs across when a horizontal neighbour is occupied, otherwise
/// down. The target must be in bounds and occupied.
pub fn auto_advance(puzzle: &Puzzle, pos: Position) -> Option<Position> {
    let horizontal = pos
        .step(Direction::Left)
        .is_some_and(|left| puzzle.is_occupied(left))
        || pos
            .step(Direction::Right)
            .is_some_and(|right| puzzle.is_occupied(right));

    let next = if horizontal {
        pos.step(Direction::Right)?
    } else {
        pos.step(Direction::Down)?
    };

    puzzle.is_occupied(next).then_some(next)
}

/// Move from `pos` in `direction`, jumping over blocked cells, to the next
/// occupied cell. `None` when the edge of the grid comes first.
pub fn navigate(puzzle: &Puzzle, pos: Position, direction: Direction) -> Option<Position> {
    let mut current = pos;
    loop {
        current = current.step(direction)?;
        if !puzzle.in_bounds(current) {
            return None;
        }
        if puzzle.is_occupied(current) {
            return Some(current);
        }
    }
}
