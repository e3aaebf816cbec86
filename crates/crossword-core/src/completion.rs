//! Completion detection

use crate::input::PlayerInput;
use crate::puzzle::Puzzle;
use crate::types::Position;
use tracing::warn;

/// Whether every occupied cell holds its solution letter.
///
/// A puzzle without words is never solved. An input grid that has drifted
/// out of shape with the puzzle counts as unsolved rather than panicking.
pub fn is_solved(puzzle: &Puzzle, input: &PlayerInput) -> bool {
    let mut any = false;
    for pos in puzzle.occupied() {
        any = true;
        let Some(slot) = input.get(pos) else {
            warn!(%pos, "player input has no cell for an occupied position");
            return false;
        };
        if !letters_match(puzzle.solution_at(pos), slot) {
            return false;
        }
    }
    any
}

/// Whether the player's letter at `pos` is the solution letter
pub fn is_cell_correct(puzzle: &Puzzle, input: &PlayerInput, pos: Position) -> bool {
    match puzzle.solution_at(pos) {
        Some(solution) => letters_match(Some(solution), input.letter(pos)),
        None => false,
    }
}

/// Occupied cells whose input is empty or wrong, in reading order
pub fn unsolved_cells(puzzle: &Puzzle, input: &PlayerInput) -> Vec<Position> {
    puzzle
        .occupied()
        .filter(|&pos| !is_cell_correct(puzzle, input, pos))
        .collect()
}

fn letters_match(solution: Option<char>, entered: Option<char>) -> bool {
    match (solution, entered) {
        (Some(a), Some(b)) => a.to_lowercase().eq(b.to_lowercase()),
        _ => false,
    }
}
