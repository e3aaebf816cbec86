//! Puzzle state builder
//!
//! Turns layout provider output into the immutable parts of a session: the
//! solution grid, the occupancy map, clue numbering and the placement list.

use crate::corpus::ClueCorpus;
use crate::error::LayoutError;
use crate::layout::{Placement, RawLayout};
use crate::types::{Orientation, Position};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A built crossword: solution letters plus the words that produce them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    /// Solution letter per cell, `None` for blocked cells
    solution: Vec<Vec<Option<char>>>,
    placements: Vec<Placement>,
    /// Clue number per origin cell
    numbers: BTreeMap<Position, u32>,
}

impl Puzzle {
    /// Build a puzzle from provider output, attaching clues from `corpus`.
    ///
    /// Invalid records are dropped with a warning, so the result may hold
    /// fewer words than the provider reported.
    pub fn build(layout: &RawLayout, corpus: &ClueCorpus) -> Self {
        let rows = layout.rows();
        let cols = layout.cols();
        let mut solution = vec![vec![None; cols]; rows];
        let mut placements: Vec<Placement> = Vec::with_capacity(layout.result.len());

        for record in &layout.result {
            let checked = record
                .to_placement(rows, cols)
                .and_then(|placement| check_crossings(placement, layout, &solution, &placements));

            match checked {
                Ok(mut placement) => {
                    for (pos, letter) in placement.letters() {
                        solution[pos.row][pos.col] = Some(letter);
                    }
                    placement.clue = corpus
                        .clue_for(&placement.answer)
                        .unwrap_or_default()
                        .to_string();
                    if placement.clue.is_empty() {
                        warn!(answer = %placement.answer, "no clue found for placed word");
                    }
                    placements.push(placement);
                }
                Err(err) => warn!(%err, "dropping placement from layout"),
            }
        }

        let numbers = assign_numbers(&mut placements);

        debug!(
            rows,
            cols,
            words = placements.len(),
            requested = layout.result.len(),
            "built puzzle"
        );

        Self {
            rows,
            cols,
            solution,
            placements,
            numbers,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Whether `pos` belongs to at least one word
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.solution_at(pos).is_some()
    }

    pub fn solution_at(&self, pos: Position) -> Option<char> {
        self.solution.get(pos.row)?.get(pos.col).copied().flatten()
    }

    /// Occupancy map: `true` for every solution-bearing cell
    pub fn occupancy(&self) -> Vec<Vec<bool>> {
        self.solution
            .iter()
            .map(|row| row.iter().map(Option::is_some).collect())
            .collect()
    }

    /// Occupied cells in reading order
    pub fn occupied(&self) -> impl Iterator<Item = Position> + '_ {
        self.solution.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_some())
                .map(move |(col, _)| Position::new(row, col))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// First occupied cell in reading order
    pub fn first_occupied(&self) -> Option<Position> {
        self.occupied().next()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Clue number shown at `pos`, if it is an origin cell
    pub fn number_at(&self, pos: Position) -> Option<u32> {
        self.numbers.get(&pos).copied()
    }

    /// Words carrying clue number `number` (one across and/or one down)
    pub fn words_numbered(&self, number: u32) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.number == number)
    }

    /// The one or two words covering `pos`
    pub fn words_at(&self, pos: Position) -> Vec<&Placement> {
        self.placements.iter().filter(|p| p.contains(pos)).collect()
    }

    /// `(number, clue)` pairs for one orientation, sorted by number
    pub fn clues(&self, orientation: Orientation) -> Vec<(u32, &str)> {
        let mut clues: Vec<(u32, &str)> = self
            .placements
            .iter()
            .filter(|p| p.orientation == orientation)
            .map(|p| (p.number, p.clue.as_str()))
            .collect();
        clues.sort_by_key(|(number, _)| *number);
        clues
    }
}

/// Reject a placement whose letters disagree with the table or with words
/// already accepted, or that repeats an accepted word's slot.
fn check_crossings(
    placement: Placement,
    layout: &RawLayout,
    solution: &[Vec<Option<char>>],
    accepted: &[Placement],
) -> Result<Placement, LayoutError> {
    if accepted
        .iter()
        .any(|p| p.origin == placement.origin && p.orientation == placement.orientation)
    {
        return Err(LayoutError::Duplicate {
            answer: placement.answer,
            position: placement.origin,
        });
    }

    for (pos, letter) in placement.letters() {
        let expected = solution[pos.row][pos.col].or_else(|| layout.letter_at(pos));
        if let Some(existing) = expected {
            if existing != letter {
                return Err(LayoutError::Conflict {
                    answer: placement.answer.clone(),
                    position: pos,
                    letter,
                    existing,
                });
            }
        }
    }

    Ok(placement)
}

/// Settle clue numbers.
///
/// Provider numbers are kept when every word has one, words sharing an
/// origin share it and different origins differ. Otherwise origins are
/// renumbered from 1 in reading order.
fn assign_numbers(placements: &mut [Placement]) -> BTreeMap<Position, u32> {
    let mut by_origin: BTreeMap<Position, u32> = BTreeMap::new();
    let mut consistent = true;

    for placement in placements.iter() {
        if placement.number == 0 {
            consistent = false;
            break;
        }
        match by_origin.get(&placement.origin) {
            Some(&number) if number != placement.number => {
                consistent = false;
                break;
            }
            Some(_) => {}
            None => {
                if by_origin.values().any(|&n| n == placement.number) {
                    consistent = false;
                    break;
                }
                by_origin.insert(placement.origin, placement.number);
            }
        }
    }

    if !consistent {
        debug!("renumbering clues in reading order");
        by_origin = placements.iter().map(|p| (p.origin, 0)).collect();
        for (n, number) in by_origin.values_mut().enumerate() {
            *number = n as u32 + 1;
        }
        for placement in placements.iter_mut() {
            placement.number = by_origin[&placement.origin];
        }
    }

    by_origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::ClueEntry;
    use crate::layout::RawPlacement;

    fn corpus() -> ClueCorpus {
        ClueCorpus::new(vec![
            ClueEntry::new("cat", "Feline pet"),
            ClueEntry::new("cow", "Dairy animal"),
            ClueEntry::new("tea", "Hot drink"),
        ])
        .unwrap()
    }

    fn table(rows: &[&str]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.chars().map(|c| c.to_string()).collect())
            .collect()
    }

    fn record(answer: &str, startx: usize, starty: usize, orientation: &str, position: Option<u32>) -> RawPlacement {
        RawPlacement {
            answer: answer.to_string(),
            startx,
            starty,
            orientation: orientation.to_string(),
            position,
        }
    }

    /// c a t
    /// o - e
    /// w - a
    fn crossing_layout() -> RawLayout {
        RawLayout {
            table: table(&["cat", "o-e", "w-a"]),
            result: vec![
                record("cat", 1, 1, "across", Some(1)),
                record("cow", 1, 1, "down", Some(1)),
                record("tea", 3, 1, "down", Some(2)),
            ],
        }
    }

    #[test]
    fn test_build_solution_and_occupancy() {
        let puzzle = Puzzle::build(&crossing_layout(), &corpus());
        assert_eq!(puzzle.rows(), 3);
        assert_eq!(puzzle.cols(), 3);
        assert_eq!(puzzle.solution_at(Position::new(0, 2)), Some('t'));
        assert!(!puzzle.is_occupied(Position::new(1, 1)));
        assert!(!puzzle.is_occupied(Position::new(9, 9)));
        assert_eq!(puzzle.occupied_count(), 7);
        assert_eq!(
            puzzle.occupancy(),
            vec![
                vec![true, true, true],
                vec![true, false, true],
                vec![true, false, true],
            ]
        );
    }

    #[test]
    fn test_shared_origin_shares_number() {
        let puzzle = Puzzle::build(&crossing_layout(), &corpus());
        assert_eq!(puzzle.number_at(Position::new(0, 0)), Some(1));
        assert_eq!(puzzle.number_at(Position::new(0, 2)), Some(2));
        assert_eq!(puzzle.number_at(Position::new(1, 0)), None);
        assert_eq!(puzzle.words_numbered(1).count(), 2);
        assert_eq!(puzzle.words_at(Position::new(0, 0)).len(), 2);
        assert_eq!(puzzle.words_at(Position::new(0, 1)).len(), 1);
    }

    #[test]
    fn test_clues_attached_and_sorted() {
        let puzzle = Puzzle::build(&crossing_layout(), &corpus());
        assert_eq!(puzzle.clues(Orientation::Across), vec![(1, "Feline pet")]);
        assert_eq!(
            puzzle.clues(Orientation::Down),
            vec![(1, "Dairy animal"), (2, "Hot drink")]
        );
    }

    #[test]
    fn test_missing_clue_is_empty() {
        let layout = RawLayout {
            table: table(&["dog"]),
            result: vec![record("dog", 1, 1, "across", Some(1))],
        };
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.placements().len(), 1);
        assert_eq!(puzzle.placements()[0].clue, "");
    }

    #[test]
    fn test_invalid_records_are_dropped() {
        let layout = RawLayout {
            table: table(&["cat", "o-e", "w-a"]),
            result: vec![
                record("cat", 1, 1, "across", Some(1)),
                record("cab", 1, 1, "down", Some(1)),
                record("tea", 3, 1, "sideways", Some(2)),
                record("teapot", 3, 1, "down", Some(2)),
                record("cat", 1, 1, "across", Some(1)),
                record("cat", usize::MAX, 1, "across", Some(3)),
                record("cow", 1, usize::MAX, "down", Some(3)),
            ],
        };
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.placements().len(), 1);
        // Letters left in the table by dropped words are not playable
        assert!(!puzzle.is_occupied(Position::new(1, 0)));
        assert_eq!(puzzle.occupied_count(), 3);
    }

    #[test]
    fn test_missing_or_inconsistent_numbers_are_renumbered() {
        let mut layout = crossing_layout();
        layout.result[0].position = None;
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.number_at(Position::new(0, 0)), Some(1));
        assert_eq!(puzzle.number_at(Position::new(0, 2)), Some(2));

        let mut layout = crossing_layout();
        layout.result[1].position = Some(7);
        let puzzle = Puzzle::build(&layout, &corpus());
        assert!(puzzle.placements().iter().all(|p| p.number == 1 || p.number == 2));
        assert_eq!(puzzle.words_numbered(1).count(), 2);

        let mut layout = crossing_layout();
        layout.result[2].position = Some(1);
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.number_at(Position::new(0, 2)), Some(2));
    }

    #[test]
    fn test_provider_numbers_are_kept_when_consistent() {
        let mut layout = crossing_layout();
        layout.result[0].position = Some(4);
        layout.result[1].position = Some(4);
        layout.result[2].position = Some(9);
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.number_at(Position::new(0, 0)), Some(4));
        assert_eq!(puzzle.number_at(Position::new(0, 2)), Some(9));
    }

    #[test]
    fn test_ragged_table_uses_widest_row() {
        let layout = RawLayout {
            table: vec![vec!["a".to_string()], table(&["cat"]).remove(0)],
            result: vec![record("cat", 1, 2, "across", Some(1))],
        };
        let puzzle = Puzzle::build(&layout, &corpus());
        assert_eq!(puzzle.cols(), 3);
        assert_eq!(puzzle.occupied_count(), 3);
        assert!(!puzzle.is_occupied(Position::new(0, 0)));
    }

    #[test]
    fn test_empty_layout() {
        let puzzle = Puzzle::build(&RawLayout::default(), &corpus());
        assert_eq!(puzzle.rows(), 0);
        assert_eq!(puzzle.first_occupied(), None);
        assert!(puzzle.placements().is_empty());
    }
}
