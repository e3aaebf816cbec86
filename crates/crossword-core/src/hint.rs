//! Hint selection and score deduction policies

use crate::completion::unsolved_cells;
use crate::input::PlayerInput;
use crate::progression::Notice;
use crate::puzzle::Puzzle;
use crate::types::{Difficulty, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score and quota rules for hints in one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPolicy {
    /// Points taken per hint
    pub deduction: u32,
    /// Lowest score a hint can leave
    pub floor: u32,
    /// Hints allowed per session, `None` for unlimited
    pub quota: Option<usize>,
}

impl HintPolicy {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                deduction: 1,
                floor: 0,
                quota: None,
            },
            Difficulty::Normal => Self {
                deduction: 2,
                floor: 10,
                quota: Some(10),
            },
            Difficulty::Hard => Self {
                deduction: 3,
                floor: 20,
                quota: Some(5),
            },
        }
    }

    /// Score after one hint: clamped at the floor, and never higher than
    /// `score` even when `score` is already under the floor.
    pub fn deduct(&self, score: u32) -> u32 {
        score.saturating_sub(self.deduction).max(self.floor).min(score)
    }

    pub fn state(&self, used: usize) -> HintState {
        match self.quota {
            Some(quota) if used >= quota => HintState::Exhausted,
            _ => HintState::Available,
        }
    }

    /// Hints left, `None` when unlimited
    pub fn remaining(&self, used: usize) -> Option<usize> {
        self.quota.map(|quota| quota.saturating_sub(used))
    }
}

/// Hint availability within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    Available,
    /// Quota used up; only a tier change resets it
    Exhausted,
}

/// Result of asking for a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    Revealed { pos: Position, letter: char },
    /// Every occupied cell is already correct
    NothingToReveal,
    QuotaExhausted,
}

impl HintOutcome {
    /// Message to show the player, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            HintOutcome::Revealed { .. } => None,
            HintOutcome::NothingToReveal => Some(Notice::NothingToReveal),
            HintOutcome::QuotaExhausted => Some(Notice::HintQuotaReached),
        }
    }
}

/// Pick an unsolved cell uniformly at random and force its solution letter in
pub fn reveal_random<R: Rng + ?Sized>(
    puzzle: &Puzzle,
    input: &mut PlayerInput,
    rng: &mut R,
) -> Option<(Position, char)> {
    let unsolved = unsolved_cells(puzzle, input);
    let pos = *unsolved.choose(rng)?;
    let letter = puzzle.solution_at(pos)?;
    input.set(pos, Some(letter));
    Some((pos, letter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::is_solved;
    use crate::corpus::{ClueCorpus, ClueEntry};
    use crate::layout::{RawLayout, RawPlacement};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn puzzle() -> Puzzle {
        let layout = RawLayout {
            table: vec![vec!["s".into(), "u".into(), "n".into()]],
            result: vec![RawPlacement {
                answer: "sun".into(),
                startx: 1,
                starty: 1,
                orientation: "across".into(),
                position: Some(1),
            }],
        };
        Puzzle::build(
            &layout,
            &ClueCorpus::new(vec![ClueEntry::new("sun", "Star")]).unwrap(),
        )
    }

    #[test]
    fn test_easy_floors_at_zero() {
        let policy = HintPolicy::for_difficulty(Difficulty::Easy);
        assert_eq!(policy.deduct(5), 4);
        assert_eq!(policy.deduct(0), 0);
    }

    #[test]
    fn test_tier_floor_clamps_deduction() {
        let normal = HintPolicy::for_difficulty(Difficulty::Normal);
        assert_eq!(normal.deduct(50), 48);
        assert_eq!(normal.deduct(11), 10);
        assert_eq!(normal.deduct(10), 10);

        let hard = HintPolicy::for_difficulty(Difficulty::Hard);
        assert_eq!(hard.deduct(22), 20);
        let mut score = 100;
        for _ in 0..100 {
            score = hard.deduct(score);
            assert!(score >= hard.floor);
        }
    }

    #[test]
    fn test_deduct_never_raises_score() {
        let hard = HintPolicy::for_difficulty(Difficulty::Hard);
        assert_eq!(hard.deduct(5), 5);
        assert_eq!(hard.deduct(0), 0);
    }

    #[test]
    fn test_quota_states() {
        let normal = HintPolicy::for_difficulty(Difficulty::Normal);
        assert_eq!(normal.state(9), HintState::Available);
        assert_eq!(normal.state(10), HintState::Exhausted);
        assert_eq!(normal.remaining(4), Some(6));

        let easy = HintPolicy::for_difficulty(Difficulty::Easy);
        assert_eq!(easy.state(1_000), HintState::Available);
        assert_eq!(easy.remaining(1_000), None);
    }

    #[test]
    fn test_reveal_fills_unsolved_cells_only() {
        let puzzle = puzzle();
        let mut input = PlayerInput::for_puzzle(&puzzle);
        input.set(Position::new(0, 0), Some('s'));
        let mut rng = StdRng::seed_from_u64(5);

        let mut revealed = Vec::new();
        while let Some((pos, letter)) = reveal_random(&puzzle, &mut input, &mut rng) {
            assert_eq!(input.letter(pos), Some(letter));
            assert_eq!(puzzle.solution_at(pos), Some(letter));
            revealed.push(pos);
        }
        revealed.sort();
        assert_eq!(revealed, vec![Position::new(0, 1), Position::new(0, 2)]);
        assert!(is_solved(&puzzle, &input));
    }

    #[test]
    fn test_reveal_overwrites_wrong_letter() {
        let puzzle = puzzle();
        let mut input = PlayerInput::for_puzzle(&puzzle);
        input.set(Position::new(0, 0), Some('s'));
        input.set(Position::new(0, 1), Some('u'));
        input.set(Position::new(0, 2), Some('x'));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            reveal_random(&puzzle, &mut input, &mut rng),
            Some((Position::new(0, 2), 'n'))
        );
    }
}
