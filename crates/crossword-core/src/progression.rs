//! Tier progression: Easy → Normal → Hard → all complete

use crate::types::Difficulty;
use std::fmt;

/// Where the player is on the difficulty ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Playing(Difficulty),
    /// Hard has been solved; terminal
    AllComplete,
}

impl Stage {
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            Stage::Playing(difficulty) => Some(*difficulty),
            Stage::AllComplete => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Stage::AllComplete)
    }

    /// The stage after this one is completed
    pub fn next(&self) -> Stage {
        match self {
            Stage::Playing(difficulty) => match difficulty.next() {
                Some(next) => Stage::Playing(next),
                None => Stage::AllComplete,
            },
            Stage::AllComplete => Stage::AllComplete,
        }
    }
}

/// Decide an advance request.
///
/// Only a solved puzzle moves the ladder; the finished stage never moves.
pub fn advance(stage: Stage, solved: bool) -> AdvanceOutcome {
    match stage {
        Stage::AllComplete => AdvanceOutcome::AlreadyFinished,
        Stage::Playing(_) if !solved => AdvanceOutcome::NotSolved,
        Stage::Playing(_) => match stage.next() {
            Stage::Playing(next) => AdvanceOutcome::Advanced(next),
            Stage::AllComplete => AdvanceOutcome::AllComplete,
        },
    }
}

/// Result of asking to move to the next tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced(Difficulty),
    AllComplete,
    /// Refused: the current puzzle is not correctly filled
    NotSolved,
    AlreadyFinished,
}

impl AdvanceOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            AdvanceOutcome::Advanced(difficulty) => Notice::TierStarted(*difficulty),
            AdvanceOutcome::AllComplete | AdvanceOutcome::AlreadyFinished => Notice::AllComplete,
            AdvanceOutcome::NotSolved => Notice::NotSolved,
        }
    }
}

/// Player-facing messages raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Solved,
    NotSolved,
    TierStarted(Difficulty),
    AllComplete,
    HintQuotaReached,
    NothingToReveal,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Solved => write!(f, "Your crossword is complete and correct. Well done!"),
            Notice::NotSolved => write!(f, "Finish the crossword correctly before moving on."),
            Notice::TierStarted(difficulty) => write!(f, "New {} crossword", difficulty),
            Notice::AllComplete => write!(f, "You have completed all levels. Well done!"),
            Notice::HintQuotaReached => write!(
                f,
                "You have used the maximum number of hints for this difficulty level."
            ),
            Notice::NothingToReveal => write!(f, "Every cell is already correct."),
        }
    }
}
