//! Error types for the crossword engine
//!
//! None of these abort a session. Layout errors drop a single placement,
//! corpus errors surface at start-up, and store errors are logged while
//! the in-memory state carries on.

use crate::types::Position;
use thiserror::Error;

/// Why a placement record from the layout provider was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown orientation `{0}`")]
    UnknownOrientation(String),
    #[error("answer `{0}` is empty or not alphabetic")]
    InvalidAnswer(String),
    #[error("placement `{answer}` starts at ({startx}, {starty}) but coordinates are 1-based")]
    ZeroCoordinate {
        answer: String,
        startx: usize,
        starty: usize,
    },
    #[error("placement `{answer}` runs outside the {rows}x{cols} grid")]
    OutOfBounds {
        answer: String,
        rows: usize,
        cols: usize,
    },
    #[error("placement `{answer}` puts `{letter}` at {position} where `{existing}` is expected")]
    Conflict {
        answer: String,
        position: Position,
        letter: char,
        existing: char,
    },
    #[error("placement `{answer}` duplicates another word at {position}")]
    Duplicate { answer: String, position: Position },
}

/// Errors loading a clue corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse corpus: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corpus contains no usable words")]
    Empty,
}

/// Errors from a durable key/value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contents are corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}`")]
pub struct ParseDifficultyError(pub String);
