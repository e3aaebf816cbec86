//! Crossword puzzle engine.
//!
//! Builds a [`Puzzle`] from a layout provider's output, validates player
//! entry, detects completion, prices hints, and walks the player up the
//! Easy, Normal, Hard ladder. A [`Session`] ties these together behind a
//! set of UI events and a logical clock.
//!
//! ```no_run
//! use crossword_core::{ClueCorpus, Position, Session};
//! use std::time::Duration;
//!
//! let corpus = ClueCorpus::embedded().unwrap();
//! let mut session = Session::builder(corpus).seed(7).build();
//! if let Some(pos) = session.focus() {
//!     session.on_cell_edit(pos, "a");
//! }
//! session.tick(Duration::from_millis(100));
//! println!("{} points, {}", session.score(), session.elapsed_string());
//! ```

pub mod completion;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generator;
pub mod hint;
pub mod input;
pub mod layout;
pub mod progression;
pub mod puzzle;
pub mod schedule;
pub mod session;
pub mod store;
pub mod types;

pub use completion::{is_cell_correct, is_solved, unsolved_cells};
pub use config::{SessionConfig, TierConfig};
pub use corpus::{ClueCorpus, ClueEntry};
pub use error::{CorpusError, LayoutError, ParseDifficultyError, StoreError};
pub use generator::{GeneratorConfig, GreedyLayout};
pub use hint::{HintOutcome, HintPolicy, HintState};
pub use input::{EditOutcome, PlayerInput};
pub use layout::{LayoutProvider, LayoutWord, Placement, RawLayout, RawPlacement};
pub use progression::{AdvanceOutcome, Notice, Stage};
pub use puzzle::Puzzle;
pub use schedule::{Scheduler, TaskHandle};
pub use session::{Session, SessionBuilder, SessionEvent, SessionTask};
pub use store::{KeyValueStore, MemoryStore, DIFFICULTY_KEY, SCORE_KEY};
pub use types::{Difficulty, Direction, Orientation, Position};
