//! Play session: one puzzle at a time, driven by UI events and clock ticks

use crate::completion::{is_cell_correct, is_solved};
use crate::config::SessionConfig;
use crate::corpus::ClueCorpus;
use crate::generator::GreedyLayout;
use crate::hint::{reveal_random, HintOutcome, HintState};
use crate::input::{apply_edit, navigate, EditOutcome, PlayerInput};
use crate::layout::{LayoutProvider, LayoutWord};
use crate::progression::{advance, AdvanceOutcome, Notice, Stage};
use crate::puzzle::Puzzle;
use crate::schedule::{Scheduler, TaskHandle};
use crate::store::{read_difficulty, read_score, KeyValueStore, MemoryStore, DIFFICULTY_KEY, SCORE_KEY};
use crate::types::{Difficulty, Direction, Position};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Work the session schedules for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Debounced completion check after an edit or hint
    CheckCompletion,
    /// One second of play time
    TimerTick,
}

/// Something that happened during [`Session::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The puzzle just became solved
    Solved,
    /// The play clock advanced to this many seconds
    Tick(u64),
}

impl SessionEvent {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SessionEvent::Solved => Some(Notice::Solved),
            SessionEvent::Tick(_) => None,
        }
    }
}

/// Builder for [`Session`]. Anything not supplied gets a sensible default:
/// an in-memory store, an entropy-seeded RNG and the greedy layout.
pub struct SessionBuilder {
    corpus: ClueCorpus,
    config: SessionConfig,
    store: Option<Box<dyn KeyValueStore>>,
    rng: Option<Box<dyn RngCore>>,
    layout: Option<Box<dyn LayoutProvider>>,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
}

impl SessionBuilder {
    pub fn new(corpus: ClueCorpus) -> Self {
        Self {
            corpus,
            config: SessionConfig::default(),
            store: None,
            rng: None,
            layout: None,
            seed: None,
            difficulty: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn layout(mut self, provider: impl LayoutProvider + 'static) -> Self {
        self.layout = Some(Box::new(provider));
        self
    }

    /// Seed word sampling, hint choice and the default layout
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start at this tier instead of the stored one
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn build(self) -> Session {
        let seed = self.seed;
        let store: Box<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Box::new(MemoryStore::new()),
        };
        let rng: Box<dyn RngCore> = match (self.rng, seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
            (None, None) => Box::new(StdRng::from_entropy()),
        };
        let layout: Box<dyn LayoutProvider> = match (self.layout, seed) {
            (Some(layout), _) => layout,
            (None, Some(seed)) => Box::new(GreedyLayout::with_seed(seed)),
            (None, None) => Box::new(GreedyLayout::new()),
        };

        let stored = read_difficulty(store.as_ref());
        let difficulty = self.difficulty.or(stored).unwrap_or_default();
        let score = read_score(store.as_ref()).unwrap_or(self.config.initial_score);

        let mut session = Session {
            config: self.config,
            stage: Stage::Playing(difficulty),
            difficulty,
            puzzle: Puzzle::default(),
            input: PlayerInput::empty(0, 0),
            focus: None,
            score,
            hints_used: 0,
            elapsed: Duration::ZERO,
            solved: false,
            scheduler: Scheduler::new(),
            pending_check: None,
            timer: None,
            store,
            rng,
            layout,
            corpus: self.corpus,
        };

        if stored != Some(difficulty) {
            session.persist(DIFFICULTY_KEY, difficulty.as_str());
        }
        info!(%difficulty, score, "session started");
        session.load_tier(difficulty);
        session
    }
}

/// Game state for the difficulty ladder.
///
/// Every handler runs to completion on the caller's thread. Time only moves
/// through [`Session::tick`], which fires the debounced completion check and
/// the play clock.
pub struct Session {
    config: SessionConfig,
    stage: Stage,
    difficulty: Difficulty,
    puzzle: Puzzle,
    input: PlayerInput,
    focus: Option<Position>,
    score: u32,
    hints_used: usize,
    elapsed: Duration,
    solved: bool,
    scheduler: Scheduler<SessionTask>,
    pending_check: Option<TaskHandle>,
    timer: Option<TaskHandle>,
    store: Box<dyn KeyValueStore>,
    rng: Box<dyn RngCore>,
    layout: Box<dyn LayoutProvider>,
    corpus: ClueCorpus,
}

impl Session {
    pub fn builder(corpus: ClueCorpus) -> SessionBuilder {
        SessionBuilder::new(corpus)
    }

    // ==================== Events ====================

    /// Player typed `text` into `pos`. Edits after the puzzle is solved
    /// are ignored.
    pub fn on_cell_edit(&mut self, pos: Position, text: &str) -> EditOutcome {
        if self.solved || self.stage.is_finished() {
            return EditOutcome::Ignored;
        }

        let outcome = apply_edit(&self.puzzle, &mut self.input, pos, text);
        match outcome {
            EditOutcome::Ignored => return outcome,
            EditOutcome::Correct {
                next_focus: Some(next),
            } => self.focus = Some(next),
            _ => self.focus = Some(pos),
        }

        self.schedule_check();
        outcome
    }

    /// Move focus, skipping blocked cells. Focus stays put at the edge.
    pub fn on_navigate(&mut self, direction: Direction) -> Option<Position> {
        let current = self.focus?;
        if let Some(next) = navigate(&self.puzzle, current, direction) {
            self.focus = Some(next);
        }
        self.focus
    }

    /// Focus a cell directly; blocked cells are refused
    pub fn set_focus(&mut self, pos: Position) -> bool {
        if self.puzzle.is_occupied(pos) {
            self.focus = Some(pos);
            true
        } else {
            false
        }
    }

    /// Reveal one unsolved cell, paying the tier's deduction
    pub fn on_request_hint(&mut self) -> HintOutcome {
        if self.stage.is_finished() {
            return HintOutcome::NothingToReveal;
        }

        let policy = self.config.tier(self.difficulty).hints;
        if policy.state(self.hints_used) == HintState::Exhausted {
            debug!(used = self.hints_used, "hint refused, quota reached");
            return HintOutcome::QuotaExhausted;
        }

        let Some((pos, letter)) = reveal_random(&self.puzzle, &mut self.input, &mut *self.rng)
        else {
            return HintOutcome::NothingToReveal;
        };

        self.hints_used += 1;
        self.score = policy.deduct(self.score);
        self.persist(SCORE_KEY, &self.score.to_string());
        self.schedule_check();
        debug!(%pos, used = self.hints_used, score = self.score, "hint revealed");
        HintOutcome::Revealed { pos, letter }
    }

    /// Move to the next tier. Refused until the puzzle has been confirmed solved.
    pub fn on_request_advance(&mut self) -> AdvanceOutcome {
        let outcome = advance(self.stage, self.solved);
        match outcome {
            AdvanceOutcome::Advanced(next) => {
                self.stage = Stage::Playing(next);
                self.persist(SCORE_KEY, &self.score.to_string());
                self.persist(DIFFICULTY_KEY, next.as_str());
                info!(difficulty = %next, score = self.score, "advanced");
                self.load_tier(next);
            }
            AdvanceOutcome::AllComplete => {
                self.stage = Stage::AllComplete;
                self.teardown();
                if let Err(err) = self.store.remove(SCORE_KEY) {
                    warn!(%err, "failed to clear stored score");
                }
                self.persist(DIFFICULTY_KEY, Difficulty::Easy.as_str());
                info!(score = self.score, "all tiers complete");
            }
            AdvanceOutcome::NotSolved | AdvanceOutcome::AlreadyFinished => {
                debug!(?outcome, "advance refused");
            }
        }
        outcome
    }

    /// Jump to a tier by hand. Resets score and hints.
    pub fn on_select_difficulty(&mut self, difficulty: Difficulty) {
        self.stage = Stage::Playing(difficulty);
        self.score = self.config.initial_score;
        self.persist(SCORE_KEY, &self.score.to_string());
        self.persist(DIFFICULTY_KEY, difficulty.as_str());
        info!(%difficulty, "difficulty selected");
        self.load_tier(difficulty);
    }

    /// Fire every task due by `now` (monotonic time since start)
    pub fn tick(&mut self, now: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.pop_due(now) {
            match task {
                SessionTask::TimerTick => {
                    if !self.solved {
                        self.elapsed += self.config.timer_period;
                        events.push(SessionEvent::Tick(self.elapsed_secs()));
                    }
                }
                SessionTask::CheckCompletion => {
                    self.pending_check = None;
                    if !self.solved && is_solved(&self.puzzle, &self.input) {
                        self.solved = true;
                        if let Some(timer) = self.timer.take() {
                            self.scheduler.cancel(timer);
                        }
                        info!(
                            difficulty = %self.difficulty,
                            elapsed = self.elapsed_secs(),
                            hints = self.hints_used,
                            "puzzle solved"
                        );
                        events.push(SessionEvent::Solved);
                    }
                }
            }
        }
        events
    }

    /// Cancel every pending task
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.pending_check = None;
        self.timer = None;
    }

    // ==================== Accessors ====================

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn focus(&self) -> Option<Position> {
        self.focus
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_finished()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// Play time as `MM:SS`
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// `None` when the tier has no quota
    pub fn hints_remaining(&self) -> Option<usize> {
        self.config.tier(self.difficulty).hints.remaining(self.hints_used)
    }

    pub fn hint_state(&self) -> HintState {
        self.config.tier(self.difficulty).hints.state(self.hints_used)
    }

    /// Correctness of a filled cell, or `None` when the tier hides feedback
    /// or the cell is empty
    pub fn cell_feedback(&self, pos: Position) -> Option<bool> {
        if !self.difficulty.shows_feedback() {
            return None;
        }
        self.input.letter(pos)?;
        Some(is_cell_correct(&self.puzzle, &self.input, pos))
    }

    /// Tasks waiting in the scheduler
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // ==================== Internals ====================

    fn load_tier(&mut self, difficulty: Difficulty) {
        self.teardown();

        let word_count = self.config.tier(difficulty).word_count;
        let words: Vec<LayoutWord> = self
            .corpus
            .sample(word_count, &mut *self.rng)
            .iter()
            .map(|word| LayoutWord::new(word))
            .collect();
        let layout = self.layout.generate_layout(&words, difficulty);
        self.puzzle = Puzzle::build(&layout, &self.corpus);
        if self.puzzle.placements().is_empty() {
            warn!(%difficulty, "layout produced no usable words");
        }

        self.input = PlayerInput::for_puzzle(&self.puzzle);
        self.focus = self.puzzle.first_occupied();
        self.difficulty = difficulty;
        self.hints_used = 0;
        self.elapsed = Duration::ZERO;
        self.solved = false;
        self.timer = Some(
            self.scheduler
                .schedule_every(self.config.timer_period, SessionTask::TimerTick),
        );

        debug!(
            %difficulty,
            sampled = words.len(),
            placed = self.puzzle.placements().len(),
            "tier loaded"
        );
    }

    fn schedule_check(&mut self) {
        if let Some(pending) = self.pending_check.take() {
            self.scheduler.cancel(pending);
        }
        self.pending_check = Some(
            self.scheduler
                .schedule_once(self.config.completion_debounce, SessionTask::CheckCompletion),
        );
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(%err, key, "failed to persist");
        }
    }
}
