use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::{
    AdvanceOutcome, Difficulty, Direction, EditOutcome, HintOutcome, Notice, Placement, Position,
    Session, SessionEvent,
};
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    pub session: Session,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            session,
            theme,
            message: None,
            message_timer: 0,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Advance the session clock and age the message (called every tick)
    pub fn tick(&mut self, now: Duration) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        for event in self.session.tick(now) {
            if event == SessionEvent::Solved {
                let next = if self.session.difficulty() == Difficulty::Hard {
                    "Press Enter to finish."
                } else {
                    "Press Enter for the next level."
                };
                self.show_message(&format!("{} {}", Notice::Solved, next));
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,

            KeyCode::Up => self.navigate(Direction::Up),
            KeyCode::Down => self.navigate(Direction::Down),
            KeyCode::Left => self.navigate(Direction::Left),
            KeyCode::Right => self.navigate(Direction::Right),

            KeyCode::Char(c) if c.is_alphabetic() => self.edit(&c.to_string()),
            KeyCode::Backspace | KeyCode::Delete => self.edit(""),

            KeyCode::Char('?') => self.request_hint(),
            KeyCode::Enter => self.request_advance(),

            KeyCode::Char(c @ '1'..='3') => {
                let difficulty = match c {
                    '1' => Difficulty::Easy,
                    '2' => Difficulty::Normal,
                    _ => Difficulty::Hard,
                };
                self.session.on_select_difficulty(difficulty);
                self.show_message(&Notice::TierStarted(difficulty).to_string());
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn navigate(&mut self, direction: Direction) {
        self.session.on_navigate(direction);
    }

    fn edit(&mut self, text: &str) {
        let Some(pos) = self.session.focus() else {
            return;
        };
        if let EditOutcome::Incorrect = self.session.on_cell_edit(pos, text) {
            if self.session.difficulty().shows_feedback() {
                self.show_message("Not quite");
            }
        }
    }

    fn request_hint(&mut self) {
        match self.session.on_request_hint() {
            HintOutcome::Revealed { pos, letter } => {
                self.session.set_focus(pos);
                self.show_message(&format!(
                    "Revealed '{}' (score {})",
                    letter.to_ascii_uppercase(),
                    self.session.score()
                ));
            }
            outcome => {
                if let Some(notice) = outcome.notice() {
                    self.show_message(&notice.to_string());
                }
            }
        }
    }

    fn request_advance(&mut self) {
        let outcome = self.session.on_request_advance();
        self.show_message(&outcome.notice().to_string());
        if let AdvanceOutcome::Advanced(difficulty) = outcome {
            tracing::info!(%difficulty, "player advanced");
        }
    }

    /// Words covering the focused cell
    pub fn focused_words(&self) -> Vec<&Placement> {
        match self.session.focus() {
            Some(pos) => self.session.puzzle().words_at(pos),
            None => Vec::new(),
        }
    }

    /// Whether `pos` belongs to a word through the focused cell
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.focused_words().iter().any(|word| word.contains(pos))
    }
}
