//! Application loop and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::backend::QuizBackend;
use crate::config::Config;
use crate::history::HistoryBrowser;
use crate::session::{self, PracticeSession, SessionError};
use crate::stats;
use crate::store::PersistentStore;
use crate::ui;
use input::Action;
use state::{AnswerFeedback, AppState, InputField, PracticeField, Screen};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Persistent storage handle
    store: PersistentStore,

    /// Active practice session
    session: PracticeSession,

    /// Quiz backend client
    backend: QuizBackend,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let store = PersistentStore::open_default()?;
        let backend = QuizBackend::new(&config.backend_url);
        let session = PracticeSession::new(store.clone());

        let mut app = Self {
            config,
            state: AppState::default(),
            store,
            session,
            backend,
            terminal,
        };
        app.seed_from_retry();
        Ok(app)
    }

    /// Pre-fill the practice inputs when the session consumed a retry request
    fn seed_from_retry(&mut self) {
        if let Some(notice) = self.session.take_retry_notice() {
            self.state.practice.topic = InputField::with_value(self.session.topic());
            // A retried question is always a batch of one
            self.state.practice.count = InputField::with_value("1");
            self.state.practice.focus = PracticeField::Answer;
            self.state.practice.feedback = None;
            self.state.practice.answer.clear();
            self.state.status.set_message(notice);
        }
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            self.draw()?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key).await {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {e:#}");
                            }
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        // Keep the history viewport height in step with the terminal size
        // (tab bar, borders, and status line take 5 rows)
        let size = self.terminal.size()?;
        self.state.history.visible_height = size.height.saturating_sub(5) as usize;

        let theme = self.config.active_theme();
        let state = &self.state;
        let session = &self.session;
        self.terminal.draw(|frame| {
            ui::draw(frame, state, session, &theme);
        })?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.state.screen {
            Screen::Practice => self.handle_practice_key(key).await,
            Screen::Dashboard | Screen::History => self.handle_browse_key(key),
        }
    }

    /// Keys on the practice screen (input fields focused)
    async fn handle_practice_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Ignore input while a backend call is pending; the two network
        // calls are awaited inline, so this only catches queued key events
        if self.state.practice.loading.is_some() {
            return Ok(false);
        }

        if let Some(action) = input::typing_key_to_action(key.code, key.modifiers) {
            match action {
                Action::Select => {
                    if self.state.practice.focus == PracticeField::Answer {
                        self.submit_answer().await;
                    } else {
                        self.generate_questions().await;
                    }
                }
                Action::Back => {
                    self.state.status.clear();
                    self.state.reset_pending = false;
                }
                Action::GotoDashboard => self.goto(Screen::Dashboard),
                Action::GotoHistory => self.goto(Screen::History),
                Action::Quit => return Ok(true),
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Tab => self.state.practice.focus_next(),
            KeyCode::Backspace => self.state.practice.focused_field_mut().delete_char(),
            KeyCode::Left => self.state.practice.focused_field_mut().move_left(),
            KeyCode::Right => self.state.practice.focused_field_mut().move_right(),
            KeyCode::Char(c) => self.state.practice.focused_field_mut().insert_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Keys on the dashboard and history screens
    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(action) = input::browse_key_to_action(key.code) else {
            return Ok(false);
        };

        // Any action other than the confirming Reset cancels a pending reset
        if action != Action::Reset && self.state.reset_pending {
            self.state.reset_pending = false;
            self.state.status.clear();
        }

        match action {
            Action::GotoPractice => self.goto(Screen::Practice),
            Action::GotoDashboard => self.goto(Screen::Dashboard),
            Action::GotoHistory => self.goto(Screen::History),
            Action::Quit => return Ok(true),
            Action::Reset => self.handle_reset()?,
            Action::Up if self.state.screen == Screen::History => {
                self.state.history.move_selection(-1);
            }
            Action::Down if self.state.screen == Screen::History => {
                self.state.history.move_selection(1);
            }
            Action::Top if self.state.screen == Screen::History => {
                self.state.history.selected = 0;
                self.state.history.ensure_selection_visible();
            }
            Action::Bottom if self.state.screen == Screen::History => {
                let len = self.state.history.browser.len();
                self.state.history.selected = len.saturating_sub(1);
                self.state.history.ensure_selection_visible();
            }
            Action::Select if self.state.screen == Screen::History => {
                if !self.state.history.browser.is_empty() {
                    self.state.history.detail_open = true;
                }
            }
            Action::Back => {
                if self.state.history.detail_open {
                    self.state.history.detail_open = false;
                } else {
                    self.state.status.clear();
                }
            }
            Action::Retry if self.state.screen == Screen::History => self.retry_selected(),
            _ => {}
        }
        Ok(false)
    }

    /// Switch screens, refreshing screen-local snapshots
    fn goto(&mut self, screen: Screen) {
        match screen {
            Screen::History => {
                self.state.history.browser = HistoryBrowser::load(&self.store);
                let len = self.state.history.browser.len();
                self.state.history.selected =
                    self.state.history.selected.min(len.saturating_sub(1));
                self.state.history.ensure_selection_visible();
                self.state.history.detail_open = false;
            }
            Screen::Dashboard => {
                let history = self.store.history();
                self.state.dashboard = state::DashboardState {
                    question_count: self.store.question_count(),
                    correct_count: self.store.correct_count(),
                    breakdown: stats::compute_topic_breakdown(&history),
                    weakest: stats::compute_weakest_topic(&history),
                };
            }
            Screen::Practice => {}
        }
        self.state.screen = screen;
    }

    /// Validate and run a generate request
    async fn generate_questions(&mut self) {
        let params = match session::validate_generate_request(
            &self.state.practice.topic.value,
            self.state.practice.requested_count(),
        ) {
            Ok(params) => params,
            Err(e) => {
                self.state.status.set_error(e.user_message());
                return;
            }
        };

        self.state.practice.feedback = None;
        self.state.practice.loading = Some(state::PendingRequest::Generate);
        let _ = self.draw();

        let result = self.session.generate(&self.backend, params).await;
        self.state.practice.loading = None;

        match result {
            Ok(session::GenerateOutcome::Presented) => {
                self.state.status.clear();
                self.state.practice.answer.clear();
                self.state.practice.focus = PracticeField::Answer;
            }
            Ok(session::GenerateOutcome::NoQuestions) => {
                self.state.status.set_message("No questions generated. Try a different topic!");
            }
            Err(e) => self.surface_error(e),
        }
    }

    /// Validate and run an answer submission
    async fn submit_answer(&mut self) {
        let answer = self.state.practice.answer.value.clone();
        if let Err(e) = session::validate_answer(&answer) {
            self.state.status.set_error(e.user_message());
            return;
        }

        self.state.practice.loading = Some(state::PendingRequest::Submit);
        let _ = self.draw();

        let result = self.session.submit(&self.backend, &answer).await;
        self.state.practice.loading = None;

        match result {
            Ok(outcome) => {
                self.state.practice.answer.clear();
                if outcome.queue_exhausted {
                    self.state.status.set_message("All generated questions have been answered!");
                } else {
                    self.state.status.clear();
                }
                self.state.practice.feedback = Some(AnswerFeedback {
                    evaluation: outcome.evaluation,
                    batch_complete: outcome.queue_exhausted,
                });
            }
            Err(e) => self.surface_error(e),
        }
    }

    /// Queue the selected history entry for retry and jump to practice
    fn retry_selected(&mut self) {
        let selected = self.state.history.selected;
        match self.state.history.browser.retry(&self.store, selected) {
            Ok(_) => {
                // Start a fresh session; it consumes the retry request
                self.session = PracticeSession::new(self.store.clone());
                self.seed_from_retry();
                self.state.history.detail_open = false;
                self.state.screen = Screen::Practice;
            }
            Err(e) => {
                self.state.status.set_error(format!("Could not retry: {e:#}"));
            }
        }
    }

    /// Two-step reset of all stored data
    fn handle_reset(&mut self) -> Result<()> {
        if !self.state.reset_pending {
            self.state.reset_pending = true;
            self.state.status.set_message(
                "Press R again to reset ALL your practice data. This cannot be undone.",
            );
            return Ok(());
        }

        self.store.clear_all()?;
        self.session = PracticeSession::new(self.store.clone());
        self.state.practice = Default::default();
        self.state.history = Default::default();
        self.state.reset_pending = false;
        self.state.status.set_message("All your ScoreUp data has been reset!");
        tracing::info!("All practice data cleared");
        Ok(())
    }

    /// Surface a session error on the status line
    fn surface_error(&mut self, error: SessionError) {
        tracing::warn!("Session error: {error}");
        self.state.status.set_error(error.user_message());
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
