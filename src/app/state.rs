//! Application state definitions

use crate::backend::Evaluation;
use crate::history::HistoryBrowser;
use crate::stats::{TopicCount, WeakestTopic};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Practice,
    Dashboard,
    History,
}

/// Which practice input field has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PracticeField {
    #[default]
    Topic,
    Count,
    Answer,
}

/// A single-line text input
#[derive(Debug, Clone, Default)]
pub struct InputField {
    /// Input buffer
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl InputField {
    /// Create a field pre-filled with `value`, cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    /// Get the number of characters in the buffer
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Feedback from the last evaluated answer, kept for display
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    pub evaluation: Evaluation,
    /// Set when this was the last question of the batch
    pub batch_complete: bool,
}

/// Which backend request is currently awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Generate,
    Submit,
}

/// State for the practice screen
#[derive(Debug, Clone, Default)]
pub struct PracticeState {
    /// Topic input field
    pub topic: InputField,
    /// Requested question count input field
    pub count: InputField,
    /// Answer input field
    pub answer: InputField,
    /// Focused field
    pub focus: PracticeField,
    /// Feedback from the most recent submission
    pub feedback: Option<AnswerFeedback>,
    /// The backend request in flight, if any
    pub loading: Option<PendingRequest>,
}

impl PracticeState {
    /// Cycle focus through the input fields
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            PracticeField::Topic => PracticeField::Count,
            PracticeField::Count => PracticeField::Answer,
            PracticeField::Answer => PracticeField::Topic,
        };
    }

    /// Mutable access to the focused field
    pub fn focused_field_mut(&mut self) -> &mut InputField {
        match self.focus {
            PracticeField::Topic => &mut self.topic,
            PracticeField::Count => &mut self.count,
            PracticeField::Answer => &mut self.answer,
        }
    }

    /// Parse the requested count field
    pub fn requested_count(&self) -> Option<u32> {
        self.count.value.trim().parse().ok()
    }
}

/// State for the history screen
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    /// Loaded history snapshot (display order is newest first)
    pub browser: HistoryBrowser,
    /// Selected display index
    pub selected: usize,
    /// Scroll offset for long histories
    pub scroll_offset: usize,
    /// Visible height in items (updated on render)
    pub visible_height: usize,
    /// Whether the detail overlay is open
    pub detail_open: bool,
}

impl HistoryState {
    /// Move the selection, clamping to the list bounds
    pub fn move_selection(&mut self, delta: isize) {
        if self.browser.is_empty() {
            return;
        }
        let last = self.browser.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.ensure_selection_visible();
    }

    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        let visible = self.visible_height.saturating_sub(1);
        if visible > 0 && self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected.saturating_sub(visible) + 1;
        }
    }
}

/// Snapshot of the dashboard aggregates
///
/// Refreshed when the dashboard screen is entered rather than re-derived
/// every frame.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Independently maintained counter (not re-derived from history)
    pub question_count: u32,
    /// Independently maintained counter (not re-derived from history)
    pub correct_count: u32,
    /// Per-topic question counts, alphabetical
    pub breakdown: Vec<TopicCount>,
    /// Lowest-accuracy topic, derived fresh from history
    pub weakest: WeakestTopic,
}

/// Status line message
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display, if any
    pub message: Option<String>,
    /// Whether the message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Practice screen state
    pub practice: PracticeState,

    /// History screen state
    pub history: HistoryState,

    /// Dashboard snapshot
    pub dashboard: DashboardState,

    /// Status line
    pub status: StatusLine,

    /// A reset was requested and awaits confirmation
    pub reset_pending: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn input_field_inserts_at_cursor() {
        let mut field = InputField::default();
        field.insert_char('a');
        field.insert_char('c');
        field.move_left();
        field.insert_char('b');
        assert_eq!(field.value, "abc");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn input_field_handles_multibyte_chars() {
        let mut field = InputField::with_value("日本");
        field.delete_char();
        assert_eq!(field.value, "日");
        field.insert_char('語');
        assert_eq!(field.value, "日語");
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut practice = PracticeState::default();
        assert_eq!(practice.focus, PracticeField::Topic);
        practice.focus_next();
        assert_eq!(practice.focus, PracticeField::Count);
        practice.focus_next();
        assert_eq!(practice.focus, PracticeField::Answer);
        practice.focus_next();
        assert_eq!(practice.focus, PracticeField::Topic);
    }

    #[test]
    fn requested_count_parses_trimmed_digits() {
        let mut practice = PracticeState::default();
        practice.count = InputField::with_value(" 3 ");
        assert_eq!(practice.requested_count(), Some(3));

        practice.count = InputField::with_value("lots");
        assert_eq!(practice.requested_count(), None);
    }

    #[test]
    fn history_selection_clamps_to_bounds() {
        use crate::history::HistoryBrowser;
        use crate::store::model::HistoryEntry;

        let entries = vec![
            HistoryEntry::new("Q1", "A", "f", true, None, "T"),
            HistoryEntry::new("Q2", "A", "f", true, None, "T"),
        ];
        let mut history = HistoryState {
            browser: HistoryBrowser::from_entries(entries),
            visible_height: 10,
            ..Default::default()
        };

        history.move_selection(5);
        assert_eq!(history.selected, 1);
        history.move_selection(-5);
        assert_eq!(history.selected, 0);
    }
}
