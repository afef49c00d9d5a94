//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Draw the bottom status line: the current message, or key hints
pub fn draw_status_line(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (text, style) = match &state.status.message {
        Some(message) if state.status.is_error => {
            (message.clone(), Style::default().fg(theme.error))
        }
        Some(message) => (message.clone(), Style::default().fg(theme.info)),
        None => (hint_for(state.screen).to_string(), Style::default().fg(theme.fg_muted)),
    };

    frame.render_widget(Paragraph::new(Span::styled(format!(" {text}"), style)), area);
}

fn hint_for(screen: Screen) -> &'static str {
    match screen {
        Screen::Practice => {
            "[Tab] Switch field  [Enter] Generate/Submit  [Ctrl+d] Dashboard  [Ctrl+h] History  [Ctrl+q] Quit"
        }
        Screen::Dashboard => "[1] Practice  [3] History  [R] Reset data  [q] Quit",
        Screen::History => {
            "[j/k] Select  [Enter] Details  [r] Retry  [1] Practice  [2] Dashboard  [q] Quit"
        }
    }
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
