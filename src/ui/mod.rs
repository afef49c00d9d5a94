//! UI rendering components

pub mod dashboard;
pub mod history;
pub mod layout;
pub mod practice;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Tabs},
};

use crate::app::state::{AppState, Screen};
use crate::session::PracticeSession;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, session: &PracticeSession, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_tabs(frame, chunks[0], state, theme);

    match state.screen {
        Screen::Practice => practice::draw(frame, chunks[1], state, session, theme),
        Screen::Dashboard => dashboard::draw(frame, chunks[1], state, theme),
        Screen::History => history::draw(frame, chunks[1], state, theme),
    }

    layout::draw_status_line(frame, chunks[2], state, theme);
}

/// Draw the screen tab bar
fn draw_tabs(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState, theme: &Theme) {
    let selected = match state.screen {
        Screen::Practice => 0,
        Screen::Dashboard => 1,
        Screen::History => 2,
    };

    let tabs = Tabs::new(vec![" [1] Practice ", " [2] Dashboard ", " [3] History "])
        .select(selected)
        .style(Style::default().fg(theme.fg_muted))
        .highlight_style(
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border))
                .title(" ScoreUp "),
        );

    frame.render_widget(tabs, area);
}
