//! History screen: browsing past questions with a detail overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::store::model::HistoryEntry;
use crate::theme::Theme;

use super::layout::centered_rect;

/// Draw the history screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Practice History (newest first) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let history = &state.history;
    if history.browser.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No questions practiced yet. Go generate some!",
                Style::default().fg(theme.fg_muted),
            )),
            inner,
        );
        return;
    }

    let visible_height = inner.height as usize;
    let lines: Vec<Line> = history
        .browser
        .newest_first()
        .enumerate()
        .skip(history.scroll_offset)
        .take(visible_height)
        .map(|(display_index, entry)| entry_line(display_index, entry, state, theme))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if history.detail_open {
        if let Some(entry) = history.browser.entry_at(history.selected) {
            draw_detail(frame, area, entry, theme);
        }
    }
}

fn entry_line<'a>(
    display_index: usize,
    entry: &'a HistoryEntry,
    state: &AppState,
    theme: &Theme,
) -> Line<'a> {
    let marker = if entry.is_correct { "\u{2713}" } else { "\u{2717}" }; // ✓ or ✗
    let marker_style = if entry.is_correct {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.error)
    };

    let selected = display_index == state.history.selected;
    let text_style = if selected {
        Style::default().fg(theme.fg_secondary).bg(theme.selection).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary)
    };

    Line::from(vec![
        Span::styled(format!(" {marker} "), marker_style),
        Span::styled(entry.question.as_str(), text_style),
        Span::styled(
            format!("  [{}]  {}", entry.topic_or_default(), entry.timestamp),
            Style::default().fg(theme.fg_muted),
        ),
    ])
}

/// Draw the detail overlay for one entry
fn draw_detail(frame: &mut Frame, area: Rect, entry: &HistoryEntry, theme: &Theme) {
    let overlay_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Question Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let label = |name: &'static str| {
        Span::styled(name, Style::default().fg(theme.fg_muted).add_modifier(Modifier::BOLD))
    };
    let value =
        |text: &str| Span::styled(text.to_string(), Style::default().fg(theme.fg_primary));

    let mut lines = vec![
        Line::from(vec![label("Question: "), value(&entry.question)]),
        Line::from(vec![label("Topic: "), value(entry.topic_or_default())]),
        Line::from(""),
        Line::from(vec![label("Your Answer: "), value(&entry.student_answer)]),
    ];

    if let Some(correct) = entry.displayable_answer() {
        lines.push(Line::from(vec![label("Correct Answer: "), value(correct)]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(label("AI Feedback:")));
    lines.push(Line::from(value(&entry.ai_feedback)));
    lines.push(Line::from(""));

    let (status_text, status_color) = if entry.is_correct {
        ("Correct \u{1F389}", theme.success)
    } else {
        ("Incorrect \u{1F914}", theme.error)
    };
    lines.push(Line::from(vec![
        label("Status: "),
        Span::styled(status_text, Style::default().fg(status_color)),
    ]));
    lines.push(Line::from(vec![label("Date: "), value(&entry.timestamp)]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[r] Retry this question    [Esc] Close",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
