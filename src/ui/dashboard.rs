//! Dashboard screen: aggregate statistics and performance breakdown

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::stats;
use crate::theme::Theme;

/// Draw the dashboard screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::vertical([
        Constraint::Length(4), // overview stats
        Constraint::Min(8),    // chart + topic breakdown
        Constraint::Length(4), // weakest topic tip
    ])
    .split(area);

    draw_overview(frame, rows[0], state, theme);

    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
    draw_chart(frame, columns[0], state, theme);
    draw_topic_breakdown(frame, columns[1], state, theme);

    draw_weakest_topic(frame, rows[2], state, theme);
}

fn draw_overview(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let overview = stats::compute_overview(dashboard.question_count, dashboard.correct_count);

    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

    let stat = |title: &'static str, value: String| {
        Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
    };

    frame.render_widget(
        stat(" Questions Practiced ", overview.total_questions.to_string()),
        columns[0],
    );
    frame.render_widget(
        stat(" Correct Rate ", format!("{}%", overview.correct_rate_percent)),
        columns[1],
    );
}

fn draw_chart(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;

    let block = Block::default()
        .title(" Overall Performance ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Required branch: with no answers yet there is nothing to chart, so an
    // explicit no-data indicator replaces the visualization
    if dashboard.question_count == 0 {
        let message = Paragraph::new(Line::from(Span::styled(
            "No practice data yet. Answer some questions to see your performance!",
            Style::default().fg(theme.fg_muted),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message, inner);
        return;
    }

    let incorrect = dashboard.question_count.saturating_sub(dashboard.correct_count);
    let bars = BarGroup::default().bars(&[
        Bar::default()
            .label(Line::from("Correct"))
            .value(u64::from(dashboard.correct_count))
            .style(Style::default().fg(theme.success)),
        Bar::default()
            .label(Line::from("Incorrect"))
            .value(u64::from(incorrect))
            .style(Style::default().fg(theme.error)),
    ]);

    let chart = BarChart::default()
        .data(bars)
        .bar_width((inner.width.saturating_sub(3) / 2).max(1))
        .bar_gap(1);
    frame.render_widget(chart, inner);
}

fn draw_topic_breakdown(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Topics Practiced ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let breakdown = &state.dashboard.breakdown;
    if breakdown.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Practice some questions to see your topics here!",
                Style::default().fg(theme.fg_muted),
            ))
            .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = breakdown
        .iter()
        .map(|topic| {
            Line::from(vec![
                Span::styled(
                    topic.topic.clone(),
                    Style::default().fg(theme.fg_primary),
                ),
                Span::styled(
                    format!("  {} questions", topic.count),
                    Style::default().fg(theme.fg_muted),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_weakest_topic(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Focus Area ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let weakest = &state.dashboard.weakest;
    let lines = match &weakest.topic {
        Some(topic) => vec![
            Line::from(vec![
                Span::styled(
                    topic.clone(),
                    Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({:.1}% accuracy)", weakest.accuracy_percent),
                    Style::default().fg(theme.fg_muted),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "Time to master {topic}! Try generating more questions on this topic."
                ),
                Style::default().fg(theme.fg_primary),
            )),
        ],
        None => vec![
            Line::from(Span::styled("N/A", Style::default().fg(theme.fg_muted))),
            Line::from(Span::styled(
                "Start practicing to see your personalized insights here!",
                Style::default().fg(theme.fg_muted),
            )),
        ],
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
