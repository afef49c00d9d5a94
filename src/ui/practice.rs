//! Practice screen: question generation, answering, feedback

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppState, PendingRequest, PracticeField};
use crate::session::{Phase, PracticeSession};
use crate::theme::Theme;

/// Draw the practice screen
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &PracticeSession,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // topic + count inputs
        Constraint::Length(5), // current question
        Constraint::Length(3), // answer input
        Constraint::Min(4),    // feedback
    ])
    .split(area);

    draw_inputs(frame, chunks[0], state, theme);
    draw_question(frame, chunks[1], state, session, theme);
    draw_answer_input(frame, chunks[2], state, session, theme);
    draw_feedback(frame, chunks[3], state, theme);
}

fn input_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.border_focused } else { theme.border };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn draw_inputs(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let columns =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(20)]).split(area);

    let practice = &state.practice;

    let topic_focused = practice.focus == PracticeField::Topic;
    let topic = Paragraph::new(practice.topic.value.as_str())
        .style(Style::default().fg(theme.fg_primary))
        .block(input_block(" Topic ", topic_focused, theme));
    frame.render_widget(topic, columns[0]);

    let count_focused = practice.focus == PracticeField::Count;
    let count = Paragraph::new(practice.count.value.as_str())
        .style(Style::default().fg(theme.fg_primary))
        .block(input_block(" Questions (1-5) ", count_focused, theme));
    frame.render_widget(count, columns[1]);

    // Put the terminal cursor in the focused field
    match practice.focus {
        PracticeField::Topic => set_cursor(frame, columns[0], practice.topic.cursor),
        PracticeField::Count => set_cursor(frame, columns[1], practice.count.cursor),
        PracticeField::Answer => {}
    }
}

fn set_cursor(frame: &mut Frame, block_area: Rect, cursor: usize) {
    frame.set_cursor_position((
        block_area.x + 1 + cursor as u16,
        block_area.y + 1,
    ));
}

fn draw_question(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &PracticeSession,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Current Question ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if state.practice.loading == Some(PendingRequest::Submit) {
        vec![muted_line("Submitting answer and getting AI feedback...", theme)]
    } else if state.practice.loading == Some(PendingRequest::Generate) {
        vec![muted_line("Generating questions... please wait!", theme)]
    } else {
        match session.current_question() {
            Some(question) => {
                let remaining = session.queue_len();
                let mut lines = vec![Line::from(Span::styled(
                    question,
                    Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
                ))];
                if remaining > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("({remaining} more in this batch)"),
                        Style::default().fg(theme.fg_muted),
                    )));
                }
                lines
            }
            None => vec![muted_line(
                "Enter a topic above and press Enter to generate questions!",
                theme,
            )],
        }
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_answer_input(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &PracticeSession,
    theme: &Theme,
) {
    // The answer box only applies while a question is presenting
    if session.phase() != Phase::Presenting && session.phase() != Phase::Submitting {
        return;
    }

    let practice = &state.practice;
    let focused = practice.focus == PracticeField::Answer;
    let answer = Paragraph::new(practice.answer.value.as_str())
        .style(Style::default().fg(theme.fg_primary))
        .block(input_block(" Your Answer ", focused, theme));
    frame.render_widget(answer, area);

    if focused {
        set_cursor(frame, area, practice.answer.cursor);
    }
}

fn draw_feedback(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" AI Feedback ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(feedback) = &state.practice.feedback else {
        frame.render_widget(
            Paragraph::new(muted_line("AI feedback will be displayed here.", theme)),
            inner,
        );
        return;
    };

    let evaluation = &feedback.evaluation;
    let mut lines = Vec::new();

    if evaluation.is_correct {
        lines.push(Line::from(Span::styled(
            "Correct! \u{1F389}",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Needs Review. \u{1F914}",
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(Span::styled(
        evaluation.ai_feedback.as_str(),
        Style::default().fg(theme.fg_primary),
    )));

    // Show the canonical answer when the backend sent one: prominently after
    // a miss, subtly after a hit
    if let Some(correct) = evaluation
        .correct_answer
        .as_deref()
        .filter(|a| !a.is_empty() && *a != crate::store::model::NO_CANONICAL_ANSWER)
    {
        if evaluation.is_correct {
            lines.push(Line::from(Span::styled(
                format!("Correct Answer: {correct}"),
                Style::default().fg(theme.fg_muted),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    "Correct Answer: ",
                    Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(correct, Style::default().fg(theme.fg_secondary)),
            ]));
        }
    }

    if feedback.batch_complete {
        lines.push(Line::from(""));
        lines.push(muted_line("All generated questions have been answered!", theme));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn muted_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(theme.fg_muted)))
}
