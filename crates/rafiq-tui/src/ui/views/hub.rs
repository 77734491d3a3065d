//! The hub: MCQ drill on any topic, plus the study backlog with per-topic
//! AI strategies.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::app::{HubFocus, OP_MCQ};
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_drill(f, app, chunks[0]);
    render_backlog(f, app, chunks[1]);
}

fn render_drill(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let focused = app.hub.focus == HubFocus::Topic;
    let border = if focused { theme::BORDER_ACTIVE } else { theme::BORDER_INACTIVE };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Neural Drill ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // topic input
            Constraint::Length(1), // hint
            Constraint::Min(0),    // question
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("topic> ", theme::muted()),
            Span::styled(app.hub.topic.value.clone(), theme::primary()),
        ])),
        chunks[0],
    );

    let hint = if app.is_offline() {
        Line::styled("Offline — drills unavailable", theme::error())
    } else if app.inflight.is_busy(OP_MCQ) {
        Line::styled(
            format!("Generating in {}...", app.store.language()),
            theme::dim(),
        )
    } else {
        Line::styled("enter generates a question  1-9 answer", theme::dim())
    };
    f.render_widget(Paragraph::new(hint), chunks[1]);

    let Some(mcq) = &app.hub.mcq else {
        return;
    };

    let mut lines: Vec<Line> = vec![
        Line::styled(mcq.q.clone(), theme::primary().add_modifier(Modifier::BOLD)),
        Line::from(""),
    ];
    for (idx, option) in mcq.options.iter().enumerate() {
        let style = match app.hub.chosen {
            None => theme::primary(),
            Some(_) if idx == mcq.ans => Style::default().fg(theme::ACCENT_SUCCESS),
            Some(chosen) if idx == chosen => Style::default().fg(theme::ACCENT_ERROR),
            Some(_) => theme::dim(),
        };
        let marker = match app.hub.chosen {
            Some(_) if idx == mcq.ans => "✓",
            Some(chosen) if idx == chosen => "✗",
            _ => " ",
        };
        lines.push(Line::styled(
            format!("{} {}. {}", marker, idx + 1, option),
            style,
        ));
    }
    if app.hub.chosen.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("(answer: {})", accent_label(mcq.ans)),
            Style::default().fg(accent.secondary),
        ));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[2]);
}

fn accent_label(idx: usize) -> String {
    format!("option {}", idx + 1)
}

fn render_backlog(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.hub.focus == HubFocus::Backlog;
    let border = if focused { theme::BORDER_ACTIVE } else { theme::BORDER_INACTIVE };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" Study Backlog ({}) ", app.store.backlog().len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // input
            Constraint::Length(1), // hint
            Constraint::Min(0),    // list
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("add> ", theme::muted()),
            Span::styled(app.hub.backlog_input.value.clone(), theme::primary()),
        ])),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Line::styled(
            "enter adds  j/k select  d remove  g AI strategy",
            theme::dim(),
        )),
        chunks[1],
    );

    let backlog = app.store.backlog();
    let mut lines: Vec<Line> = Vec::new();
    if backlog.is_empty() {
        lines.push(Line::styled("No pending backlog.", theme::dim()));
    }
    for (idx, topic) in backlog.iter().enumerate() {
        let style = if focused && idx == app.hub.backlog_cursor {
            theme::selected()
        } else {
            theme::primary()
        };
        lines.push(Line::styled(format!("• {topic}"), style));
    }
    f.render_widget(Paragraph::new(lines), chunks[2]);
}
