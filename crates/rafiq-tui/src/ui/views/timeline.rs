//! The daily plan: suggestions strip, category cards with expandable
//! checklists, and the AI plan modal.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::app::OP_SUGGESTIONS;
use crate::ui::components::modal_frame;
use crate::ui::theme;
use crate::ui::{App, Modal};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // suggestions
            Constraint::Length(1), // actions hint
            Constraint::Min(0),    // schedule
        ])
        .split(area);

    render_suggestions(f, app, chunks[0]);

    let hint = Line::styled(
        "g smart plan  a add category  enter expand  space toggle task  b alarm  i AI subtasks  d delete  r refresh insights",
        theme::dim(),
    );
    f.render_widget(Paragraph::new(hint), chunks[1]);

    render_schedule(f, app, chunks[2], accent.primary);

    if matches!(app.modal, Modal::PlanPrompt) {
        render_plan_modal(f, app);
    }
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_INACTIVE))
        .title(" Daily Insights ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let content: Vec<Line> = if app.inflight.is_busy(OP_SUGGESTIONS) {
        vec![Line::styled("Loading your daily insights...", theme::dim())]
    } else if app.timeline.suggestions.is_empty() {
        vec![Line::styled(
            "No insights yet. Press r to ask for some.",
            theme::dim(),
        )]
    } else {
        app.timeline
            .suggestions
            .iter()
            .map(|s| Line::from(vec![Span::styled("• ", theme::muted()), Span::raw(s.clone())]))
            .collect()
    };
    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), inner);
}

fn render_schedule(f: &mut Frame, app: &App, area: Rect, accent: ratatui::style::Color) {
    let schedule = app.store.schedule();
    if schedule.is_empty() {
        f.render_widget(
            Paragraph::new(Line::styled(
                "No plan yet. Press g to let the AI architect one.",
                theme::dim(),
            )),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (idx, item) in schedule.iter().enumerate() {
        let selected = idx == app.timeline.selected;
        let expanded = app.timeline.expanded == Some(item.id);
        let marker = if expanded { "▾" } else { "▸" };
        let alarm = if item.alarm_enabled { " ⏰" } else { "" };
        let progress = format!("{}/{}", item.completed_count(), item.subtasks.len());

        let style = if selected { theme::selected() } else { theme::primary() };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {}", item.title), style),
            Span::styled(format!("  {}", item.time), theme::muted()),
            Span::styled(format!("  [{progress}]{alarm}"), Style::default().fg(accent)),
        ]));

        if expanded {
            for (sub_idx, sub) in item.subtasks.iter().enumerate() {
                let cursor = selected && sub_idx == app.timeline.sub_cursor;
                let check = if sub.completed { "[x]" } else { "[ ]" };
                let mut style = if sub.completed {
                    theme::dim().add_modifier(Modifier::CROSSED_OUT)
                } else {
                    theme::muted()
                };
                if cursor {
                    style = style.bg(theme::BG_SELECTED);
                }
                lines.push(Line::styled(format!("    {check} {}", sub.text), style));
            }
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let (completed, total) = rafiq_core::models::schedule::overall_progress(schedule);
    if total > 0 {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT_SUCCESS))
            .ratio(completed as f64 / total as f64)
            .label(format!("{completed}/{total} tasks"));
        f.render_widget(gauge, chunks[1]);
    }
}

fn render_plan_modal(f: &mut Frame, app: &App) {
    let area = modal_frame::centered(f.area(), 60, 9);
    let inner = modal_frame::draw(f, area, "AI Architect", app.store.theme());

    let busy = app.inflight.is_busy(crate::ui::app::OP_PLAN);
    let lines = vec![
        Line::styled("Describe your ideal day:", theme::muted()),
        Line::from(""),
        Line::styled(
            format!("> {}", app.timeline.plan_input.value),
            theme::primary(),
        ),
        Line::from(""),
        Line::styled(
            if busy {
                "Generating your plan..."
            } else {
                "enter generate  esc cancel"
            },
            theme::dim(),
        ),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
