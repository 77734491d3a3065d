//! The pomodoro view: a big countdown, a ring-style progress gauge, and the
//! darkest background the app has.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use crate::ui::theme;
use crate::ui::App;

const FOCUS_COLOR: Color = Color::Rgb(0, 122, 255);
const BREAK_COLOR: Color = Color::Rgb(52, 199, 89);

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BG_FOCUS)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // phase label
            Constraint::Length(1), // countdown
            Constraint::Length(1),
            Constraint::Length(1), // gauge
            Constraint::Length(1),
            Constraint::Length(1), // controls
            Constraint::Min(0),
        ])
        .split(area);

    let timer = &app.focus;
    let color = if timer.is_break { BREAK_COLOR } else { FOCUS_COLOR };

    let phase = if timer.is_break { "SHORT BREAK" } else { "DEEP FOCUS" };
    f.render_widget(
        Paragraph::new(Line::styled(phase, theme::dim())).centered(),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(Line::styled(
            timer.display(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        chunks[2],
    );

    let gauge_area = centered_horizontal(chunks[4], 40);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme::BG_CARD))
        .ratio(timer.progress())
        .label("");
    f.render_widget(gauge, gauge_area);

    let controls = if timer.active {
        "space pause  x reset"
    } else {
        "space start  x reset"
    };
    f.render_widget(
        Paragraph::new(Line::styled(controls, theme::dim())).centered(),
        chunks[6],
    );
}

fn centered_horizontal(area: Rect, width: u16) -> Rect {
    let w = width.min(area.width);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y,
        width: w,
        height: area.height,
    }
}
