//! Quick panel: theme switcher plus the daily-briefing trigger. Also hosts
//! the briefing and strategy result modals.

use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use rafiq_core::models::AppTheme;

use crate::ui::components::modal_frame;
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, cursor: usize) {
    let area = modal_frame::centered(f.area(), 44, 12);
    let inner = modal_frame::draw(f, area, "Quick Panel", app.store.theme());

    let mut lines: Vec<Line> = vec![Line::styled("Theme", theme::muted())];
    for (idx, t) in AppTheme::ALL.iter().enumerate() {
        let current = app.store.theme() == *t;
        let marker = if current { "● " } else { "○ " };
        let style = if idx == cursor {
            theme::selected()
        } else if current {
            theme::primary()
        } else {
            theme::muted()
        };
        lines.push(Line::styled(format!("  {marker}{}", t.label()), style));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "b morning briefing   j/k select  enter apply  esc close",
        theme::dim(),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_briefing(f: &mut Frame, app: &App, text: Option<&str>) {
    let area = modal_frame::centered(f.area(), 54, 10);
    let inner = modal_frame::draw(f, area, "Briefing", app.store.theme());

    let lines = match text {
        None => vec![Line::styled("Composing your briefing...", theme::dim())],
        Some(text) => vec![
            Line::styled(
                format!("\u{201c}{text}\u{201d}"),
                theme::primary().add_modifier(Modifier::ITALIC),
            ),
            Line::from(""),
            Line::styled("esc dismiss", theme::dim()),
        ],
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_strategy(f: &mut Frame, app: &App, topic: &str, steps: Option<&[String]>) {
    let area = modal_frame::centered(f.area(), 58, 14);
    let inner = modal_frame::draw(f, area, &format!("AI Strategy — {topic}"), app.store.theme());

    let lines: Vec<Line> = match steps {
        None => vec![Line::styled(
            format!("Thinking in {}...", app.store.language()),
            theme::dim(),
        )],
        Some(steps) => {
            let mut lines: Vec<Line> = steps
                .iter()
                .enumerate()
                .map(|(i, step)| Line::from(format!("{}. {step}", i + 1)))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::styled("esc close", theme::dim()));
            lines
        }
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
