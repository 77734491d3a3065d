//! Header and footer lines: clock, dates, weather, connectivity, progress,
//! and transient notices.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rafiq_core::models::schedule;

use crate::ui::format;
use crate::ui::theme;
use crate::ui::App;

pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let accent = theme::accent(app.store.theme());
    let now = Local::now();

    let mut spans: Vec<Span> = vec![
        Span::styled(
            format::clock_line(&now),
            Style::default().fg(theme::TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", format::date_line(&now)), theme::muted()),
        Span::styled(
            format!("  {}", format::hijri_date(now.date_naive())),
            Style::default().fg(accent.secondary),
        ),
    ];

    let (completed, total) = schedule::overall_progress(app.store.schedule());
    if total > 0 {
        let percent = (completed as f64 / total as f64 * 100.0).round() as u32;
        spans.push(Span::styled(
            format!("  {percent}% of today"),
            Style::default().fg(accent.primary),
        ));
    }

    if let Some(weather) = &app.weather {
        spans.push(Span::styled(
            format!("  {}°C {}", weather.temp, weather.condition.label()),
            theme::muted(),
        ));
    }

    if app.is_offline() {
        spans.push(Span::styled(
            "  OFFLINE",
            Style::default()
                .fg(theme::ACCENT_ERROR)
                .add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.status {
        Line::styled(status.clone(), Style::default().fg(theme::ACCENT_WARNING))
    } else {
        Line::styled(
            "1-7 views  [ ] cycle  s settings  p quick panel  O offline  q quit",
            theme::dim(),
        )
    };
    f.render_widget(Paragraph::new(line), area);
}
