//! First-run identity form.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use rafiq_core::models::Gender;

use crate::ui::components::modal_frame;
use crate::ui::state::OnboardField;
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App) {
    let area = modal_frame::centered(f.area(), 58, 18);
    let inner = modal_frame::draw(f, area, "rafiq — Proper Life with Islam", app.store.theme());
    let form = &app.onboarding;

    let field = |label: &str, value: &str, placeholder: &str, focused: bool| -> Vec<Line<'static>> {
        let marker = if focused { "▸ " } else { "  " };
        let shown = if value.is_empty() {
            Span::styled(placeholder.to_string(), theme::dim())
        } else {
            Span::styled(value.to_string(), theme::primary())
        };
        vec![
            Line::styled(
                format!("{marker}{label}"),
                if focused {
                    theme::primary().add_modifier(Modifier::BOLD)
                } else {
                    theme::muted()
                },
            ),
            Line::from(vec![Span::raw("    "), shown]),
        ]
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &form.error {
        lines.push(Line::styled(format!("! {error}"), theme::error()));
        lines.push(Line::from(""));
    }

    lines.extend(field(
        "Full Name",
        &form.name.value,
        "e.g. Muhammad",
        form.focus == OnboardField::Name,
    ));
    lines.extend(field(
        "Gender (space cycles)",
        Gender::ALL[form.gender].label(),
        "",
        form.focus == OnboardField::Gender,
    ));
    lines.extend(field(
        "Date of Birth (YYYY-MM-DD, minimum year 1950)",
        &form.dob.value,
        "e.g. 1995-04-17",
        form.focus == OnboardField::Dob,
    ));
    lines.extend(field(
        "Location (City, Country — verified)",
        &form.location.value,
        "e.g. Madinah, Saudi Arabia",
        form.focus == OnboardField::Location,
    ));

    lines.push(Line::from(""));
    lines.push(Line::styled(
        if form.validating {
            "Verifying identity..."
        } else {
            "tab next field  enter launch identity  ctrl-s skip setup"
        },
        Style::default().fg(theme::ACCENT_WARNING),
    ));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
