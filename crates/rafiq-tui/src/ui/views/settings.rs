//! Settings modal: profile, dock size, dock customization, language, theme.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rafiq_core::models::{AppLanguage, AppTheme, NavSize};

use crate::ui::app::{SettingsSection, SettingsState};
use crate::ui::components::modal_frame;
use crate::ui::theme;
use crate::ui::App;

pub fn render(f: &mut Frame, app: &App, state: &SettingsState) {
    let area = modal_frame::centered(f.area(), 64, 22);
    let inner = modal_frame::draw(f, area, "Settings", app.store.theme());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // section tabs
            Constraint::Length(1),
            Constraint::Min(0),   // body
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let accent = theme::accent(app.store.theme());
    let mut tabs: Vec<Span> = Vec::new();
    for section in SettingsSection::ALL {
        let style = if state.section == section {
            theme::primary().add_modifier(Modifier::BOLD).fg(accent.primary)
        } else {
            theme::muted()
        };
        tabs.push(Span::styled(format!("{}  ", section.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    let body: Vec<Line> = match state.section {
        SettingsSection::Profile => profile_body(state),
        SettingsSection::NavSize => nav_size_body(app),
        SettingsSection::Dock => dock_body(app, state),
        SettingsSection::Language => language_body(app, state),
        SettingsSection::Theme => theme_body(app, state),
    };
    f.render_widget(Paragraph::new(body), chunks[2]);

    let hint = match state.section {
        SettingsSection::Profile => {
            if state.editing {
                "type to edit  tab switch field  esc stop editing"
            } else {
                "e edit fields  enter save profile  h/l section  esc close"
            }
        }
        SettingsSection::NavSize => "enter apply size  j/k select  h/l section  esc close",
        SettingsSection::Dock => "space show/hide  K move up  J move down  j/k select  esc close",
        SettingsSection::Language => "enter apply  j/k select  h/l section  esc close",
        SettingsSection::Theme => "enter apply  j/k select  h/l section  esc close",
    };
    f.render_widget(Paragraph::new(Line::styled(hint, theme::dim())), chunks[3]);
}

fn profile_body(state: &SettingsState) -> Vec<Line<'static>> {
    let focus_name = state.cursor == 0;
    let marker = |focused: bool| if focused { "▸ " } else { "  " };
    vec![
        Line::styled(
            format!("{}Name", marker(focus_name)),
            if focus_name { theme::primary() } else { theme::muted() },
        ),
        Line::from(format!("    {}", state.name.value)),
        Line::from(""),
        Line::styled(
            format!("{}Location", marker(!focus_name)),
            if !focus_name { theme::primary() } else { theme::muted() },
        ),
        Line::from(format!("    {}", state.location.value)),
    ]
}

fn nav_size_body(app: &App) -> Vec<Line<'static>> {
    NavSize::ALL
        .iter()
        .map(|size| {
            let current = app.store.nav_size() == *size;
            let marker = if current { "● " } else { "○ " };
            Line::styled(
                format!("{marker}{}", size.label()),
                if current { theme::primary() } else { theme::muted() },
            )
        })
        .collect()
}

fn dock_body(app: &App, state: &SettingsState) -> Vec<Line<'static>> {
    app.store
        .dock_items()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let eye = if item.visible { "👁 " } else { "– " };
            let style = if idx == state.cursor {
                theme::selected()
            } else if item.visible {
                theme::primary()
            } else {
                theme::dim()
            };
            Line::styled(format!("{eye}{}", item.view.title()), style)
        })
        .collect()
}

fn language_body(app: &App, state: &SettingsState) -> Vec<Line<'static>> {
    AppLanguage::ALL
        .iter()
        .enumerate()
        .map(|(idx, lang)| {
            let current = app.store.language() == *lang;
            let marker = if current { "● " } else { "○ " };
            let style = if idx == state.cursor {
                theme::selected()
            } else if current {
                theme::primary()
            } else {
                theme::muted()
            };
            Line::styled(format!("{marker}{lang}"), style)
        })
        .collect()
}

fn theme_body(app: &App, state: &SettingsState) -> Vec<Line<'static>> {
    AppTheme::ALL
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let current = app.store.theme() == *t;
            let marker = if current { "● " } else { "○ " };
            let style = if idx == state.cursor {
                theme::selected()
            } else if current {
                theme::primary()
            } else {
                theme::muted()
            };
            Line::styled(format!("{marker}{}", t.label()), style)
        })
        .collect()
}
