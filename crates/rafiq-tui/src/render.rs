//! Top-level frame composition: header, dock, active view, footer, then
//! whichever modal is open.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use rafiq_core::models::DockView;

use crate::ui::components::{dock, statusbar};
use crate::ui::views;
use crate::ui::{theme, App, Modal};

pub fn render(f: &mut Frame, app: &App) {
    let focus_view = app.view == DockView::Focus;
    let bg = if focus_view { theme::BG_FOCUS } else { theme::BG_APP };
    f.render_widget(Block::default().style(Style::default().bg(bg)), f.area());

    // The Focus view drops the header chrome entirely.
    let rows = if focus_view {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area())
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area())
    };

    let (body, footer) = if focus_view {
        (rows[0], rows[1])
    } else {
        statusbar::render_header(f, app, rows[0]);
        (rows[1], rows[2])
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(dock::width(app.store.nav_size())),
            Constraint::Min(0),
        ])
        .split(body);
    dock::render(f, app, columns[0]);
    let content = columns[1];

    match app.view {
        DockView::Timeline => views::timeline::render(f, app, content),
        DockView::Focus => views::focus::render(f, app, content),
        DockView::Studio => views::studio::render(f, app, content),
        DockView::Quran => views::quran::render(f, app, content),
        DockView::Hadith => views::hadith::render(f, app, content),
        DockView::History => views::history::render(f, app, content),
        DockView::Hub => views::hub::render(f, app, content),
    }

    statusbar::render_footer(f, app, footer);

    match &app.modal {
        Modal::None | Modal::PlanPrompt => {} // PlanPrompt is drawn by the timeline view
        Modal::Onboarding => views::onboarding::render(f, app),
        Modal::Settings(state) => views::settings::render(f, app, state),
        Modal::QuickPanel { cursor } => views::quick_panel::render(f, app, *cursor),
        Modal::Briefing(text) => views::quick_panel::render_briefing(f, app, text.as_deref()),
        Modal::Strategy { topic, steps } => {
            views::quick_panel::render_strategy(f, app, topic, steps.as_deref())
        }
    }
}
