//! Key handling: modal handlers first, then editing mode, then per-view
//! normal-mode keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use rafiq_core::content::quran::filter_surahs;
use rafiq_core::models::history::ERAS;
use rafiq_core::models::{AppLanguage, AppTheme, AspectRatio, DockView, GroundingTool, ImageSize, NavSize};

use crate::ui::app::{
    ChatMode, CreateMode, EditTarget, HubFocus, InputMode, SettingsSection, SettingsState,
    StudioMode,
};
use crate::ui::{App, Modal};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any keypress dismisses a stale status notice.
    if app.status.is_some() && key.code != KeyCode::Null {
        app.clear_status();
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match &app.modal {
        Modal::Onboarding => return handle_onboarding(app, key),
        Modal::Settings(_) => return handle_settings(app, key),
        Modal::QuickPanel { .. } => return handle_quick_panel(app, key),
        Modal::PlanPrompt => return handle_plan_prompt(app, key),
        Modal::Briefing(_) | Modal::Strategy { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.modal = Modal::None;
            }
            return;
        }
        Modal::None => {}
    }

    if app.input_mode == InputMode::Editing {
        return handle_editing(app, key);
    }

    handle_normal(app, key);
}

// =============================================================================
// Modals
// =============================================================================

fn handle_onboarding(app: &mut App, key: KeyEvent) {
    use crate::ui::state::OnboardField;

    if app.onboarding.validating {
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.onboarding.focus = app.onboarding.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.onboarding.focus = app.onboarding.focus.prev(),
        KeyCode::Enter => app.submit_onboarding(),
        KeyCode::Backspace => app.onboarding.backspace(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.skip_onboarding()
        }
        KeyCode::Char(' ') if app.onboarding.focus == OnboardField::Gender => {
            app.onboarding.cycle_gender()
        }
        KeyCode::Char(c) => app.onboarding.handle_char(c),
        _ => {}
    }
}

fn handle_settings(app: &mut App, key: KeyEvent) {
    let Modal::Settings(mut state) = std::mem::replace(&mut app.modal, Modal::None) else {
        return;
    };

    let mut close = false;
    match state.section {
        SettingsSection::Profile if state.editing => match key.code {
            KeyCode::Esc => state.editing = false,
            KeyCode::Tab => state.cursor = (state.cursor + 1) % 2,
            KeyCode::Backspace => {
                if state.cursor == 0 {
                    state.name.backspace()
                } else {
                    state.location.backspace()
                }
            }
            KeyCode::Char(c) => {
                if state.cursor == 0 {
                    state.name.handle_char(c)
                } else {
                    state.location.handle_char(c)
                }
            }
            _ => {}
        },
        section => match key.code {
            KeyCode::Esc => close = true,
            KeyCode::Char('h') | KeyCode::Left => {
                let idx = SettingsSection::ALL.iter().position(|s| *s == section).unwrap_or(0);
                state.section =
                    SettingsSection::ALL[(idx + SettingsSection::ALL.len() - 1) % SettingsSection::ALL.len()];
                state.cursor = 0;
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let idx = SettingsSection::ALL.iter().position(|s| *s == section).unwrap_or(0);
                state.section = SettingsSection::ALL[(idx + 1) % SettingsSection::ALL.len()];
                state.cursor = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let max = section_rows(app, section);
                if max > 0 {
                    state.cursor = (state.cursor + 1) % max;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let max = section_rows(app, section);
                if max > 0 {
                    state.cursor = (state.cursor + max - 1) % max;
                }
            }
            KeyCode::Char('e') if section == SettingsSection::Profile => state.editing = true,
            KeyCode::Enter => apply_settings_row(app, &mut state),
            KeyCode::Char(' ') if section == SettingsSection::Dock => {
                let result = app.store.toggle_dock_item(state.cursor);
                app.store_result(result);
            }
            KeyCode::Char('K') if section == SettingsSection::Dock => {
                let result = app.store.move_dock_item_up(state.cursor);
                app.store_result(result);
                state.cursor = state.cursor.saturating_sub(1);
            }
            KeyCode::Char('J') if section == SettingsSection::Dock => {
                let last = app.store.dock_items().len().saturating_sub(1);
                let result = app.store.move_dock_item_down(state.cursor);
                app.store_result(result);
                state.cursor = (state.cursor + 1).min(last);
            }
            _ => {}
        },
    }

    if !close {
        app.modal = Modal::Settings(state);
    }
}

fn section_rows(app: &App, section: SettingsSection) -> usize {
    match section {
        SettingsSection::Profile => 2,
        SettingsSection::NavSize => NavSize::ALL.len(),
        SettingsSection::Dock => app.store.dock_items().len(),
        SettingsSection::Language => AppLanguage::ALL.len(),
        SettingsSection::Theme => AppTheme::ALL.len(),
    }
}

fn apply_settings_row(app: &mut App, state: &mut SettingsState) {
    match state.section {
        SettingsSection::Profile => {
            if let Some(profile) = app.store.profile().cloned() {
                let updated = rafiq_core::models::UserProfile {
                    name: state.name.value.trim().to_string(),
                    location: state.location.value.trim().to_string(),
                    ..profile
                };
                let result = app.store.set_profile(updated);
                app.store_result(result);
                app.notify("Profile saved");
            }
        }
        SettingsSection::NavSize => {
            let result = app.store.set_nav_size(NavSize::ALL[state.cursor]);
            app.store_result(result);
        }
        SettingsSection::Dock => {
            let result = app.store.toggle_dock_item(state.cursor);
            app.store_result(result);
        }
        SettingsSection::Language => {
            let result = app.store.set_language(AppLanguage::ALL[state.cursor]);
            app.store_result(result);
        }
        SettingsSection::Theme => {
            let result = app.store.set_theme(AppTheme::ALL[state.cursor]);
            app.store_result(result);
        }
    }
}

fn handle_quick_panel(app: &mut App, key: KeyEvent) {
    let mut cursor = match &app.modal {
        Modal::QuickPanel { cursor } => *cursor,
        _ => return,
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('p') => {
            app.modal = Modal::None;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => cursor = (cursor + 1) % AppTheme::ALL.len(),
        KeyCode::Char('k') | KeyCode::Up => {
            cursor = (cursor + AppTheme::ALL.len() - 1) % AppTheme::ALL.len()
        }
        KeyCode::Enter => {
            let result = app.store.set_theme(AppTheme::ALL[cursor]);
            app.store_result(result);
        }
        KeyCode::Char('b') => {
            app.request_briefing();
            return;
        }
        _ => {}
    }
    app.modal = Modal::QuickPanel { cursor };
}

fn handle_plan_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.modal = Modal::None,
        KeyCode::Enter => {
            let prompt = app.timeline.plan_input.value.trim().to_string();
            app.request_plan(prompt);
        }
        KeyCode::Backspace => app.timeline.plan_input.backspace(),
        KeyCode::Char(c) => app.timeline.plan_input.handle_char(c),
        _ => {}
    }
}

// =============================================================================
// Editing mode
// =============================================================================

fn target_field<'a>(app: &'a mut App, target: EditTarget) -> &'a mut crate::ui::state::TextField {
    match target {
        EditTarget::ChatInput => &mut app.studio.chat_input,
        EditTarget::CreatePrompt => &mut app.studio.prompt,
        EditTarget::CreateFile => &mut app.studio.file_path,
        EditTarget::AnalyzePath => &mut app.studio.analyze_path,
        EditTarget::QuranQuery => &mut app.quran.query,
        EditTarget::HadithQuery => &mut app.hadith.query,
        EditTarget::HubTopic => &mut app.hub.topic,
        EditTarget::HubBacklog => &mut app.hub.backlog_input,
        EditTarget::PlanPrompt => &mut app.timeline.plan_input,
    }
}

fn stop_editing(app: &mut App) {
    app.input_mode = InputMode::Normal;
    app.edit_target = None;
}

fn handle_editing(app: &mut App, key: KeyEvent) {
    let Some(target) = app.edit_target else {
        stop_editing(app);
        return;
    };

    match key.code {
        KeyCode::Esc => stop_editing(app),
        KeyCode::Backspace => target_field(app, target).backspace(),
        KeyCode::Char(c) => target_field(app, target).handle_char(c),
        KeyCode::Enter => match target {
            EditTarget::ChatInput => app.send_chat(),
            EditTarget::CreatePrompt => {
                app.request_creation();
                stop_editing(app);
            }
            EditTarget::CreateFile => stop_editing(app),
            EditTarget::AnalyzePath => {
                app.request_analysis();
                stop_editing(app);
            }
            EditTarget::QuranQuery => {
                app.quran.selected = 0;
                stop_editing(app);
            }
            EditTarget::HadithQuery => {
                let query = app.hadith.query.value.trim().to_string();
                app.request_hadith(query);
                stop_editing(app);
            }
            EditTarget::HubTopic => {
                let topic = app.hub.topic.value.trim().to_string();
                app.request_mcq(topic);
                stop_editing(app);
            }
            EditTarget::HubBacklog => {
                let topic = app.hub.backlog_input.take();
                let result = app.store.push_backlog(topic);
                app.store_result(result);
            }
            EditTarget::PlanPrompt => {}
        },
        _ => {}
    }
}

fn start_editing(app: &mut App, target: EditTarget) {
    app.input_mode = InputMode::Editing;
    app.edit_target = Some(target);
}

// =============================================================================
// Normal mode
// =============================================================================

fn handle_normal(app: &mut App, key: KeyEvent) {
    // View-scoped digit handling comes first: an open, unanswered drill
    // claims the number row.
    if app.view == DockView::Hub {
        if let (Some(mcq), None) = (&app.hub.mcq, app.hub.chosen) {
            if let KeyCode::Char(c) = key.code {
                if let Some(digit) = c.to_digit(10) {
                    let idx = digit as usize;
                    if idx >= 1 && idx <= mcq.options.len() {
                        app.hub.chosen = Some(idx - 1);
                        return;
                    }
                }
            }
        }
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char(']') => {
            app.cycle_view(true);
            return;
        }
        KeyCode::Char('[') => {
            app.cycle_view(false);
            return;
        }
        KeyCode::Char('s') => {
            app.modal = Modal::Settings(SettingsState::from_profile(app.store.profile()));
            return;
        }
        KeyCode::Char('p') => {
            app.modal = Modal::QuickPanel { cursor: 0 };
            return;
        }
        KeyCode::Char('O') => {
            app.toggle_offline();
            return;
        }
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.nudge_dock(-1);
            return;
        }
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.nudge_dock(1);
            return;
        }
        KeyCode::Char(c @ '1'..='7') => {
            app.select_dock_slot(c as usize - '1' as usize);
            return;
        }
        _ => {}
    }

    match app.view {
        DockView::Timeline => handle_timeline(app, key),
        DockView::Focus => handle_focus(app, key),
        DockView::Studio => handle_studio(app, key),
        DockView::Quran => handle_quran(app, key),
        DockView::Hadith => handle_hadith(app, key),
        DockView::History => handle_history(app, key),
        DockView::Hub => handle_hub(app, key),
    }
}

fn handle_timeline(app: &mut App, key: KeyEvent) {
    let schedule_len = app.store.schedule().len();
    let selected_item = app
        .store
        .schedule()
        .get(app.timeline.selected)
        .map(|item| (item.id, item.title.clone(), item.subtasks.len()));

    match key.code {
        KeyCode::Char('g') => app.modal = Modal::PlanPrompt,
        KeyCode::Char('a') => {
            let result = app.store.add_manual_item();
            app.store_result(result);
        }
        KeyCode::Char('r') => app.request_suggestions(),
        KeyCode::Char('j') | KeyCode::Down => {
            if schedule_len > 0 {
                app.timeline.selected = (app.timeline.selected + 1) % schedule_len;
                app.timeline.sub_cursor = 0;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if schedule_len > 0 {
                app.timeline.selected = (app.timeline.selected + schedule_len - 1) % schedule_len;
                app.timeline.sub_cursor = 0;
            }
        }
        KeyCode::Enter => {
            if let Some((id, _, _)) = selected_item {
                app.timeline.expanded = if app.timeline.expanded == Some(id) {
                    None
                } else {
                    Some(id)
                };
                app.timeline.sub_cursor = 0;
            }
        }
        KeyCode::Char('J') => {
            if let Some((id, _, subs)) = selected_item {
                if app.timeline.expanded == Some(id) && subs > 0 {
                    app.timeline.sub_cursor = (app.timeline.sub_cursor + 1) % subs;
                }
            }
        }
        KeyCode::Char('K') => {
            if let Some((id, _, subs)) = selected_item {
                if app.timeline.expanded == Some(id) && subs > 0 {
                    app.timeline.sub_cursor = (app.timeline.sub_cursor + subs - 1) % subs;
                }
            }
        }
        KeyCode::Char(' ') => {
            if let Some((id, _, _)) = selected_item {
                if app.timeline.expanded == Some(id) {
                    let result = app.store.toggle_subtask(id, app.timeline.sub_cursor);
                    app.store_result(result);
                }
            }
        }
        KeyCode::Char('b') => {
            if let Some((id, _, _)) = selected_item {
                let result = app.store.toggle_alarm(id);
                app.store_result(result);
            }
        }
        KeyCode::Char('i') => {
            if let Some((id, title, _)) = selected_item {
                app.request_subtasks(id, title);
            }
        }
        KeyCode::Char('d') => {
            if let Some((id, _, _)) = selected_item {
                let result = app.store.delete_item(id);
                app.store_result(result);
                if app.timeline.selected > 0 {
                    app.timeline.selected -= 1;
                }
                app.timeline.expanded = None;
            }
        }
        _ => {}
    }
}

fn handle_focus(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.focus.toggle(),
        KeyCode::Char('x') => app.focus.reset(),
        _ => {}
    }
}

fn handle_studio(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => app.studio.mode = StudioMode::Chat,
        KeyCode::Char('v') => app.studio.mode = StudioMode::Create,
        KeyCode::Char('z') => app.studio.mode = StudioMode::Analyze,
        _ => match app.studio.mode {
            StudioMode::Chat => match key.code {
                KeyCode::Char('m') => {
                    app.studio.chat_mode = match app.studio.chat_mode {
                        ChatMode::Text => ChatMode::Voice,
                        ChatMode::Voice => ChatMode::Text,
                    };
                }
                KeyCode::Char('t') => {
                    app.studio.tool = if app.studio.tool == GroundingTool::Search {
                        GroundingTool::None
                    } else {
                        GroundingTool::Search
                    };
                }
                KeyCode::Char('T') => {
                    app.studio.tool = if app.studio.tool == GroundingTool::Maps {
                        GroundingTool::None
                    } else {
                        GroundingTool::Maps
                    };
                }
                KeyCode::Char('i') if app.studio.chat_mode == ChatMode::Text => {
                    start_editing(app, EditTarget::ChatInput)
                }
                KeyCode::Char('a') if app.studio.chat_mode == ChatMode::Text => {
                    app.speak_last_reply()
                }
                KeyCode::Enter if app.studio.chat_mode == ChatMode::Voice => app.toggle_live(),
                _ => {}
            },
            StudioMode::Create => match key.code {
                KeyCode::Char('n') => {
                    app.studio.create_mode = match app.studio.create_mode {
                        CreateMode::ImageGen => CreateMode::ImageEdit,
                        CreateMode::ImageEdit => CreateMode::VideoGen,
                        CreateMode::VideoGen => CreateMode::ImageGen,
                    };
                }
                KeyCode::Char('r') => {
                    let all = AspectRatio::ALL;
                    let idx = all.iter().position(|r| *r == app.studio.ratio).unwrap_or(0);
                    app.studio.ratio = all[(idx + 1) % all.len()];
                }
                KeyCode::Char('u') => {
                    let all = ImageSize::ALL;
                    let idx = all.iter().position(|s| *s == app.studio.size).unwrap_or(0);
                    app.studio.size = all[(idx + 1) % all.len()];
                }
                KeyCode::Char('i') => start_editing(app, EditTarget::CreatePrompt),
                KeyCode::Char('f') | KeyCode::Tab => start_editing(app, EditTarget::CreateFile),
                KeyCode::Char('x') => app.cancel_video(),
                KeyCode::Enter => app.request_creation(),
                _ => {}
            },
            StudioMode::Analyze => match key.code {
                KeyCode::Char('i') => start_editing(app, EditTarget::AnalyzePath),
                KeyCode::Enter => app.request_analysis(),
                _ => {}
            },
        },
    }
}

fn handle_quran(app: &mut App, key: KeyEvent) {
    if app.quran.reading.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('h') => {
                app.quran.reading = None;
                app.quran.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.quran.scroll = app.quran.scroll.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.quran.scroll = app.quran.scroll.saturating_sub(1)
            }
            _ => {}
        }
        return;
    }

    let filtered_len = filter_surahs(&app.quran.surahs, &app.quran.query.value).len();
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => start_editing(app, EditTarget::QuranQuery),
        KeyCode::Char('j') | KeyCode::Down => {
            if filtered_len > 0 {
                app.quran.selected = (app.quran.selected + 1) % filtered_len;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if filtered_len > 0 {
                app.quran.selected = (app.quran.selected + filtered_len - 1) % filtered_len;
            }
        }
        KeyCode::Enter => {
            let number = filter_surahs(&app.quran.surahs, &app.quran.query.value)
                .get(app.quran.selected.min(filtered_len.saturating_sub(1)))
                .map(|s| s.number);
            if let Some(number) = number {
                app.open_surah(number);
            }
        }
        _ => {}
    }
}

fn handle_hadith(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => start_editing(app, EditTarget::HadithQuery),
        KeyCode::Enter => {
            let query = app.hadith.query.value.trim().to_string();
            app.request_hadith(query);
        }
        _ => {}
    }
}

fn handle_history(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.history.selected = (app.history.selected + 1) % ERAS.len()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.history.selected = (app.history.selected + ERAS.len() - 1) % ERAS.len()
        }
        KeyCode::Char('J') => app.history.scroll = app.history.scroll.saturating_add(1),
        KeyCode::Char('K') => app.history.scroll = app.history.scroll.saturating_sub(1),
        KeyCode::Enter => {
            let era = ERAS[app.history.selected];
            app.request_history(era.title);
        }
        _ => {}
    }
}

fn handle_hub(app: &mut App, key: KeyEvent) {
    let backlog_len = app.store.backlog().len();
    match key.code {
        KeyCode::Tab => {
            app.hub.focus = match app.hub.focus {
                HubFocus::Topic => HubFocus::Backlog,
                HubFocus::Backlog => HubFocus::Topic,
            };
        }
        KeyCode::Char('i') => {
            let target = match app.hub.focus {
                HubFocus::Topic => EditTarget::HubTopic,
                HubFocus::Backlog => EditTarget::HubBacklog,
            };
            start_editing(app, target);
        }
        KeyCode::Enter => match app.hub.focus {
            HubFocus::Topic => {
                let topic = app.hub.topic.value.trim().to_string();
                app.request_mcq(topic);
            }
            HubFocus::Backlog => {
                let topic = app.hub.backlog_input.take();
                let result = app.store.push_backlog(topic);
                app.store_result(result);
            }
        },
        KeyCode::Char('j') | KeyCode::Down if app.hub.focus == HubFocus::Backlog => {
            if backlog_len > 0 {
                app.hub.backlog_cursor = (app.hub.backlog_cursor + 1) % backlog_len;
            }
        }
        KeyCode::Char('k') | KeyCode::Up if app.hub.focus == HubFocus::Backlog => {
            if backlog_len > 0 {
                app.hub.backlog_cursor = (app.hub.backlog_cursor + backlog_len - 1) % backlog_len;
            }
        }
        KeyCode::Char('d') if app.hub.focus == HubFocus::Backlog => {
            if backlog_len > 0 {
                let result = app.store.remove_backlog(app.hub.backlog_cursor);
                app.store_result(result);
                if app.hub.backlog_cursor > 0 {
                    app.hub.backlog_cursor -= 1;
                }
            }
        }
        KeyCode::Char('g') if app.hub.focus == HubFocus::Backlog => {
            if let Some(topic) = app.store.backlog().get(app.hub.backlog_cursor).cloned() {
                app.request_strategy(topic);
            }
        }
        _ => {}
    }
}
