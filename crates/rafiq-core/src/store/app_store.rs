//! The single state owner.
//!
//! Every piece of persisted application state lives here behind typed
//! get/set operations; each set writes its slot through immediately. Slots
//! are independent: a failed write of one never blocks another.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::models::dock::{self, DockItem};
use crate::models::schedule::{self, ScheduleItem, Subtask};
use crate::models::{AppLanguage, AppTheme, NavSize, UserProfile};
use crate::store::SlotStore;

const SLOT_PROFILE: &str = "profile";
const SLOT_SCHEDULE: &str = "schedule";
const SLOT_BACKLOG: &str = "backlog";
const SLOT_LANGUAGE: &str = "language";
const SLOT_THEME: &str = "theme";
const SLOT_NAV_SIZE: &str = "nav_size";
const SLOT_DOCK: &str = "dock_items";
const SLOT_NAV_POSITION: &str = "nav_position";

/// Screen position of the dock bar, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPosition {
    pub x: u16,
    pub y: u16,
}

impl Default for NavPosition {
    fn default() -> Self {
        Self { x: 2, y: 4 }
    }
}

pub struct AppStore {
    slots: SlotStore,
    profile: Option<UserProfile>,
    schedule: Vec<ScheduleItem>,
    backlog: Vec<String>,
    language: AppLanguage,
    theme: AppTheme,
    nav_size: NavSize,
    dock_items: Vec<DockItem>,
    nav_position: NavPosition,
}

impl AppStore {
    /// Load every slot, substituting the hardcoded default when a slot is
    /// absent or unreadable. A corrupt slot logs a warning and falls back;
    /// startup never aborts on bad state.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Self {
        let slots = SlotStore::new(data_dir);

        fn read_or<T: serde::de::DeserializeOwned>(
            slots: &SlotStore,
            slot: &'static str,
            default: T,
        ) -> T {
            match slots.load(slot) {
                Ok(Some(value)) => value,
                Ok(None) => default,
                Err(e) => {
                    warn!("slot '{slot}' unreadable, using default: {e}");
                    default
                }
            }
        }

        let profile = read_or(&slots, SLOT_PROFILE, None::<UserProfile>);
        let schedule = read_or(&slots, SLOT_SCHEDULE, schedule::initial_schedule());
        let backlog = read_or(&slots, SLOT_BACKLOG, Vec::new());
        let language = read_or(&slots, SLOT_LANGUAGE, AppLanguage::default());
        let theme = read_or(&slots, SLOT_THEME, AppTheme::default());
        let nav_size = read_or(&slots, SLOT_NAV_SIZE, NavSize::default());
        let dock_items = read_or(&slots, SLOT_DOCK, dock::default_dock());
        let nav_position = read_or(&slots, SLOT_NAV_POSITION, NavPosition::default());

        Self {
            slots,
            profile,
            schedule,
            backlog,
            language,
            theme,
            nav_size,
            dock_items,
            nav_position,
        }
    }

    // -- profile -----------------------------------------------------------

    /// `None` until onboarding completes or is skipped.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn needs_onboarding(&self) -> bool {
        self.profile.as_ref().map(|p| !p.onboarded).unwrap_or(true)
    }

    pub fn set_profile(&mut self, profile: UserProfile) -> Result<(), StoreError> {
        self.profile = Some(profile);
        self.slots.save(SLOT_PROFILE, &self.profile)
    }

    // -- schedule ----------------------------------------------------------

    pub fn schedule(&self) -> &[ScheduleItem] {
        &self.schedule
    }

    /// Replace the whole plan (AI generation).
    pub fn replace_schedule(&mut self, items: Vec<ScheduleItem>) -> Result<(), StoreError> {
        self.schedule = items;
        self.persist_schedule()
    }

    /// Append a manually created category.
    pub fn add_manual_item(&mut self) -> Result<(), StoreError> {
        let item = schedule::manual_item(&self.schedule);
        self.schedule.push(item);
        self.persist_schedule()
    }

    pub fn delete_item(&mut self, id: u64) -> Result<(), StoreError> {
        self.schedule.retain(|s| s.id != id);
        self.persist_schedule()
    }

    pub fn toggle_subtask(&mut self, id: u64, sub_index: usize) -> Result<(), StoreError> {
        if let Some(item) = self.schedule.iter_mut().find(|s| s.id == id) {
            item.toggle_subtask(sub_index);
        }
        self.persist_schedule()
    }

    pub fn toggle_alarm(&mut self, id: u64) -> Result<(), StoreError> {
        if let Some(item) = self.schedule.iter_mut().find(|s| s.id == id) {
            item.toggle_alarm();
        }
        self.persist_schedule()
    }

    /// Append AI-suggested subtasks to one category.
    pub fn append_subtasks(&mut self, id: u64, texts: Vec<String>) -> Result<(), StoreError> {
        if let Some(item) = self.schedule.iter_mut().find(|s| s.id == id) {
            item.subtasks.extend(texts.into_iter().map(Subtask::new));
        }
        self.persist_schedule()
    }

    fn persist_schedule(&self) -> Result<(), StoreError> {
        self.slots.save(SLOT_SCHEDULE, &self.schedule)
    }

    // -- backlog -----------------------------------------------------------

    pub fn backlog(&self) -> &[String] {
        &self.backlog
    }

    pub fn push_backlog(&mut self, topic: String) -> Result<(), StoreError> {
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return Ok(());
        }
        self.backlog.push(topic);
        self.slots.save(SLOT_BACKLOG, &self.backlog)
    }

    pub fn remove_backlog(&mut self, index: usize) -> Result<(), StoreError> {
        if index < self.backlog.len() {
            self.backlog.remove(index);
        }
        self.slots.save(SLOT_BACKLOG, &self.backlog)
    }

    // -- appearance & language --------------------------------------------

    pub fn language(&self) -> AppLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: AppLanguage) -> Result<(), StoreError> {
        self.language = language;
        self.slots.save(SLOT_LANGUAGE, &self.language)
    }

    pub fn theme(&self) -> AppTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: AppTheme) -> Result<(), StoreError> {
        self.theme = theme;
        self.slots.save(SLOT_THEME, &self.theme)
    }

    pub fn nav_size(&self) -> NavSize {
        self.nav_size
    }

    pub fn set_nav_size(&mut self, nav_size: NavSize) -> Result<(), StoreError> {
        self.nav_size = nav_size;
        self.slots.save(SLOT_NAV_SIZE, &self.nav_size)
    }

    pub fn nav_position(&self) -> NavPosition {
        self.nav_position
    }

    pub fn set_nav_position(&mut self, pos: NavPosition) -> Result<(), StoreError> {
        self.nav_position = pos;
        self.slots.save(SLOT_NAV_POSITION, &self.nav_position)
    }

    // -- dock --------------------------------------------------------------

    pub fn dock_items(&self) -> &[DockItem] {
        &self.dock_items
    }

    pub fn visible_dock_items(&self) -> Vec<DockItem> {
        self.dock_items.iter().filter(|i| i.visible).cloned().collect()
    }

    pub fn move_dock_item_up(&mut self, index: usize) -> Result<(), StoreError> {
        dock::move_up(&mut self.dock_items, index);
        self.slots.save(SLOT_DOCK, &self.dock_items)
    }

    pub fn move_dock_item_down(&mut self, index: usize) -> Result<(), StoreError> {
        dock::move_down(&mut self.dock_items, index);
        self.slots.save(SLOT_DOCK, &self.dock_items)
    }

    pub fn toggle_dock_item(&mut self, index: usize) -> Result<(), StoreError> {
        dock::toggle_visible(&mut self.dock_items, index);
        self.slots.save(SLOT_DOCK, &self.dock_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use tempfile::TempDir;

    #[test]
    fn fresh_store_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = AppStore::load(dir.path());
        assert!(store.needs_onboarding());
        assert_eq!(store.schedule().len(), 1);
        assert_eq!(store.schedule()[0].title, "Morning Rituals");
        assert!(store.backlog().is_empty());
        assert_eq!(store.language(), AppLanguage::English);
        assert_eq!(store.theme(), AppTheme::Standard);
        assert_eq!(store.dock_items().len(), 7);
    }

    #[test]
    fn every_slot_round_trips_through_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = AppStore::load(dir.path());
            store
                .set_profile(UserProfile {
                    name: "Fatima".into(),
                    gender: Gender::Female,
                    dob: "1990-06-15".into(),
                    location: "Istanbul, Turkey".into(),
                    onboarded: true,
                })
                .unwrap();
            store.add_manual_item().unwrap();
            store.toggle_subtask(1, 0).unwrap();
            store.push_backlog("tajweed rules".into()).unwrap();
            store.set_language(AppLanguage::Turkish).unwrap();
            store.set_theme(AppTheme::Ramadan).unwrap();
            store.set_nav_size(NavSize::Large).unwrap();
            store.move_dock_item_down(0).unwrap();
            store.toggle_dock_item(3).unwrap();
            store.set_nav_position(NavPosition { x: 10, y: 6 }).unwrap();

            let reloaded = AppStore::load(dir.path());
            assert_eq!(reloaded.profile(), store.profile());
            assert_eq!(reloaded.schedule(), store.schedule());
            assert_eq!(reloaded.backlog(), store.backlog());
            assert_eq!(reloaded.language(), store.language());
            assert_eq!(reloaded.theme(), store.theme());
            assert_eq!(reloaded.nav_size(), store.nav_size());
            assert_eq!(reloaded.dock_items(), store.dock_items());
            assert_eq!(reloaded.nav_position(), store.nav_position());
        }
    }

    #[test]
    fn corrupt_slot_falls_back_without_aborting() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = AppStore::load(dir.path());
            store.set_theme(AppTheme::Eid).unwrap();
        }
        std::fs::write(dir.path().join("state/theme.json"), "not json at all").unwrap();
        let store = AppStore::load(dir.path());
        assert_eq!(store.theme(), AppTheme::Standard);
    }

    #[test]
    fn backlog_append_and_remove_preserve_order() {
        let dir = TempDir::new().unwrap();
        let mut store = AppStore::load(dir.path());
        store.push_backlog("a".into()).unwrap();
        store.push_backlog("b".into()).unwrap();
        store.push_backlog("c".into()).unwrap();
        store.remove_backlog(1).unwrap();
        assert_eq!(store.backlog(), ["a".to_string(), "c".to_string()]);
        // Removing past the end changes nothing.
        store.remove_backlog(10).unwrap();
        assert_eq!(store.backlog().len(), 2);
    }

    #[test]
    fn blank_backlog_entries_are_dropped() {
        let dir = TempDir::new().unwrap();
        let mut store = AppStore::load(dir.path());
        store.push_backlog("   ".into()).unwrap();
        assert!(store.backlog().is_empty());
    }

    #[test]
    fn ai_replacement_swaps_the_whole_plan() {
        let dir = TempDir::new().unwrap();
        let mut store = AppStore::load(dir.path());
        let plan = vec![ScheduleItem {
            id: 1,
            title: "Fajr & Dhikr".into(),
            time: "05:00 – 06:00".into(),
            icon: "mosque".into(),
            color: "emerald".into(),
            bg: "emerald-soft".into(),
            subtasks: vec![Subtask::new("Pray Fajr")],
            alarm_enabled: false,
        }];
        store.replace_schedule(plan.clone()).unwrap();
        assert_eq!(store.schedule(), plan.as_slice());
    }
}
