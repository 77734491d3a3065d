use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// One titled, timed block of the day's plan.
///
/// Insertion order is display order; nothing ties the time range to the
/// position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: u64,
    pub title: String,
    /// Display time range, e.g. "07:00 – 08:00". Free-form.
    pub time: String,
    pub icon: String,
    pub color: String,
    pub bg: String,
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub alarm_enabled: bool,
}

impl ScheduleItem {
    pub fn completed_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    /// Completion ratio in [0, 1]; an empty checklist counts as 0.
    pub fn progress(&self) -> f64 {
        if self.subtasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.subtasks.len() as f64
        }
    }

    /// Flip one subtask's completed flag. Out-of-range indexes are ignored.
    pub fn toggle_subtask(&mut self, index: usize) {
        if let Some(sub) = self.subtasks.get_mut(index) {
            sub.completed = !sub.completed;
        }
    }

    pub fn toggle_alarm(&mut self) {
        self.alarm_enabled = !self.alarm_enabled;
    }
}

/// The seed schedule shown before any plan is generated.
pub fn initial_schedule() -> Vec<ScheduleItem> {
    vec![ScheduleItem {
        id: 1,
        title: "Morning Rituals".to_string(),
        time: "07:00 – 08:00".to_string(),
        icon: "sun".to_string(),
        color: "amber".to_string(),
        bg: "amber-soft".to_string(),
        subtasks: vec![
            Subtask::new("Wake up & Hydrate"),
            Subtask::new("Gratitude & Mindfulness"),
        ],
        alarm_enabled: false,
    }]
}

/// A manually added category with a placeholder checklist. The id is one
/// past the current maximum so AI-generated ids (small integers) and manual
/// ids never collide within one schedule.
pub fn manual_item(schedule: &[ScheduleItem]) -> ScheduleItem {
    let next_id = schedule.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    ScheduleItem {
        id: next_id,
        title: "New Category".to_string(),
        time: "12:00 – 13:00".to_string(),
        icon: "book".to_string(),
        color: "blue".to_string(),
        bg: "blue-soft".to_string(),
        subtasks: vec![Subtask::new("Tap to edit tasks")],
        alarm_enabled: false,
    }
}

/// Progress across the whole schedule: (completed, total).
pub fn overall_progress(schedule: &[ScheduleItem]) -> (usize, usize) {
    let total = schedule.iter().map(|s| s.subtasks.len()).sum();
    let completed = schedule.iter().map(|s| s.completed_count()).sum();
    (completed, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with(flags: &[bool]) -> ScheduleItem {
        ScheduleItem {
            id: 7,
            title: "Study".into(),
            time: "09:00 – 10:00".into(),
            icon: "book".into(),
            color: "blue".into(),
            bg: "blue-soft".into(),
            subtasks: flags
                .iter()
                .map(|&c| Subtask {
                    text: "t".into(),
                    completed: c,
                })
                .collect(),
            alarm_enabled: false,
        }
    }

    #[test]
    fn completed_count_tracks_toggle_sequences() {
        let mut item = item_with(&[false, false, false]);
        item.toggle_subtask(0);
        item.toggle_subtask(2);
        assert_eq!(item.completed_count(), 2);

        item.toggle_subtask(2);
        assert_eq!(item.completed_count(), 1);

        // Count always equals the number of true flags.
        let true_flags = item.subtasks.iter().filter(|s| s.completed).count();
        assert_eq!(item.completed_count(), true_flags);
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut item = item_with(&[true, false]);
        let before = item.clone();
        item.toggle_subtask(1);
        item.toggle_subtask(1);
        assert_eq!(item, before);
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut item = item_with(&[false]);
        item.toggle_subtask(9);
        assert_eq!(item.completed_count(), 0);
    }

    #[test]
    fn manual_item_id_never_collides() {
        let mut schedule = initial_schedule();
        let added = manual_item(&schedule);
        assert!(schedule.iter().all(|s| s.id != added.id));
        schedule.push(added);
        let second = manual_item(&schedule);
        assert!(schedule.iter().all(|s| s.id != second.id));
    }

    #[test]
    fn overall_progress_sums_across_items() {
        let schedule = vec![item_with(&[true, true]), item_with(&[false, true, false])];
        assert_eq!(overall_progress(&schedule), (3, 5));
    }
}
