use serde::{Deserialize, Serialize};

/// The navigable destinations of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockView {
    Timeline,
    Focus,
    Studio,
    Quran,
    Hadith,
    History,
    Hub,
}

impl DockView {
    pub fn title(&self) -> &'static str {
        match self {
            DockView::Timeline => "Timeline",
            DockView::Focus => "Focus",
            DockView::Studio => "Studio",
            DockView::Quran => "Quran",
            DockView::Hadith => "Hadith",
            DockView::History => "History",
            DockView::Hub => "Hub",
        }
    }
}

/// One entry in the navigation dock: a destination, its glyph, and whether
/// it is currently shown. The list order is the navigation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockItem {
    pub view: DockView,
    pub icon: String,
    pub visible: bool,
}

impl DockItem {
    fn new(view: DockView, icon: &str) -> Self {
        Self {
            view,
            icon: icon.to_string(),
            visible: true,
        }
    }
}

/// The stock dock, one entry per view, all visible.
pub fn default_dock() -> Vec<DockItem> {
    vec![
        DockItem::new(DockView::Timeline, "calendar"),
        DockItem::new(DockView::Focus, "clock"),
        DockItem::new(DockView::Studio, "wand"),
        DockItem::new(DockView::Quran, "book-quran"),
        DockItem::new(DockView::Hadith, "scroll"),
        DockItem::new(DockView::History, "landmark"),
        DockItem::new(DockView::Hub, "layers"),
    ]
}

/// Swap entry `index` with the one before it. No-op at the top.
pub fn move_up(items: &mut [DockItem], index: usize) {
    if index > 0 && index < items.len() {
        items.swap(index, index - 1);
    }
}

/// Swap entry `index` with the one after it. No-op at the bottom.
pub fn move_down(items: &mut [DockItem], index: usize) {
    if items.len() > 1 && index < items.len() - 1 {
        items.swap(index, index + 1);
    }
}

/// Flip visibility of entry `index`. Hiding the last visible entry is
/// refused so the dock can never become empty.
pub fn toggle_visible(items: &mut [DockItem], index: usize) {
    let Some(item) = items.get(index) else {
        return;
    };
    if item.visible {
        let visible_count = items.iter().filter(|i| i.visible).count();
        if visible_count <= 1 {
            return;
        }
    }
    items[index].visible = !items[index].visible;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(items: &[DockItem]) -> Vec<DockView> {
        items.iter().map(|i| i.view).collect()
    }

    #[test]
    fn move_up_at_top_is_noop() {
        let mut items = default_dock();
        let before = views(&items);
        move_up(&mut items, 0);
        assert_eq!(views(&items), before);
    }

    #[test]
    fn move_down_at_bottom_is_noop() {
        let mut items = default_dock();
        let last = items.len() - 1;
        let before = views(&items);
        move_down(&mut items, last);
        assert_eq!(views(&items), before);
    }

    #[test]
    fn interior_moves_are_exact_adjacent_swaps() {
        let mut items = default_dock();
        let mut expected = views(&items);
        move_up(&mut items, 3);
        expected.swap(3, 2);
        assert_eq!(views(&items), expected);

        move_down(&mut items, 4);
        expected.swap(4, 5);
        assert_eq!(views(&items), expected);
    }

    #[test]
    fn moves_preserve_the_multiset_of_items() {
        let mut items = default_dock();
        let mut before = views(&items);
        move_up(&mut items, 2);
        move_down(&mut items, 0);
        move_up(&mut items, 6);
        let mut after = views(&items);
        before.sort_by_key(|v| v.title());
        after.sort_by_key(|v| v.title());
        assert_eq!(before, after);
    }

    #[test]
    fn cannot_hide_the_last_visible_item() {
        let mut items = default_dock();
        for i in 1..items.len() {
            toggle_visible(&mut items, i);
        }
        assert_eq!(items.iter().filter(|i| i.visible).count(), 1);
        // The sole survivor refuses to hide.
        toggle_visible(&mut items, 0);
        assert!(items[0].visible);
    }

    #[test]
    fn toggle_flips_and_restores() {
        let mut items = default_dock();
        toggle_visible(&mut items, 2);
        assert!(!items[2].visible);
        toggle_visible(&mut items, 2);
        assert!(items[2].visible);
    }
}
