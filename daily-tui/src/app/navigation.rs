use daily_api::{CategoryId, TodoPriority, TodoStatus};

use super::*;

impl App {
    /// Switch views. Entering the OKR tab re-reads local storage.
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == Tab::Okr {
            self.okr.load();
            self.rebuild_okr_rows();
        }
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        let next = match self.tab {
            Tab::Daily => Tab::Okr,
            Tab::Okr => Tab::Daily,
        };
        self.switch_tab(next);
    }

    pub fn select_next(&mut self) {
        let (cursor, len) = self.cursor_mut();
        if len > 0 && *cursor + 1 < len {
            *cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        let (cursor, _) = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    fn cursor_mut(&mut self) -> (&mut usize, usize) {
        match self.tab {
            Tab::Daily => (&mut self.todo_cursor, self.visible_todos.len()),
            Tab::Okr => (&mut self.okr_cursor, self.okr_rows.len()),
        }
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = cycle_filter(&TodoStatus::ALL, self.filter.status);
        self.rebuild_visible_todos();
    }

    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = cycle_filter(&TodoPriority::ALL, self.filter.priority);
        self.rebuild_visible_todos();
    }

    pub fn cycle_category_filter(&mut self) {
        let ids: Vec<CategoryId> = self.categories.all().iter().map(|c| c.id).collect();
        self.filter.category_id = cycle_filter(&ids, self.filter.category_id);
        self.rebuild_visible_todos();
    }

    /// Sidebar pick: selecting the active category again clears the filter.
    pub fn toggle_sidebar_category(&mut self, index: usize) {
        let Some(id) = self.categories.all().get(index).map(|c| c.id) else {
            return;
        };
        self.filter.category_id = if self.filter.category_id == Some(id) {
            None
        } else {
            Some(id)
        };
        self.rebuild_visible_todos();
    }

    pub fn reset_filters(&mut self) {
        self.filter = TodoFilter::default();
        self.rebuild_visible_todos();
    }
}

/// "all" -> first -> ... -> last -> "all".
fn cycle_filter<T: Copy + PartialEq>(options: &[T], current: Option<T>) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| *o == c)) {
        None => options.first().copied(),
        Some(idx) => options.get(idx + 1).copied(),
    }
}
