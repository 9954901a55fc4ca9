use daily_api::{Todo, TodoId};
use std::time::{Duration, Instant};

use crate::store::{
    CategoryStore, KeyValueStore, OkrStore, StoreEvent, StoreEvents, TodoFilter, TodoStore,
};

mod navigation;
mod okr;
mod state;
mod todo_form;

pub use state::*;
pub use todo_form::{TodoForm, TodoFormField};

pub const CREATE_BANNER_TTL: Duration = Duration::from_millis(2000);
pub const QUICK_BANNER_TTL: Duration = Duration::from_millis(1500);
pub const NATURAL_LANGUAGE_BANNER_TTL: Duration = Duration::from_millis(3000);

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub api_url: String,

    pub categories: CategoryStore,
    pub todos: TodoStore,
    pub okr: OkrStore,

    pub filter: TodoFilter,
    /// Ids of the todos passing `filter`, in backend order.
    pub visible_todos: Vec<TodoId>,
    pub todo_cursor: usize,
    pub okr_rows: Vec<OkrRow>,
    pub okr_cursor: usize,

    pub dialog: Option<Dialog>,
    pub banner: Option<StatusBanner>,
    /// A natural-language request is on its way; the submit key is ignored until it returns.
    pub nl_in_flight: bool,

    // Throbber
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(events: StoreEvents, okr_storage: Box<dyn KeyValueStore>, api_url: &str) -> Self {
        let okr = OkrStore::open(okr_storage, events.clone());
        let mut app = Self {
            running: true,
            tab: Tab::Daily,
            api_url: api_url.to_string(),
            categories: CategoryStore::new(events.clone()),
            todos: TodoStore::new(events),
            okr,
            filter: TodoFilter::default(),
            visible_todos: Vec::new(),
            todo_cursor: 0,
            okr_rows: Vec::new(),
            okr_cursor: 0,
            dialog: None,
            banner: None,
            nl_in_flight: false,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        };
        app.rebuild_okr_rows();
        app
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_success(&mut self, message: impl Into<String>, ttl: Duration) {
        self.banner = Some(StatusBanner::success(message, ttl));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.banner = Some(StatusBanner::error(message));
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    /// Per-frame housekeeping: drop an expired banner and spin the throbber.
    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.banner = None;
        }
        if self.is_loading || self.nl_in_flight {
            self.throbber_state.calc_next();
        }
    }

    pub fn connectivity_message(&self, error: &str) -> String {
        format!(
            "Cannot reach backend: {error}. Check that the API server at {} is running and reachable.",
            self.api_url
        )
    }

    /// Rebuild derived view state after a store changed.
    pub fn apply_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::CategoriesChanged => {
                let stale = self
                    .filter
                    .category_id
                    .is_some_and(|id| self.categories.get(id).is_none());
                if stale {
                    self.filter.category_id = None;
                }
                self.rebuild_visible_todos();
            }
            StoreEvent::TodosChanged => self.rebuild_visible_todos(),
            StoreEvent::OkrChanged => self.rebuild_okr_rows(),
        }
    }

    pub fn rebuild_visible_todos(&mut self) {
        self.visible_todos = self
            .todos
            .filtered(&self.filter)
            .into_iter()
            .map(|t| t.id)
            .collect();
        self.todo_cursor = clamp_cursor(self.todo_cursor, self.visible_todos.len());
    }

    pub fn rebuild_okr_rows(&mut self) {
        self.okr_rows = self
            .okr
            .objectives()
            .iter()
            .flat_map(|o| {
                std::iter::once(OkrRow::Objective {
                    objective_id: o.id.clone(),
                })
                .chain(o.key_results.iter().map(|kr| OkrRow::KeyResult {
                    objective_id: o.id.clone(),
                    kr_id: kr.id.clone(),
                }))
            })
            .collect();
        self.okr_cursor = clamp_cursor(self.okr_cursor, self.okr_rows.len());
    }

    pub fn iter_visible_todos(&self) -> impl Iterator<Item = &Todo> {
        self.visible_todos.iter().filter_map(|id| self.todos.get(*id))
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.visible_todos
            .get(self.todo_cursor)
            .and_then(|id| self.todos.get(*id))
    }

    pub fn selected_okr_row(&self) -> Option<&OkrRow> {
        self.okr_rows.get(self.okr_cursor)
    }

    pub fn open_new_todo(&mut self) {
        self.dialog = Some(Dialog::TodoForm(TodoForm::new()));
    }

    pub fn open_edit_selected_todo(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.dialog = Some(Dialog::TodoForm(TodoForm::edit(todo)));
        }
    }

    pub fn open_new_category(&mut self) {
        self.dialog = Some(Dialog::NewCategory(TextInput::new()));
    }

    pub fn open_natural_language(&mut self) {
        self.dialog = Some(Dialog::NaturalLanguage(TextInput::new()));
    }

    pub fn request_delete_selected_todo(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.dialog = Some(Dialog::ConfirmDelete(DeleteTarget::Todo {
                id: todo.id,
                title: todo.title.clone(),
            }));
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}
