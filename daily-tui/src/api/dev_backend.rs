use daily_api::{
    Category, CategoryId, RequestError, Todo, TodoId, TodoPatch, TodoPayload, TodoPriority,
    TodoStatus,
};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the task backend, used by `dev` mode and the store tests.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevState>>,
}

#[derive(Debug, Default)]
struct DevState {
    categories: Vec<Category>,
    todos: Vec<Todo>,
    next_category_id: i64,
    next_todo_id: i64,
    offline: bool,
    categories_offline: bool,
    calls: usize,
}

impl DevState {
    fn check_online(&mut self) -> Result<(), RequestError> {
        self.calls += 1;
        if self.offline {
            return Err(RequestError::Transport(
                "connection refused (dev backend offline)".to_string(),
            ));
        }
        Ok(())
    }

    fn check_categories(&self) -> Result<(), RequestError> {
        if self.categories_offline {
            return Err(RequestError::Status {
                status: 503,
                message: "category service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn category_name(&self, id: Option<CategoryId>) -> Option<String> {
        let id = id?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }

    fn insert_todo(&mut self, payload: &TodoPayload) {
        self.next_todo_id += 1;
        let todo = Todo {
            id: TodoId::new(self.next_todo_id),
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status,
            priority: payload.priority,
            due_date: payload.due_date,
            category_id: payload.category_id,
            category_name: self.category_name(payload.category_id),
        };
        self.todos.push(todo);
    }

    fn todo_mut(&mut self, id: TodoId) -> Result<&mut Todo, RequestError> {
        self.todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(not_found)
    }
}

fn not_found() -> RequestError {
    RequestError::Status {
        status: 404,
        message: "Todo not found".to_string(),
    }
}

impl DevBackend {
    /// Backend seeded with a few categories and todos.
    pub fn new() -> Self {
        let backend = Self::empty();
        backend.seed();
        backend
    }

    pub fn empty() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevState::default())),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, DevState> {
        self.store.lock().expect("dev store lock poisoned")
    }

    fn seed(&self) {
        let mut state = self.state();
        for name in ["Work", "Study", "Personal"] {
            state.next_category_id += 1;
            let id = CategoryId::new(state.next_category_id);
            state.categories.push(Category {
                id,
                name: name.to_string(),
            });
        }

        let today = time::OffsetDateTime::now_utc().date();
        let seeds = [
            ("Read onboarding docs", TodoStatus::Done, TodoPriority::Medium, Some(1)),
            ("Fix flaky login test", TodoStatus::InProgress, TodoPriority::High, Some(1)),
            ("Finish SQL exercises", TodoStatus::Pending, TodoPriority::Low, Some(2)),
            ("Book dentist appointment", TodoStatus::Pending, TodoPriority::Medium, None),
        ];
        for (title, status, priority, category) in seeds {
            let payload = TodoPayload {
                title: title.to_string(),
                description: None,
                status,
                priority,
                due_date: (!status.is_done()).then_some(today),
                category_id: category.map(CategoryId::new),
            };
            state.insert_todo(&payload);
        }
    }

    /// Make every following call fail with a transport error, or recover.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Make only the category endpoints fail, leaving todos reachable.
    pub fn fail_categories(&self, fail: bool) {
        self.state().categories_offline = fail;
    }

    /// Number of calls received so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.state().calls
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        let mut state = self.state();
        state.check_online()?;
        state.check_categories()?;
        Ok(state.categories.clone())
    }

    pub fn create_category(&self, name: &str) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        state.check_categories()?;
        state.next_category_id += 1;
        let id = CategoryId::new(state.next_category_id);
        state.categories.push(Category {
            id,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn list_todos(&self) -> Result<Vec<Todo>, RequestError> {
        let mut state = self.state();
        state.check_online()?;
        Ok(state.todos.clone())
    }

    pub fn create_todo(&self, payload: &TodoPayload) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        state.insert_todo(payload);
        Ok(())
    }

    pub fn update_todo(&self, id: TodoId, payload: &TodoPayload) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        let category_name = state.category_name(payload.category_id);
        let todo = state.todo_mut(id)?;
        *todo = Todo {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: payload.status,
            priority: payload.priority,
            due_date: payload.due_date,
            category_id: payload.category_id,
            category_name,
        };
        Ok(())
    }

    pub fn patch_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        let category_name = patch
            .category_id
            .map(|category_id| state.category_name(Some(category_id)));
        let todo = state.todo_mut(id)?;
        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            todo.status = status;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(category_name) = category_name {
            todo.category_id = patch.category_id;
            todo.category_name = category_name;
        }
        Ok(())
    }

    pub fn delete_todo(&self, id: TodoId) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    /// Stand-in for the backend's language model: the sentence becomes the title.
    pub fn create_todo_from_text(&self, text: &str) -> Result<(), RequestError> {
        let mut state = self.state();
        state.check_online()?;
        let lowered = text.to_lowercase();
        let priority = if lowered.contains("urgent") || lowered.contains("asap") {
            TodoPriority::High
        } else {
            TodoPriority::Medium
        };
        let payload = TodoPayload {
            priority,
            ..TodoPayload::new(text.trim())
        };
        state.insert_todo(&payload);
        Ok(())
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}
