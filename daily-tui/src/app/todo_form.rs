use daily_api::{iso_date, Category, CategoryId, Todo, TodoId, TodoPayload, TodoPriority, TodoStatus};

use super::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFormField {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    Category,
}

impl TodoFormField {
    const ORDER: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::DueDate,
        Self::Category,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description | Self::DueDate)
    }
}

/// Create/edit dialog state for a single todo.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoForm {
    /// `None` when creating.
    pub editing: Option<TodoId>,
    pub title: TextInput,
    pub description: TextInput,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: TextInput,
    pub category_id: Option<CategoryId>,
    pub focused: TodoFormField,
    pub error: Option<String>,
}

impl Default for TodoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoForm {
    pub fn new() -> Self {
        Self {
            editing: None,
            title: TextInput::new(),
            description: TextInput::new(),
            status: TodoStatus::Pending,
            priority: TodoPriority::Medium,
            due_date: TextInput::new(),
            category_id: None,
            focused: TodoFormField::Title,
            error: None,
        }
    }

    pub fn edit(todo: &Todo) -> Self {
        Self {
            editing: Some(todo.id),
            title: TextInput::from_str(&todo.title),
            description: TextInput::from_str(todo.description.as_deref().unwrap_or_default()),
            status: todo.status,
            priority: todo.priority,
            due_date: TextInput::from_str(
                &todo
                    .due_date
                    .as_ref()
                    .map(iso_date::format)
                    .unwrap_or_default(),
            ),
            category_id: todo.category_id,
            focused: TodoFormField::Title,
            error: None,
        }
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            TodoFormField::Title => Some(&mut self.title),
            TodoFormField::Description => Some(&mut self.description),
            TodoFormField::DueDate => Some(&mut self.due_date),
            _ => None,
        }
    }

    /// Cycle the focused choice field. Text fields are left alone.
    pub fn cycle(&mut self, forward: bool, categories: &[Category]) {
        match self.focused {
            TodoFormField::Status => self.status = cycle(&TodoStatus::ALL, self.status, forward),
            TodoFormField::Priority => {
                self.priority = cycle(&TodoPriority::ALL, self.priority, forward)
            }
            TodoFormField::Category => {
                let options: Vec<Option<CategoryId>> = std::iter::once(None)
                    .chain(categories.iter().map(|c| Some(c.id)))
                    .collect();
                self.category_id = cycle(&options, self.category_id, forward);
            }
            _ => {}
        }
    }

    /// Build the request body, or the message to show in the dialog.
    pub fn to_payload(&self) -> Result<TodoPayload, String> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        let due_raw = self.due_date.value.trim();
        let due_date = if due_raw.is_empty() {
            None
        } else {
            Some(
                iso_date::parse(due_raw)
                    .ok()
                    .filter(|_| due_raw.len() == 10)
                    .ok_or_else(|| format!("Due date must be YYYY-MM-DD, got {due_raw:?}"))?,
            )
        };

        let description = self.description.value.trim();
        Ok(TodoPayload {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: self.status,
            priority: self.priority,
            due_date,
            category_id: self.category_id,
        })
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    if len == 0 {
        return current;
    }
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(1),
                name: "Work".into(),
            },
            Category {
                id: CategoryId::new(2),
                name: "Study".into(),
            },
        ]
    }

    #[test]
    fn new_form_defaults_to_pending_medium_uncategorized() {
        let mut form = TodoForm::new();
        form.title = TextInput::from_str("  Write report ");
        form.description = TextInput::from_str("   ");

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.title, "Write report");
        assert_eq!(payload.description, None);
        assert_eq!(payload.status, TodoStatus::Pending);
        assert_eq!(payload.priority, TodoPriority::Medium);
        assert_eq!(payload.due_date, None);
        assert_eq!(payload.category_id, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(
            TodoForm::new().to_payload(),
            Err("Title is required".to_string())
        );
    }

    #[test]
    fn due_date_must_be_iso() {
        let mut form = TodoForm::new();
        form.title = TextInput::from_str("x");

        form.due_date = TextInput::from_str("2025-02-30");
        assert!(form.to_payload().is_err());
        form.due_date = TextInput::from_str("tomorrow");
        assert!(form.to_payload().is_err());
        form.due_date = TextInput::from_str("2025-03-01T10:00");
        assert!(form.to_payload().is_err());

        form.due_date = TextInput::from_str("2025-03-01");
        let due = form.to_payload().unwrap().due_date.unwrap();
        assert_eq!(iso_date::format(&due), "2025-03-01");
    }

    #[test]
    fn edit_prefills_from_todo() {
        let todo: Todo = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Read paper",
            "description": "chapter 3",
            "status": "in_progress",
            "priority": "high",
            "due_date": "2025-06-01",
            "category_id": 2,
            "category_name": "Study"
        }))
        .unwrap();

        let form = TodoForm::edit(&todo);
        assert_eq!(form.editing, Some(TodoId::new(7)));
        assert_eq!(form.due_date.value, "2025-06-01");
        assert_eq!(form.to_payload().unwrap(), todo.to_payload());
    }

    #[test]
    fn category_cycles_through_none() {
        let mut form = TodoForm::new();
        form.focused = TodoFormField::Category;
        let cats = categories();

        form.cycle(true, &cats);
        assert_eq!(form.category_id, Some(CategoryId::new(1)));
        form.cycle(true, &cats);
        assert_eq!(form.category_id, Some(CategoryId::new(2)));
        form.cycle(true, &cats);
        assert_eq!(form.category_id, None);
        form.cycle(false, &cats);
        assert_eq!(form.category_id, Some(CategoryId::new(2)));
    }

    #[test]
    fn field_focus_wraps() {
        assert_eq!(TodoFormField::Category.next(), TodoFormField::Title);
        assert_eq!(TodoFormField::Title.prev(), TodoFormField::Category);
    }
}
