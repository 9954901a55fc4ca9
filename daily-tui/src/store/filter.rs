use daily_api::{CategoryId, Todo, TodoPriority, TodoStatus};

/// Transient todo filter. `None` on a field means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub category_id: Option<CategoryId>,
}

impl TodoFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.category_id.is_none()
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.is_none_or(|status| todo.status == status)
            && self.priority.is_none_or(|priority| todo.priority == priority)
            && self
                .category_id
                .is_none_or(|category_id| todo.category_id == Some(category_id))
    }
}

/// Todos satisfying every set criterion, in their original order.
pub fn filter_todos<'a>(todos: &'a [Todo], filter: &TodoFilter) -> Vec<&'a Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_api::TodoId;

    fn todo(
        id: i64,
        status: TodoStatus,
        priority: TodoPriority,
        category_id: Option<i64>,
    ) -> Todo {
        Todo {
            id: TodoId::new(id),
            title: format!("todo {id}"),
            description: None,
            status,
            priority,
            due_date: None,
            category_id: category_id.map(CategoryId::new),
            category_name: None,
        }
    }

    fn sample() -> Vec<Todo> {
        let mut todos = Vec::new();
        let mut id = 0;
        for status in TodoStatus::ALL {
            for priority in TodoPriority::ALL {
                for category_id in [None, Some(1), Some(2)] {
                    id += 1;
                    todos.push(todo(id, status, priority, category_id));
                }
            }
        }
        todos
    }

    fn all_filters() -> Vec<TodoFilter> {
        let statuses = std::iter::once(None).chain(TodoStatus::ALL.map(Some));
        let mut filters = Vec::new();
        for status in statuses {
            for priority in std::iter::once(None).chain(TodoPriority::ALL.map(Some)) {
                for category_id in [None, Some(1), Some(2), Some(99)] {
                    filters.push(TodoFilter {
                        status,
                        priority,
                        category_id: category_id.map(CategoryId::new),
                    });
                }
            }
        }
        filters
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let todos = sample();
        let filtered = filter_todos(&todos, &TodoFilter::default());
        assert_eq!(filtered.len(), todos.len());
        assert!(filtered.iter().zip(&todos).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn every_combination_is_sound_and_complete() {
        let todos = sample();
        for filter in all_filters() {
            let filtered = filter_todos(&todos, &filter);

            for kept in &filtered {
                assert!(
                    (filter.status.is_none() || filter.status == Some(kept.status))
                        && (filter.priority.is_none() || filter.priority == Some(kept.priority))
                        && (filter.category_id.is_none() || filter.category_id == kept.category_id),
                    "{filter:?} kept {kept:?}"
                );
            }

            let kept_ids: Vec<TodoId> = filtered.iter().map(|t| t.id).collect();
            for excluded in todos.iter().filter(|t| !kept_ids.contains(&t.id)) {
                assert!(!filter.matches(excluded), "{filter:?} dropped {excluded:?}");
            }

            let positions: Vec<usize> = filtered
                .iter()
                .map(|kept| todos.iter().position(|t| t.id == kept.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn filtering_does_not_touch_input() {
        let todos = sample();
        let before = todos.clone();
        let _ = filter_todos(
            &todos,
            &TodoFilter {
                status: Some(TodoStatus::Done),
                ..TodoFilter::default()
            },
        );
        assert_eq!(todos, before);
    }

    #[test]
    fn uncategorized_todo_never_matches_a_category() {
        let todos = vec![todo(1, TodoStatus::Pending, TodoPriority::Medium, None)];
        let filter = TodoFilter {
            category_id: Some(CategoryId::new(1)),
            ..TodoFilter::default()
        };
        assert!(filter_todos(&todos, &filter).is_empty());
        assert_eq!(filter_todos(&todos, &TodoFilter::default()).len(), 1);
    }
}
