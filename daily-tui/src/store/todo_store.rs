use daily_api::{RequestError, Todo, TodoId, TodoPatch, TodoPayload, TodoStatus};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::ApiClient;

use super::{filter_todos, StoreEvent, StoreEvents, TodoFilter};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TodoStoreError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(&'static str),
    /// The backend refused the mutation; the local list is untouched.
    #[error("{0}")]
    Rejected(RequestError),
    /// The mutation went through but the follow-up reload failed; the list is now empty.
    #[error("{0}")]
    Resync(RequestError),
}

/// Last-fetched snapshot of the backend's todos.
///
/// Every mutation is followed by a full reload; the snapshot is never patched locally.
/// Overlapping mutations are not ordered: whichever reload finishes last wins.
#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    events: StoreEvents,
}

impl TodoStore {
    pub fn new(events: StoreEvents) -> Self {
        Self {
            todos: Vec::new(),
            events,
        }
    }

    pub fn all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn filtered(&self, filter: &TodoFilter) -> Vec<&Todo> {
        filter_todos(&self.todos, filter)
    }

    /// Replace the snapshot with the backend's list.
    ///
    /// On failure the snapshot is emptied and the error returned, so the caller can tell
    /// the user the backend is unreachable.
    pub async fn load(&mut self, client: &ApiClient) -> Result<(), RequestError> {
        let result = client.list_todos().await;
        let outcome = match result {
            Ok(todos) => {
                self.todos = todos;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "todo load failed");
                self.todos.clear();
                Err(e)
            }
        };
        self.events.publish(StoreEvent::TodosChanged);
        outcome
    }

    async fn resync(&mut self, client: &ApiClient) -> Result<(), TodoStoreError> {
        self.load(client).await.map_err(TodoStoreError::Resync)
    }

    pub async fn create(
        &mut self,
        client: &ApiClient,
        payload: &TodoPayload,
    ) -> Result<(), TodoStoreError> {
        validate(payload)?;
        client
            .create_todo(payload)
            .await
            .map_err(TodoStoreError::Rejected)?;
        info!(title = %payload.title, "todo created");
        self.resync(client).await
    }

    /// Full replacement of an existing todo.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: TodoId,
        payload: &TodoPayload,
    ) -> Result<(), TodoStoreError> {
        validate(payload)?;
        client
            .update_todo(id, payload)
            .await
            .map_err(TodoStoreError::Rejected)?;
        info!(%id, "todo updated");
        self.resync(client).await
    }

    pub async fn patch(
        &mut self,
        client: &ApiClient,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<(), TodoStoreError> {
        client
            .patch_todo(id, patch)
            .await
            .map_err(TodoStoreError::Rejected)?;
        self.resync(client).await
    }

    /// Flip completion: `done` goes back to `pending`, anything else becomes `done`.
    ///
    /// Returns the status that was sent, or `None` if the todo is not in the snapshot.
    pub async fn toggle_status(
        &mut self,
        client: &ApiClient,
        id: TodoId,
    ) -> Result<Option<TodoStatus>, TodoStoreError> {
        let Some(todo) = self.get(id) else {
            return Ok(None);
        };
        let next = todo.status.toggled();
        self.patch(client, id, &TodoPatch::status(next)).await?;
        Ok(Some(next))
    }

    /// Remove a todo. Callers must have confirmed the deletion with the user first.
    pub async fn delete(&mut self, client: &ApiClient, id: TodoId) -> Result<(), TodoStoreError> {
        client
            .delete_todo(id)
            .await
            .map_err(TodoStoreError::Rejected)?;
        info!(%id, "todo deleted");
        self.resync(client).await
    }

    /// Hand a free-form sentence to the backend, which turns it into a todo.
    pub async fn create_from_natural_language(
        &mut self,
        client: &ApiClient,
        text: &str,
    ) -> Result<(), TodoStoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoStoreError::Validation(
                "Describe the task in one sentence first",
            ));
        }
        client
            .create_todo_from_text(text)
            .await
            .map_err(TodoStoreError::Rejected)?;
        info!("todo created from natural language");
        self.resync(client).await
    }
}

fn validate(payload: &TodoPayload) -> Result<(), TodoStoreError> {
    if payload.title.trim().is_empty() {
        return Err(TodoStoreError::Validation("Title is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::store::StoreEvents;
    use daily_api::{CategoryId, TodoPriority};

    fn setup() -> (TodoStore, DevBackend, ApiClient) {
        let (events, _rx) = StoreEvents::channel();
        let backend = DevBackend::empty();
        let client = ApiClient::with_dev_backend(backend.clone()).unwrap();
        (TodoStore::new(events), backend, client)
    }

    async fn seeded(titles: &[&str]) -> (TodoStore, DevBackend, ApiClient) {
        let (mut store, backend, client) = setup();
        for title in titles {
            store
                .create(&client, &TodoPayload::new(*title))
                .await
                .unwrap();
        }
        (store, backend, client)
    }

    #[tokio::test]
    async fn create_reloads_from_backend() {
        let (store, _backend, _client) = seeded(&["Write report"]).await;

        assert_eq!(store.all().len(), 1);
        let todo = &store.all()[0];
        assert_eq!(todo.title, "Write report");
        assert_eq!(todo.status, TodoStatus::Pending);
        assert_eq!(todo.priority, TodoPriority::Medium);
    }

    #[tokio::test]
    async fn load_twice_is_idempotent() {
        let (mut store, _backend, client) = seeded(&["a", "b"]).await;

        store.load(&client).await.unwrap();
        let first = store.all().to_vec();
        store.load(&client).await.unwrap();
        assert_eq!(store.all(), first.as_slice());
    }

    #[tokio::test]
    async fn toggle_is_asymmetric() {
        let (mut store, _backend, client) = seeded(&["a", "b"]).await;
        let a = store.all()[0].id;
        let b = store.all()[1].id;

        let mut in_progress = store.get(b).unwrap().to_payload();
        in_progress.status = TodoStatus::InProgress;
        store.update(&client, b, &in_progress).await.unwrap();

        assert_eq!(
            store.toggle_status(&client, a).await.unwrap(),
            Some(TodoStatus::Done)
        );
        assert_eq!(store.get(a).unwrap().status, TodoStatus::Done);

        assert_eq!(
            store.toggle_status(&client, a).await.unwrap(),
            Some(TodoStatus::Pending)
        );
        assert_eq!(store.get(a).unwrap().status, TodoStatus::Pending);

        assert_eq!(
            store.toggle_status(&client, b).await.unwrap(),
            Some(TodoStatus::Done)
        );
        assert_eq!(store.get(b).unwrap().status, TodoStatus::Done);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_noop() {
        let (mut store, backend, client) = seeded(&["a"]).await;
        let calls = backend.calls();

        assert_eq!(
            store.toggle_status(&client, TodoId::new(999)).await.unwrap(),
            None
        );
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (mut store, _backend, client) = seeded(&["draft"]).await;
        let id = store.all()[0].id;

        let payload = TodoPayload {
            description: Some("with details".into()),
            priority: TodoPriority::High,
            category_id: Some(CategoryId::new(4)),
            ..TodoPayload::new("final")
        };
        store.update(&client, id, &payload).await.unwrap();

        let todo = store.get(id).unwrap();
        assert_eq!(todo.title, "final");
        assert_eq!(todo.description.as_deref(), Some("with details"));
        assert_eq!(todo.priority, TodoPriority::High);
        assert_eq!(todo.category_id, Some(CategoryId::new(4)));
    }

    #[tokio::test]
    async fn delete_removes_and_reloads() {
        let (mut store, _backend, client) = seeded(&["a", "b"]).await;
        let a = store.all()[0].id;

        store.delete(&client, a).await.unwrap();
        assert!(store.get(a).is_none());
        assert_eq!(store.all().len(), 1);
    }

    #[tokio::test]
    async fn rejected_mutation_leaves_snapshot_unchanged() {
        let (mut store, backend, client) = seeded(&["a"]).await;
        let before = store.all().to_vec();

        let err = store.delete(&client, TodoId::new(42)).await.unwrap_err();
        assert!(matches!(err, TodoStoreError::Rejected(ref e) if e.status() == Some(404)));
        assert_eq!(err.to_string(), "Todo not found");
        assert_eq!(store.all(), before.as_slice());

        backend.set_offline(true);
        let err = store
            .create(&client, &TodoPayload::new("b"))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoStoreError::Rejected(_)));
        assert_eq!(store.all(), before.as_slice());
    }

    #[tokio::test]
    async fn failed_load_empties_and_reports() {
        let (mut store, backend, client) = seeded(&["a"]).await;

        backend.set_offline(true);
        assert!(store.load(&client).await.is_err());
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn blank_title_and_text_are_rejected_without_calls() {
        let (mut store, backend, client) = setup();

        assert_eq!(
            store.create(&client, &TodoPayload::new("  ")).await,
            Err(TodoStoreError::Validation("Title is required"))
        );
        assert!(matches!(
            store.create_from_natural_language(&client, " \t ").await,
            Err(TodoStoreError::Validation(_))
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn natural_language_creates_through_backend() {
        let (mut store, _backend, client) = setup();

        store
            .create_from_natural_language(&client, "  Call the bank tomorrow  ")
            .await
            .unwrap();

        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].title, "Call the bank tomorrow");
    }

    #[tokio::test]
    async fn uncategorized_todo_is_excluded_by_category_filter() {
        let (mut store, _backend, client) = setup();
        let mut categorized = TodoPayload::new("categorized");
        categorized.category_id = Some(CategoryId::new(1));
        store.create(&client, &categorized).await.unwrap();
        store
            .create(&client, &TodoPayload::new("loose"))
            .await
            .unwrap();

        let loose = store
            .all()
            .iter()
            .find(|t| t.title == "loose")
            .unwrap();
        assert_eq!(loose.category_id, None);
        assert_eq!(loose.category_name, None);

        let filter = TodoFilter {
            category_id: Some(CategoryId::new(1)),
            ..TodoFilter::default()
        };
        let titles: Vec<&str> = store
            .filtered(&filter)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["categorized"]);
    }
}
