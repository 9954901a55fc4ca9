use anyhow::{Context, Result};
use daily_api::{Category, RequestError, TaskClient, Todo, TodoId, TodoPatch, TodoPayload};

use crate::api::dev_backend::DevBackend;

/// Remote store client used by the stores.
///
/// In dev mode every call is answered by the in-memory [`DevBackend`] instead of HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    remote: TaskClient,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let remote = TaskClient::new(base_url)
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        Ok(Self {
            remote,
            dev_backend: None,
        })
    }

    pub fn dev() -> Result<Self> {
        Self::with_dev_backend(DevBackend::new())
    }

    pub fn with_dev_backend(backend: DevBackend) -> Result<Self> {
        let remote =
            TaskClient::new("http://localhost").context("Failed to build HTTP client")?;
        Ok(Self {
            remote,
            dev_backend: Some(backend),
        })
    }

    pub fn base_url(&self) -> &str {
        if self.dev_backend.is_some() {
            "dev backend"
        } else {
            self.remote.base_url()
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.list_categories();
        }
        self.remote.list_categories().await
    }

    pub async fn create_category(&self, name: &str) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_category(name);
        }
        self.remote.create_category(name).await
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.list_todos();
        }
        self.remote.list_todos().await
    }

    pub async fn create_todo(&self, payload: &TodoPayload) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_todo(payload);
        }
        self.remote.create_todo(payload).await
    }

    pub async fn update_todo(&self, id: TodoId, payload: &TodoPayload) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_todo(id, payload);
        }
        self.remote.update_todo(id, payload).await
    }

    pub async fn patch_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.patch_todo(id, patch);
        }
        self.remote.patch_todo(id, patch).await
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.delete_todo(id);
        }
        self.remote.delete_todo(id).await
    }

    pub async fn create_todo_from_text(&self, text: &str) -> Result<(), RequestError> {
        if let Some(dev) = &self.dev_backend {
            return dev.create_todo_from_text(text);
        }
        self.remote.create_todo_from_text(text).await
    }
}
