use daily_api::{Category, CategoryId, RequestError};
use tracing::{info, warn};

use crate::api::ApiClient;

use super::{StoreEvent, StoreEvents};

/// Last-fetched snapshot of the backend's categories.
#[derive(Debug)]
pub struct CategoryStore {
    categories: Vec<Category>,
    events: StoreEvents,
}

impl CategoryStore {
    pub fn new(events: StoreEvents) -> Self {
        Self {
            categories: Vec::new(),
            events,
        }
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    /// Replace the snapshot with the backend's list.
    ///
    /// A failed fetch is not an error here: the list just becomes empty. Returns whether
    /// the fetch succeeded.
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        let loaded = match client.list_categories().await {
            Ok(categories) => {
                self.categories = dedup_by_id(categories);
                true
            }
            Err(e) => {
                warn!(error = %e, "category load failed, showing no categories");
                self.categories.clear();
                false
            }
        };
        self.events.publish(StoreEvent::CategoriesChanged);
        loaded
    }

    /// Create a category and reload. A blank name is a no-op and returns `Ok(false)`.
    pub async fn create(&mut self, client: &ApiClient, name: &str) -> Result<bool, RequestError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        client.create_category(name).await?;
        info!(name, "category created");
        self.load(client).await;
        Ok(true)
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = std::collections::HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.id))
        .collect()
}
