use anyhow::Result;
use tracing::info;

use crate::api::ApiClient;
use crate::app::App;
use crate::config::TasksConfig;
use crate::runtime::load_all;
use crate::store::{FileStore, KeyValueStore, MemoryStore, StoreEventRx, StoreEvents};

pub enum Backend {
    /// Real task backend at the given base URL.
    Remote(String),
    /// In-memory seeded backend; OKRs are kept in memory too.
    Dev,
}

/// Build the client and the app container with its stores wired to one event feed.
pub fn build_app(config: &TasksConfig, backend: Backend) -> Result<(App, ApiClient, StoreEventRx)> {
    let (client, storage): (ApiClient, Box<dyn KeyValueStore>) = match backend {
        Backend::Remote(url) => {
            let client = ApiClient::new(&url)?;
            let storage = FileStore::new(config.data_dir()?);
            info!(api_url = %url, data_dir = %storage.root().display(), "starting");
            (client, Box::new(storage))
        }
        Backend::Dev => {
            info!("starting in dev mode");
            (ApiClient::dev()?, Box::new(MemoryStore::new()))
        }
    };

    let (events, store_rx) = StoreEvents::channel();
    let app = App::new(events, storage, client.base_url());
    Ok((app, client, store_rx))
}

/// Initial fetch: categories, then todos.
pub async fn initialize_app_state(app: &mut App, client: &ApiClient) {
    load_all(app, client).await;
    info!(
        categories = app.categories.all().len(),
        todos = app.todos.all().len(),
        objectives = app.okr.objectives().len(),
        "initial state loaded"
    );
}
