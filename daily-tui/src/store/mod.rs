use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

mod category_store;
mod filter;
mod ids;
mod okr_store;
mod storage;
mod todo_store;

pub use category_store::CategoryStore;
pub use filter::{filter_todos, TodoFilter};
pub use okr_store::OkrStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use todo_store::{TodoStore, TodoStoreError};

/// Change notification published by a store after its contents were replaced or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    CategoriesChanged,
    TodosChanged,
    OkrChanged,
}

pub type StoreEventRx = UnboundedReceiver<StoreEvent>;

/// Publishing half of the store-change feed; cloned into every store.
#[derive(Debug, Clone)]
pub struct StoreEvents {
    tx: UnboundedSender<StoreEvent>,
}

impl StoreEvents {
    pub fn channel() -> (Self, StoreEventRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, event: StoreEvent) {
        // Nobody listening is fine: tests often drop the receiver.
        let _ = self.tx.send(event);
    }
}
