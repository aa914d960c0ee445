use crate::notice::Notice;
use crate::storage::LocalStorage;
use crate::store::WeeklyStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The store plus the last notice, waiting to be shown on the next page render.
#[derive(Debug, Default)]
pub struct Tracker {
    pub store: WeeklyStore,
    pub flash: Option<Notice>,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: LocalStorage,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(storage: LocalStorage, store: WeeklyStore) -> Self {
        Self {
            storage,
            tracker: Arc::new(Mutex::new(Tracker { store, flash: None })),
        }
    }
}
