use std::sync::Arc;

use storage::MeetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MeetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn MeetStore {
        self.store.as_ref()
    }
}
