use std::sync::Arc;

use crate::store::GradeStore;

pub type SharedState = Arc<AppState>;

/// Nothing here is mutated per request; the store's pool does its own locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GradeStore>,
}

impl AppState {
    pub fn new(store: impl GradeStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
