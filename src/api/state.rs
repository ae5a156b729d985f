//! API server state

use std::sync::Arc;

use crate::storage::TodoStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Shared document store handle
    pub store: Arc<dyn TodoStore>,

    /// Return raw store error text in 500 responses instead of a generic message
    pub expose_errors: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            expose_errors: false,
        }
    }

    pub fn with_expose_errors(mut self, expose_errors: bool) -> Self {
        self.expose_errors = expose_errors;
        self
    }
}
