use std::sync::Arc;

use storage::Backend;

/// Shared handler state: the backend every request goes through
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}
