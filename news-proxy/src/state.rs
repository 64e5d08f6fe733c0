use std::sync::Arc;

use crate::upstream::NewsProvider;

pub struct AppState {
    pub provider: Arc<dyn NewsProvider>,
}

impl AppState {
    pub fn new(provider: impl NewsProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}
