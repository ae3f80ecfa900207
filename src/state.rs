use std::sync::Arc;

use crate::{config::AppConfig, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
