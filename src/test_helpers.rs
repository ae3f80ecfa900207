use std::sync::Arc;

use axum::{Router, middleware};

use crate::{
    config::AppConfig,
    middleware::{catch_panic_layer, cors_layer, json_error_middleware},
    routes::router,
    state::AppState,
    store::Store,
};

/// Fresh state with default config and an empty store.
pub fn test_state() -> Arc<AppState> {
    AppState::new(AppConfig::default(), Store::new())
}

/// The full application stack, layered the same way the binary serves it.
pub fn test_app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(cors_layer())
}
