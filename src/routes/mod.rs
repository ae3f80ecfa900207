use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod public;
pub mod todos;
pub mod users;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(users::router(state.clone()))
        .merge(todos::router(state))
}
