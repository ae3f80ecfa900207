use crate::{
    config::QuotaConfig,
    services::{todo_service::TodoService, user_service::UserService},
    state::AppState,
    store::Store,
};

#[derive(Clone)]
pub struct ServiceContext {
    store: Store,
    quota: QuotaConfig,
}

impl ServiceContext {
    pub fn new(store: Store, quota: QuotaConfig) -> Self {
        Self { store, quota }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.store.clone(), state.config.quota.clone())
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(self.store.clone(), self.quota.free_todo_limit)
    }
}
