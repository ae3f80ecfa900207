//! Process-lifetime, in-memory storage for users and their todos.
//!
//! A single [`RwLock`] guards the whole state. Callers take it once per
//! operation and run every check and mutation under that one acquisition.

mod models;

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use uuid::Uuid;

use crate::error::AppError;

pub use models::{Todo, User};

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::internal("store lock poisoned"))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::internal("store lock poisoned"))
    }
}

#[derive(Debug, Default)]
pub struct StoreState {
    users: HashMap<Uuid, User>,
    usernames: HashMap<String, Uuid>,
}

impl StoreState {
    pub fn user(&self, id: &Uuid) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_mut(&mut self, id: &Uuid) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.usernames
            .get(username)
            .and_then(|id| self.users.get(id))
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.usernames.contains_key(username)
    }

    /// Inserts a freshly created user. Returns `None` when the username is
    /// already registered, leaving the state untouched.
    pub fn insert_user(&mut self, user: User) -> Option<&User> {
        if self.username_taken(&user.username) {
            return None;
        }
        let id = user.id;
        self.usernames.insert(user.username.clone(), id);
        self.users.insert(id, user);
        self.users.get(&id)
    }

    #[cfg(test)]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
