use crate::{
    error::AppError,
    middleware::guards,
    store::{Store, User},
};

pub const USERNAME_TAKEN: &str = "Username already exists";
pub const ALREADY_PRO: &str = "Pro plan is already activated.";

#[derive(Clone)]
pub struct UserService {
    store: Store,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn register(&self, name: &str, username: &str) -> Result<User, AppError> {
        let mut state = self.store.write()?;
        let user = state
            .insert_user(User::new(name, username))
            .cloned()
            .ok_or_else(|| AppError::bad_request(USERNAME_TAKEN))?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub fn find(&self, raw_id: &str) -> Result<User, AppError> {
        let state = self.store.read()?;
        let ctx = guards::user_by_id(&state, raw_id)?;
        ctx.user(&state).cloned()
    }

    /// One-way switch; a second upgrade is rejected rather than toggled.
    pub fn upgrade_to_pro(&self, raw_id: &str) -> Result<User, AppError> {
        let mut state = self.store.write()?;
        let ctx = guards::user_by_id(&state, raw_id)?;
        let user = ctx.user_mut(&mut state)?;

        if user.pro {
            return Err(AppError::bad_request(ALREADY_PRO));
        }
        user.pro = true;

        tracing::info!(user_id = %user.id, "user upgraded to pro");
        Ok(user.clone())
    }
}
