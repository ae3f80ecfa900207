//! Request guards. Each stage either hands a typed context to the next one
//! or stops the request with an [`AppError`]. Services chain them in the
//! order a route requires while holding the store lock.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::{Uuid, Variant};

use crate::{
    error::AppError,
    store::{StoreState, Todo, User},
};

pub const USERNAME_HEADER: &str = "username";

pub const USER_NOT_FOUND: &str = "User not found!";
pub const QUOTA_EXCEEDED: &str = "Cannot create more todos";
pub const INVALID_UUID: &str = "Invalid uuid";
pub const TODO_NOT_FOUND: &str = "Invalid todo id";

/// Claimed identity taken verbatim from the `username` header.
///
/// A missing or non-UTF-8 header is kept as `None` so the identity guard
/// reports it like any unknown user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameHeader(pub Option<String>);

impl UsernameHeader {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for UsernameHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Ok(Self(username))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
}

impl UserContext {
    pub fn user<'a>(&self, state: &'a StoreState) -> Result<&'a User, AppError> {
        state
            .user(&self.user_id)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    pub fn user_mut<'a>(&self, state: &'a mut StoreState) -> Result<&'a mut User, AppError> {
        state
            .user_mut(&self.user_id)
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoContext {
    pub user_id: Uuid,
    pub todo_id: Uuid,
}

impl TodoContext {
    pub fn owner(&self) -> UserContext {
        UserContext {
            user_id: self.user_id,
        }
    }

    pub fn todo_mut<'a>(&self, state: &'a mut StoreState) -> Result<&'a mut Todo, AppError> {
        self.owner()
            .user_mut(state)?
            .todo_mut(&self.todo_id)
            .ok_or_else(|| AppError::not_found(TODO_NOT_FOUND))
    }
}

pub fn user_by_username(
    state: &StoreState,
    username: Option<&str>,
) -> Result<UserContext, AppError> {
    username
        .and_then(|username| state.find_by_username(username))
        .map(|user| UserContext { user_id: user.id })
        .ok_or_else(|| {
            tracing::debug!(username = ?username, "unknown username");
            AppError::not_found(USER_NOT_FOUND)
        })
}

/// Ids match only in the form they are issued (lowercase, hyphenated); any
/// other token simply matches nobody.
pub fn user_by_id(state: &StoreState, raw_id: &str) -> Result<UserContext, AppError> {
    Uuid::try_parse(raw_id)
        .ok()
        .filter(|id| id.hyphenated().to_string() == raw_id)
        .and_then(|id| state.user(&id))
        .map(|user| UserContext { user_id: user.id })
        .ok_or_else(|| {
            tracing::debug!(user_id = raw_id, "unknown user id");
            AppError::not_found(USER_NOT_FOUND)
        })
}

pub fn within_quota(
    state: &StoreState,
    ctx: UserContext,
    free_todo_limit: usize,
) -> Result<UserContext, AppError> {
    let user = ctx.user(state)?;

    if !user.pro && user.todos.len() >= free_todo_limit {
        tracing::debug!(username = %user.username, todos = user.todos.len(), "todo quota reached");
        return Err(AppError::forbidden(QUOTA_EXCEEDED));
    }

    Ok(ctx)
}

pub fn todo_for_user(
    state: &StoreState,
    username: Option<&str>,
    raw_todo_id: &str,
) -> Result<TodoContext, AppError> {
    let ctx = user_by_username(state, username)?;
    let todo_id = parse_todo_id(raw_todo_id)?;

    state
        .user(&ctx.user_id)
        .and_then(|user| user.todo(&todo_id))
        .map(|todo| TodoContext {
            user_id: ctx.user_id,
            todo_id: todo.id,
        })
        .ok_or_else(|| AppError::not_found(TODO_NOT_FOUND))
}

/// Accepts only the canonical hyphenated form of an RFC 4122 UUID
/// (versions 1 to 5) or the nil UUID.
pub fn parse_todo_id(raw: &str) -> Result<Uuid, AppError> {
    let invalid = || AppError::bad_request(INVALID_UUID);

    if raw.len() != 36 {
        return Err(invalid());
    }
    let id = Uuid::try_parse(raw).map_err(|_| invalid())?;
    if id.is_nil() {
        return Ok(id);
    }
    let version_ok = (1..=5).contains(&id.get_version_num());
    if !version_ok || id.get_variant() != Variant::RFC4122 {
        return Err(invalid());
    }
    Ok(id)
}
