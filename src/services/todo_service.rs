use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    error::AppError,
    middleware::guards,
    store::{Store, Todo},
};

pub const INVALID_DEADLINE: &str = "Invalid deadline";
pub const TODO_GONE: &str = "Todo not found";

/// Title and deadline as sent by the client, deadline still unparsed.
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub title: String,
    pub deadline: String,
}

/// A request body that may have failed to decode. The failure is reported
/// only once the guards of the operation have passed.
pub type DraftResult = Result<TodoDraft, AppError>;

#[derive(Clone)]
pub struct TodoService {
    store: Store,
    free_todo_limit: usize,
}

impl TodoService {
    pub fn new(store: Store, free_todo_limit: usize) -> Self {
        Self {
            store,
            free_todo_limit,
        }
    }

    pub fn list(&self, username: Option<&str>) -> Result<Vec<Todo>, AppError> {
        let state = self.store.read()?;
        let ctx = guards::user_by_username(&state, username)?;
        Ok(ctx.user(&state)?.todos.clone())
    }

    pub fn create(&self, username: Option<&str>, draft: DraftResult) -> Result<Todo, AppError> {
        let mut state = self.store.write()?;
        let ctx = guards::user_by_username(&state, username)
            .and_then(|ctx| guards::within_quota(&state, ctx, self.free_todo_limit))?;
        let draft = draft?;
        let deadline = parse_deadline(&draft.deadline)?;

        let todo = Todo::new(draft.title, deadline);
        let user = ctx.user_mut(&mut state)?;
        user.todos.push(todo.clone());

        tracing::info!(
            user_id = %user.id,
            todo_id = %todo.id,
            todos = user.todos.len(),
            "todo created"
        );
        Ok(todo)
    }

    pub fn update(
        &self,
        username: Option<&str>,
        raw_todo_id: &str,
        draft: DraftResult,
    ) -> Result<Todo, AppError> {
        let mut state = self.store.write()?;
        let ctx = guards::todo_for_user(&state, username, raw_todo_id)?;
        let draft = draft?;
        let deadline = parse_deadline(&draft.deadline)?;

        let todo = ctx.todo_mut(&mut state)?;
        todo.title = draft.title;
        todo.deadline = deadline;

        tracing::debug!(todo_id = %todo.id, "todo updated");
        Ok(todo.clone())
    }

    /// Marks the todo done. Completing an already finished todo succeeds.
    pub fn complete(&self, username: Option<&str>, raw_todo_id: &str) -> Result<Todo, AppError> {
        let mut state = self.store.write()?;
        let ctx = guards::todo_for_user(&state, username, raw_todo_id)?;

        let todo = ctx.todo_mut(&mut state)?;
        todo.done = true;

        tracing::debug!(todo_id = %todo.id, "todo completed");
        Ok(todo.clone())
    }

    pub fn delete(&self, username: Option<&str>, raw_todo_id: &str) -> Result<(), AppError> {
        let mut state = self.store.write()?;
        guards::user_by_username(&state, username)?;
        let ctx = guards::todo_for_user(&state, username, raw_todo_id)?;

        let user = ctx.owner().user_mut(&mut state)?;
        user.remove_todo(&ctx.todo_id)
            .ok_or_else(|| AppError::not_found(TODO_GONE))?;

        tracing::info!(user_id = %user.id, todo_id = %ctx.todo_id, "todo deleted");
        Ok(())
    }
}

/// Parses a deadline given as RFC 3339, as a naive timestamp or as a bare
/// `YYYY-MM-DD` date. Naive values are read as UTC.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| AppError::bad_request(INVALID_DEADLINE))
}
