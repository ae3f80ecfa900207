use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::UsernameHeader,
    services::{
        ServiceContext,
        todo_service::{DraftResult, TodoDraft},
    },
    state::AppState,
    store::Todo,
};

/// Body shared by create and update: both carry the full title and deadline.
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub deadline: String,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/todos/{id}/done", patch(complete_todo))
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    username: UsernameHeader,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = ServiceContext::from_state(&state)
        .todo()
        .list(username.as_deref())?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    username: UsernameHeader,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = ServiceContext::from_state(&state)
        .todo()
        .create(username.as_deref(), into_draft(body))?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    username: UsernameHeader,
    Path(id): Path<String>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = ServiceContext::from_state(&state).todo().update(
        username.as_deref(),
        &id,
        into_draft(body),
    )?;
    Ok(Json(todo.into()))
}

async fn complete_todo(
    State(state): State<Arc<AppState>>,
    username: UsernameHeader,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = ServiceContext::from_state(&state)
        .todo()
        .complete(username.as_deref(), &id)?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    username: UsernameHeader,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    ServiceContext::from_state(&state)
        .todo()
        .delete(username.as_deref(), &id)?;
    Ok(StatusCode::NO_CONTENT)
}

// Rejections are carried into the service so identity, quota and id checks
// still answer first.
fn into_draft(body: Result<Json<TodoRequest>, JsonRejection>) -> DraftResult {
    body.map(|Json(body)| TodoDraft {
        title: body.title,
        deadline: body.deadline,
    })
    .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            deadline: todo.deadline,
            done: todo.done,
            created_at: todo.created_at,
        }
    }
}
