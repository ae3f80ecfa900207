use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError, routes::todos::TodoResponse, services::ServiceContext, state::AppState,
    store::User,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<TodoResponse>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/pro", patch(upgrade_to_pro))
        .with_state(state)
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = ServiceContext::from_state(&state)
        .user()
        .register(&body.name, &body.username)?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = ServiceContext::from_state(&state).user().find(&id)?;
    Ok(Json(user.into()))
}

async fn upgrade_to_pro(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = ServiceContext::from_state(&state)
        .user()
        .upgrade_to_pro(&id)?;
    Ok(Json(user.into()))
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            pro: user.pro,
            todos: user.todos.into_iter().map(TodoResponse::from).collect(),
        }
    }
}
