use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Body of every failed request: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            log_app_error(&self, status);
            // Internal details stay in the logs.
            return ErrorBody::new(INTERNAL_ERROR_MESSAGE).into_response_with(status);
        }
        ErrorBody::new(self.message()).into_response_with(status)
    }
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn log_app_error(err: &AppError, status: StatusCode) {
    tracing::error!(status = status.as_u16(), error = %err, "request failed");
}

#[cfg(test)]
mod tests {
    use axum::body;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let json = serde_json::from_slice(&bytes).expect("body should be json");
        (status, json)
    }

    #[tokio::test]
    async fn client_errors_expose_their_message() {
        let (status, json) = render(AppError::forbidden("Cannot create more todos")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json, serde_json::json!({ "error": "Cannot create more todos" }));
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let (status, json) = render(AppError::internal("store lock poisoned")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    }
}
