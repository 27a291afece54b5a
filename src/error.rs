use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Caller-facing error surface. Validation failures carry field-keyed
/// messages and never touch the store; store failures are reduced to
/// the uniform database-error message before they leave the handler.
#[derive(Debug)]
pub enum AppError {
    /// Field-keyed form errors, serialized under `errors`.
    Validation {
        message: String,
        errors: serde_json::Value,
    },
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    /// The uniform message family for failed store operations, e.g.
    /// "Failed to Create Invoice.".
    Database(String),
    Internal(String),
}

impl AppError {
    /// Reduce a store failure to the uniform caller-facing message,
    /// logging the underlying cause at the boundary.
    pub fn database(message: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!("Database error: {err}");
        AppError::Database(message.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. } => write!(f, "{message}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Database(msg) => write!(f, "Database Error: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation { message, errors } => {
                let body = json!({ "message": message, "errors": errors });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database Error: {msg}"),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
