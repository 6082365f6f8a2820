use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{provider} responded with {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// A flag was switched on before its live code path exists.
    #[error("live {integration} integration is not implemented yet")]
    NotImplemented { integration: &'static str },

    #[error("{0} is not configured")]
    MissingConfig(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Transport(_) | AppError::Provider { .. } => StatusCode::BAD_GATEWAY,
            AppError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            AppError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Transport(_) => "UPSTREAM_UNREACHABLE",
            AppError::Provider { .. } => "UPSTREAM_ERROR",
            AppError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            AppError::MissingConfig(_) => "MISSING_CONFIG",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Database details stay in the logs.
        let message = match &self {
            AppError::Storage(e) => {
                error!(error = ?e, "database error");
                "Database error".to_string()
            }
            other => {
                if status.is_server_error() {
                    error!(error = %other, "request failed");
                }
                other.to_string()
            }
        };

        (status, Json(json!({ "code": self.code(), "message": message }))).into_response()
    }
}
