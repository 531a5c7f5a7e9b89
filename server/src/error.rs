//! Error responses.
//!
//! Every handler failure ends up here. Client mistakes keep their message;
//! store failures are logged and replaced by a fixed message.

use axum::{
    extract::rejection::{BytesRejection, FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request body or path failed validation.
    #[error("{0}")]
    Validation(String),

    #[error("Todo not found.")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "todo store operation failed");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error_message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn statuses_follow_variant() {
        assert_eq!(
            AppError::Validation("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);

        let io = std::io::Error::other("disk gone");
        let store = AppError::Store(StoreError::Io {
            path: PathBuf::from("todos.json"),
            source: io,
        });
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_uses_error_message_key() {
        let body = ErrorBody {
            error_message: "Todo not found.".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errorMessage"], "Todo not found.");
    }
}
