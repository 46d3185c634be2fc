use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestkitError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("form encoding error: {0}")]
    Form(#[from] shelf_form::FormError),

    #[error("unexpected status: expected {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },
}

pub type TestkitResult<T> = Result<T, TestkitError>;
