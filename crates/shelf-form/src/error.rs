use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type FormResult<T> = Result<T, FormError>;
