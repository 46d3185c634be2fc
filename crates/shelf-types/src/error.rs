use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid book id: {0}")]
    InvalidId(String),

    #[error("book name must not be empty")]
    EmptyName,

    #[error("book name too long: {actual} characters (max {max})")]
    NameTooLong { actual: usize, max: usize },
}
