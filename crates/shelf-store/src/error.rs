use shelf_types::{BookId, TypeError};

/// Errors from book store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested book does not exist.
    #[error("book not found: {0}")]
    NotFound(BookId),

    /// The book failed validation.
    #[error("invalid book: {0}")]
    Invalid(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
