use shelf_types::{Book, BookId, NewBook};

use crate::error::StoreResult;

/// Storage for books.
///
/// Implementations must satisfy these invariants:
/// - `insert` assigns a fresh id greater than any id handed out before.
/// - `update` only replaces an existing book; it never creates one.
/// - Every call observes a consistent snapshot (no torn reads).
pub trait BookStore: Send + Sync {
    /// All books, ordered by id.
    fn list(&self) -> Vec<Book>;

    /// Look up a book. Returns `None` if it does not exist.
    fn get(&self, id: BookId) -> Option<Book>;

    /// Store a new book and return it with its assigned id.
    fn insert(&self, book: NewBook) -> StoreResult<Book>;

    /// Replace an existing book.
    ///
    /// Returns `Err(StoreError::NotFound)` if no book has this id.
    fn update(&self, book: Book) -> StoreResult<Book>;

    /// Check whether a book exists.
    fn exists(&self, id: BookId) -> bool {
        self.get(id).is_some()
    }

    /// Number of stored books.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Returns `true` if the store holds no books.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
