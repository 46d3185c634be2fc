use std::collections::BTreeMap;
use std::sync::RwLock;

use shelf_types::{validate_name, Book, BookId, NewBook};

use crate::error::{StoreError, StoreResult};
use crate::traits::BookStore;

struct Books {
    by_id: BTreeMap<BookId, Book>,
    next_id: i32,
}

/// In-memory, `BTreeMap`-based book store.
///
/// Books live behind a single `RwLock` so id assignment and insertion happen
/// atomically. Books are cloned on read and write.
pub struct InMemoryBookStore {
    books: RwLock<Books>,
}

impl InMemoryBookStore {
    /// Create a new empty store. The first inserted book gets id 1.
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Books {
                by_id: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Remove every book. Ids keep counting from where they were.
    pub fn clear(&self) {
        self.books.write().expect("lock poisoned").by_id.clear();
    }

    /// All stored ids in ascending order.
    pub fn all_ids(&self) -> Vec<BookId> {
        self.books
            .read()
            .expect("lock poisoned")
            .by_id
            .keys()
            .copied()
            .collect()
    }
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for InMemoryBookStore {
    fn list(&self) -> Vec<Book> {
        let books = self.books.read().expect("lock poisoned");
        books.by_id.values().cloned().collect()
    }

    fn get(&self, id: BookId) -> Option<Book> {
        let books = self.books.read().expect("lock poisoned");
        books.by_id.get(&id).cloned()
    }

    fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let mut books = self.books.write().expect("lock poisoned");
        let id = BookId::new(books.next_id);
        books.next_id += 1;
        let book = book.into_book(id);
        books.by_id.insert(id, book.clone());
        tracing::debug!(%id, name = %book.name, "book inserted");
        Ok(book)
    }

    fn update(&self, book: Book) -> StoreResult<Book> {
        let name = validate_name(&book.name)?;
        let mut books = self.books.write().expect("lock poisoned");
        let slot = books
            .by_id
            .get_mut(&book.id)
            .ok_or(StoreError::NotFound(book.id))?;
        slot.name = name;
        tracing::debug!(id = %book.id, "book updated");
        Ok(slot.clone())
    }

    fn exists(&self, id: BookId) -> bool {
        let books = self.books.read().expect("lock poisoned");
        books.by_id.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.books.read().expect("lock poisoned").by_id.len()
    }
}

impl std::fmt::Debug for InMemoryBookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBookStore")
            .field("book_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn new_book(name: &str) -> NewBook {
        NewBook::new(name).unwrap()
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = InMemoryBookStore::new();
        let a = store.insert(new_book("Energy")).unwrap();
        let b = store.insert(new_book("Finance")).unwrap();
        assert_eq!(a.id, BookId::new(1));
        assert_eq!(b.id, BookId::new(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_returns_inserted_book() {
        let store = InMemoryBookStore::new();
        let book = store.insert(new_book("Energy")).unwrap();
        assert_eq!(store.get(book.id), Some(book));
        assert_eq!(store.get(BookId::new(99)), None);
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = InMemoryBookStore::new();
        for name in ["C", "A", "B"] {
            store.insert(new_book(name)).unwrap();
        }
        let names: Vec<String> = store.list().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(
            store.all_ids(),
            vec![BookId::new(1), BookId::new(2), BookId::new(3)]
        );
    }

    #[test]
    fn update_replaces_name() {
        let store = InMemoryBookStore::new();
        let mut book = store.insert(new_book("Energy")).unwrap();
        book.name = "  Energy 2017 ".into();
        let updated = store.update(book.clone()).unwrap();
        assert_eq!(updated.name, "Energy 2017");
        assert_eq!(store.get(book.id).unwrap().name, "Energy 2017");
    }

    #[test]
    fn update_missing_book_fails() {
        let store = InMemoryBookStore::new();
        let book = Book::new(BookId::new(3), "Ghost").unwrap();
        assert!(matches!(
            store.update(book),
            Err(StoreError::NotFound(id)) if id == BookId::new(3)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn update_rejects_blank_name() {
        let store = InMemoryBookStore::new();
        let mut book = store.insert(new_book("Energy")).unwrap();
        book.name = " ".into();
        assert!(matches!(store.update(book), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn clear_keeps_id_counter() {
        let store = InMemoryBookStore::new();
        store.insert(new_book("Energy")).unwrap();
        store.clear();
        assert!(store.is_empty());
        let next = store.insert(new_book("Finance")).unwrap();
        assert_eq!(next.id, BookId::new(2));
    }

    #[test]
    fn exists_tracks_membership() {
        let store = InMemoryBookStore::new();
        let book = store.insert(new_book("Energy")).unwrap();
        assert!(store.exists(book.id));
        assert!(!store.exists(BookId::new(2)));
    }

    #[test]
    fn concurrent_inserts_get_unique_ids() {
        let store = Arc::new(InMemoryBookStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        store.insert(new_book(&format!("t{t}-{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 200);
        let ids = store.all_ids();
        assert_eq!(ids.first(), Some(&BookId::new(1)));
        assert_eq!(ids.last(), Some(&BookId::new(200)));
    }

    #[test]
    fn debug_shows_count() {
        let store = InMemoryBookStore::new();
        store.insert(new_book("Energy")).unwrap();
        assert_eq!(format!("{store:?}"), "InMemoryBookStore { book_count: 1 }");
    }
}
