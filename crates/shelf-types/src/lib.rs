//! Domain types for the Shelf book catalogue.
//!
//! Every other Shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`Book`] -- a catalogue entry as stored and served
//! - [`BookId`] -- store-assigned integer identifier
//! - [`NewBook`] -- validated input for creating a book
//! - [`FieldEq`] -- explicit field-by-field comparison with an ignore list

pub mod book;
pub mod compare;
pub mod error;

pub use book::{validate_name, Book, BookId, NewBook, MAX_NAME_LEN};
pub use compare::{optional_fields_equal, FieldEq};
pub use error::TypeError;
