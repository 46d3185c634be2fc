//! Book storage for the Shelf catalogue.
//!
//! All backends implement the [`BookStore`] trait:
//!
//! - [`InMemoryBookStore`] -- `BTreeMap`-based store shared by the server and
//!   its tests
//!
//! # Design Rules
//!
//! 1. The store assigns ids; callers never choose one on insert.
//! 2. Ids are handed out in increasing order and never reused.
//! 3. Concurrent readers and writers are safe; each call is atomic.
//! 4. Listing is ordered by id.

pub mod error;
pub mod memory;
pub mod seed;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBookStore;
pub use seed::{seed, SEED_TITLES};
pub use traits::BookStore;
