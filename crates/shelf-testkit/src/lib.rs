//! In-process test host for the Shelf book catalogue.
//!
//! Build a [`TestServer`] per test (or clone one to share it), take a
//! [`TestClient`] from it, and drive the real router with JSON or form
//! bodies:
//!
//! ```no_run
//! # async fn demo() -> shelf_testkit::TestkitResult<()> {
//! use shelf_testkit::TestServer;
//! use shelf_types::Book;
//!
//! let server = TestServer::new();
//! let books: Vec<Book> = server.client().get_json("/Books").await?;
//! assert_eq!(books.len(), 23);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod host;

pub use client::{TestClient, TestResponse};
pub use error::{TestkitError, TestkitResult};
pub use host::TestServer;
