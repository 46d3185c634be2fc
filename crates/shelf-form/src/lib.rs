//! Form-data support for the Shelf catalogue.
//!
//! Turns any serializable value into the flat `path -> text` map that
//! form-binding web frameworks expect, then encodes that map as an
//! `application/x-www-form-urlencoded` or `multipart/form-data` body.
//!
//! Paths join field names with `.` and mark sequence positions with `[i]`:
//!
//! ```text
//! {"Address": {"Street": "Main"}, "Items": [{"Name": "A"}]}
//!     => Address.Street=Main, Items[0].Name=A
//! ```
//!
//! # Key Types
//!
//! - [`FormValue`] -- the tree being flattened (scalar, object, or sequence)
//! - [`FormMap`] -- the flattened result, insertion-ordered with unique keys
//! - [`MultipartForm`] -- `multipart/form-data` body builder

pub mod error;
pub mod flatten;
pub mod map;
pub mod multipart;
pub mod value;

pub use error::{FormError, FormResult};
pub use flatten::{flatten, flatten_with, to_form_map, FlattenOptions, LeafObjectPolicy};
pub use map::FormMap;
pub use multipart::{FormFile, MultipartForm};
pub use value::{FormValue, Scalar};
