//! Convert a record into a string-keyed map of JSON values, renaming or
//! replacing individual fields on the way.
//!
//! ```ignore
//! #[derive(Record)]
//! struct User {
//!     #[structfield("id")]
//!     id: String,
//!     #[structfield("friends,omitempty")]
//!     friends: Vec<User>,
//! }
//!
//! let transformers = Transformers::new().with(
//!     "friends",
//!     transformer_fn(|field, _| (format!("{field}_url"), json!("https://some.api.com/friends"))),
//! );
//! let fields = structfield::transform(&user, &transformers)?;
//! ```
//!
//! Only the top-level fields of a record are visited. Nested records and
//! collections are handed to transformers as opaque values.

pub mod empty;
pub mod error;
pub mod mapper;
pub mod record;
pub mod schema;
pub mod ser;
pub mod tag;
pub mod transformer;

pub use structfield_derive::Record;

pub use empty::{is_empty, IsEmpty};
pub use error::Error;
pub use mapper::{transform, Fields};
pub use record::Record;
pub use schema::{FieldDescriptor, Schema};
pub use ser::transform_serialize;
pub use tag::FieldTag;
pub use transformer::{transformer_fn, Transformer, TransformerFn, Transformers};

#[doc(hidden)]
pub mod __private {
    pub use crate::empty::{EmptyCheck, KnownEmpty, NeverEmpty};
    pub use serde_json;
}
