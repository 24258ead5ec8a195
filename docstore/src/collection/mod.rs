//! Documents and document identities.
//!
//! A [Document] is an ordered map from field names to [`crate::common::Value`]s.
//! Nested records are plain documents stored as values, and lists of records
//! are arrays of documents.
//!
//! ```rust
//! use docstore::doc;
//!
//! let mut contact = doc! {
//!     name: "Tony",
//!     addresses: [{ street: "25 corp road" }],
//! };
//! contact.set("age", 35);
//! assert!(contact.has("age"));
//! ```
//!
//! # Identities
//!
//! The `_id` field holds the identity assigned when a document is inserted
//! through [`crate::DocumentDatabase`]. Identities come from an [IdGenerator];
//! the default [ObjectIdGenerator] produces 24 character hex strings.

mod document;
mod object_id;

pub use document::*;
pub use object_id::*;
