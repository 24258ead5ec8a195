//! # docstore
//!
//! A schema-less document store kept as plain JSON files on disk.
//!
//! Every document lives in its own file, addressed by a slash separated key:
//! the key `books/computing/0321127420` is stored at
//! `<root>/books/computing/0321127420.json`. Documents are found by listing a
//! key prefix or by scanning it with a set of field conditions.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use docstore::{doc, DocumentDatabase};
//! use docstore::filter::Conditions;
//! use docstore::store::FindOptions;
//!
//! let db = DocumentDatabase::open("/var/lib/contacts")?;
//!
//! let mut tony = doc! {
//!     name: "Tony",
//!     age: 35,
//!     addresses: [{ street: "25 corp road" }],
//! };
//! db.insert(&mut tony, Some("contacts"))?;
//!
//! let options = FindOptions::new()
//!     .prefix("contacts")
//!     .conditions(Conditions::new().gt("age", 30).like("name", "T%").build()?);
//! for contact in db.store().find_all(&options)? {
//!     println!("{}", contact);
//! }
//! # Ok::<(), docstore::errors::DocStoreError>(())
//! ```
//!
//! ## Modules
//!
//! - [`collection`] - documents and id generation
//! - [`common`] - values and shared constants
//! - [`filter`] - condition parsing and matching
//! - [`store`] - the file-per-document store and find options
//! - [`errors`] - error types
//!
//! ## Consistency
//!
//! Writes are atomic per document: content goes to a temporary file that is
//! renamed over the target. Nothing else is coordinated. Concurrent writers
//! to one key race with the last rename winning, and scans are not
//! snapshots.

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod store;

mod cache;
mod database;

pub use cache::DocumentCache;
pub use collection::{Document, IdGenerator, ObjectIdGenerator};
pub use common::Value;
pub use database::DocumentDatabase;
pub use filter::{ConditionSet, Conditions};
pub use store::{DocumentStore, FindMode, FindOptions, FindResult};

use once_cell::sync::Lazy;

pub(crate) static ID_GENERATOR: Lazy<ObjectIdGenerator> = Lazy::new(ObjectIdGenerator::new);

/// Returns a new 24 character hex object id from the process-wide generator.
///
/// ```rust
/// let id = docstore::object_id();
/// assert_eq!(id.len(), 24);
/// ```
pub fn object_id() -> String {
    ID_GENERATOR.generate()
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    colog::init();
}
