//! File-per-document storage.
//!
//! [DocumentStore] keeps each document in its own JSON file below a root
//! directory and answers queries by scanning those files. There are no
//! indexes: every find reads every candidate under its prefix.

mod document_store;
mod find_options;
mod store_config;

pub use document_store::*;
pub use find_options::*;
pub use store_config::*;
