//! Common types shared by documents, conditions and the store.
//!
//! - [`Value`] - the dynamically typed value held by document fields
//! - key helpers - validation and prefix handling for storage keys
//! - constants - reserved field names, separators and defaults

mod constants;
mod key;
mod value;

pub use constants::*;
pub(crate) use key::*;
pub use value::*;
