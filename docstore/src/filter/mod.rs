//! Conditions for selecting documents.
//!
//! A query is a conjunction of conditions, written as a map from condition
//! keys to operands. A condition key is a field path optionally followed by a
//! space and an operator:
//!
//! | key              | meaning                                   |
//! |------------------|-------------------------------------------|
//! | `"name"`         | `name` equals the operand                 |
//! | `"age >="`       | `age` is at least the operand (numeric)   |
//! | `"tags IN"`      | `tags` overlaps the operand list          |
//! | `"name LIKE"`    | `name` matches a `%`/`_` pattern          |
//!
//! Supported operators are `=`, `!=`, `IN`, `NOT IN`, `>`, `>=`, `<`, `<=`,
//! `LIKE` and `NOT LIKE`. Field paths use `.` to reach into nested documents
//! and are applied to every element of a list along the way, so
//! `"addresses.street"` tests the street of every address.
//!
//! ```rust
//! use docstore::doc;
//! use docstore::filter::{ConditionSet, Conditions};
//!
//! let from_map = ConditionSet::from_document(&doc! { "age >": 30 })?;
//! let fluent = Conditions::new().gt("age", 30).build()?;
//! assert_eq!(from_map, fluent);
//! # Ok::<(), docstore::errors::DocStoreError>(())
//! ```

mod condition;
mod field_resolver;
mod fluent;
mod like_pattern;
mod operator;

pub use condition::*;
pub use fluent::*;
pub use like_pattern::*;
pub use operator::*;
