//! Domain types and pure logic for the setlist archive.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these types.

pub mod error;
pub mod ordering;
pub mod performance_flags;
pub mod types;
