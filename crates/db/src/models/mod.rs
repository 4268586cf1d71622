//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod album;
pub mod event;
pub mod ordering;
pub mod performance;
pub mod set;
pub mod song;
pub mod track;
