//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the `Deserialize` DTOs accepted for writes.

pub mod content;
pub mod content_version;
